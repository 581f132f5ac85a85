//! Time and date-bucketing helpers

use chrono::{DateTime, Local, Utc};

/// Calendar-date key for day-bucketed report views
///
/// Formats the timestamp as `YYYY-MM-DD` in the process-local time zone,
/// so all day-keyed maps sort chronologically and are locale-independent.
pub fn day_key(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
