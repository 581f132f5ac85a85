//! Report shapes returned by query operations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::metrics::ProductStats;

/// Headline counters derived from the running aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_page_views: u64,
    pub unique_users: usize,
    pub active_users: usize,
    pub total_revenue: f64,
    pub successful_payments: u64,
    pub failed_payments: u64,
    pub subscriptions: u64,
    pub conversion_rate: f64,
}

/// Full analytics report
///
/// `overview` and `popular_products` come straight from the incremental
/// counters; `recent_events`, `revenue_by_day`, and `user_growth` are
/// derived from the log at query time. Day-keyed maps use the process-local
/// calendar date formatted `YYYY-MM-DD`, so serialized output is ordered
/// and locale-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub overview: Overview,
    pub popular_products: BTreeMap<String, ProductStats>,
    /// Trailing window of the log in append order (oldest first)
    pub recent_events: Vec<Event>,
    /// Sum of successful payment amounts per day; subscriptions are
    /// excluded here even though they count toward `totalRevenue`
    pub revenue_by_day: BTreeMap<String, f64>,
    /// Distinct users that produced any event, per day
    pub user_growth: BTreeMap<String, usize>,
}

/// Metrics snapshot with the user-id sets materialized for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsExport {
    pub page_views: u64,
    pub unique_users: Vec<String>,
    pub active_users: Vec<String>,
    pub total_revenue: f64,
    pub successful_payments: u64,
    pub failed_payments: u64,
    pub subscriptions: u64,
    pub product_stats: BTreeMap<String, ProductStats>,
}

/// Full dump of the engine state: the event log plus a metrics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub events: Vec<Event>,
    pub metrics: MetricsExport,
}
