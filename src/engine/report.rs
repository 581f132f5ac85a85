//! Query operations
//!
//! Reports combine the incremental counters with on-demand scans of the
//! log, all read from one consistent snapshot of the engine state.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::{
    Event, EventPayload, ExportData, MetricsExport, Overview, Report,
};
use crate::utils::day_key;

use super::{AnalyticsEngine, AnalyticsResult};

pub(crate) fn build_report(engine: &AnalyticsEngine) -> AnalyticsResult<Report> {
    let state = engine.state().read();
    let metrics = &state.metrics;

    let overview = Overview {
        total_page_views: metrics.page_views,
        unique_users: metrics.unique_user_count(),
        active_users: metrics.active_user_count(),
        total_revenue: metrics.total_revenue,
        successful_payments: metrics.successful_payments,
        failed_payments: metrics.failed_payments,
        subscriptions: metrics.subscriptions,
        conversion_rate: metrics.conversion_rate(),
    };

    Ok(Report {
        overview,
        popular_products: metrics.product_stats.clone(),
        recent_events: recent_events(&state.events, engine.config().recent_events_limit),
        revenue_by_day: revenue_by_day(&state.events),
        user_growth: user_growth(&state.events),
    })
}

pub(crate) fn export_data(engine: &AnalyticsEngine) -> ExportData {
    let state = engine.state().read();
    let metrics = &state.metrics;

    let mut unique_users: Vec<String> = metrics.unique_users.iter().cloned().collect();
    unique_users.sort();
    let mut active_users: Vec<String> = metrics.active_users.iter().cloned().collect();
    active_users.sort();

    ExportData {
        events: state.events.clone(),
        metrics: MetricsExport {
            page_views: metrics.page_views,
            unique_users,
            active_users,
            total_revenue: metrics.total_revenue,
            successful_payments: metrics.successful_payments,
            failed_payments: metrics.failed_payments,
            subscriptions: metrics.subscriptions,
            product_stats: metrics.product_stats.clone(),
        },
    }
}

/// Trailing window of the log, append order preserved
fn recent_events(events: &[Event], limit: usize) -> Vec<Event> {
    let start = events.len().saturating_sub(limit);
    events[start..].to_vec()
}

/// Sum of successful payment amounts per local calendar date
///
/// Subscriptions are deliberately excluded from this view even though they
/// count toward `totalRevenue`; dependent reports rely on this split.
fn revenue_by_day(events: &[Event]) -> BTreeMap<String, f64> {
    let mut by_day = BTreeMap::new();
    for event in events {
        if let EventPayload::Payment(payment) = &event.payload {
            if payment.success {
                *by_day.entry(day_key(event.timestamp)).or_insert(0.0) += payment.amount;
            }
        }
    }
    by_day
}

/// Count of distinct users that produced any event, per local calendar date
fn user_growth(events: &[Event]) -> BTreeMap<String, usize> {
    let mut users_by_day: HashMap<String, HashSet<&str>> = HashMap::new();
    for event in events {
        if let Some(user_id) = &event.user_id {
            users_by_day
                .entry(day_key(event.timestamp))
                .or_default()
                .insert(user_id.as_str());
        }
    }

    users_by_day
        .into_iter()
        .map(|(day, users)| (day, users.len()))
        .collect()
}
