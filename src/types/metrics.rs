//! Running aggregate metrics
//!
//! The aggregate is co-located with the event log and updated synchronously
//! on every ingestion call, so overview queries never need a log scan.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::event::ProductAction;

/// Per-product interaction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub views: u64,
    pub purchases: u64,
    pub cart_adds: u64,
}

impl ProductStats {
    /// Bump the counter for one action
    pub fn increment(&mut self, action: ProductAction) {
        match action {
            ProductAction::Views => self.views += 1,
            ProductAction::Purchases => self.purchases += 1,
            ProductAction::CartAdds => self.cart_adds += 1,
        }
    }

    /// Read the counter for one action
    pub fn get(&self, action: ProductAction) -> u64 {
        match action {
            ProductAction::Views => self.views,
            ProductAction::Purchases => self.purchases,
            ProductAction::CartAdds => self.cart_adds,
        }
    }
}

/// Mutable summary updated on every ingestion call
///
/// Invariants:
/// - `successful_payments + failed_payments` equals the number of ingested
///   payment events
/// - `total_revenue` is the sum of successful payment amounts plus all
///   subscription amounts
/// - every `userId` seen on any event is in `unique_users`; only page views
///   add to `active_users`, so `active_users ⊆ unique_users`
#[derive(Debug, Clone, Default)]
pub struct AggregateMetrics {
    pub page_views: u64,
    pub unique_users: HashSet<String>,
    pub active_users: HashSet<String>,
    pub total_revenue: f64,
    pub successful_payments: u64,
    pub failed_payments: u64,
    pub subscriptions: u64,
    pub product_stats: BTreeMap<String, ProductStats>,
}

impl AggregateMetrics {
    /// Number of distinct users ever seen
    pub fn unique_user_count(&self) -> usize {
        self.unique_users.len()
    }

    /// Number of distinct users seen via a page view
    pub fn active_user_count(&self) -> usize {
        self.active_users.len()
    }

    /// Successful payments per distinct user, as a percentage rounded to
    /// two decimal places; 0.0 when no users have been seen
    ///
    /// The denominator is all distinct users, not distinct payers.
    pub fn conversion_rate(&self) -> f64 {
        let users = self.unique_users.len();
        if users == 0 {
            return 0.0;
        }
        let rate = self.successful_payments as f64 / users as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}
