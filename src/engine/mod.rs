//! Event Store & Aggregator
//!
//! The [`AnalyticsEngine`] owns an append-only event log and the running
//! aggregate counters. Ingestion appends one event and folds it into the
//! counters inside a single write-lock critical section; queries read a
//! consistent snapshot under a shared lock. Construct one engine at process
//! start and hand it to every collaborator that needs it.

mod ingest;
mod report;

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::types::{
    AggregateMetrics, Event, EventPayload, ExportData, ProductAction, Report,
};

/// Result type for engine operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur in engine operations
#[derive(Debug)]
pub enum AnalyticsError {
    /// An input failed validation; names the offending field.
    /// No partial mutation occurs.
    Validation { field: &'static str, reason: String },
    /// An unexpected internal failure (e.g. serialization)
    Internal(String),
}

impl AnalyticsError {
    /// Shorthand for a validation failure on one field
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AnalyticsError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AnalyticsError::Validation { field, .. } => Some(field),
            AnalyticsError::Internal(_) => None,
        }
    }
}

impl std::fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsError::Validation { field, reason } => {
                write!(f, "invalid '{}': {}", field, reason)
            }
            AnalyticsError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AnalyticsError {}

impl From<serde_json::Error> for AnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        AnalyticsError::Internal(e.to_string())
    }
}

/// The log and counters, guarded together by one lock
#[derive(Debug, Default)]
pub(crate) struct EngineState {
    pub(crate) events: Vec<Event>,
    pub(crate) metrics: AggregateMetrics,
}

impl EngineState {
    /// Append one event and fold it into the running counters
    ///
    /// This is the single state transition shared by live ingestion and
    /// replay, so both always agree on what each event means.
    pub(crate) fn apply(&mut self, event: Event, max_events: Option<usize>) {
        if let Some(user_id) = &event.user_id {
            self.metrics.unique_users.insert(user_id.clone());
        }

        match &event.payload {
            EventPayload::PageView(_) => {
                self.metrics.page_views += 1;
                if let Some(user_id) = &event.user_id {
                    self.metrics.active_users.insert(user_id.clone());
                }
            }
            EventPayload::Payment(payment) => {
                if payment.success {
                    self.metrics.total_revenue += payment.amount;
                    self.metrics.successful_payments += 1;
                } else {
                    self.metrics.failed_payments += 1;
                }
            }
            EventPayload::Subscription(subscription) => {
                self.metrics.subscriptions += 1;
                self.metrics.total_revenue += subscription.amount;
            }
            EventPayload::ProductInteraction(interaction) => {
                self.metrics
                    .product_stats
                    .entry(interaction.product_id.clone())
                    .or_default()
                    .increment(interaction.action);
            }
            EventPayload::Generic(_) => {}
        }

        self.events.push(event);

        // Optional retention cap: drop oldest entries past the cap. The
        // incremental counters keep lifetime totals; scan-derived views
        // then cover the retained window only.
        if let Some(cap) = max_events {
            if self.events.len() > cap {
                let excess = self.events.len() - cap;
                self.events.drain(..excess);
            }
        }
    }
}

/// In-process event store and aggregator
pub struct AnalyticsEngine {
    config: EngineConfig,
    /// Process-lifetime session tag stamped on every event
    session_id: String,
    state: RwLock<EngineState>,
}

impl AnalyticsEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            session_id: new_session_id(),
            state: RwLock::new(EngineState::default()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get this engine instance's session tag
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Number of events currently in the log
    pub fn event_count(&self) -> usize {
        self.state.read().events.len()
    }

    /// Append one validated event atomically with its counter update
    pub(crate) fn apply(&self, event: Event) {
        tracing::debug!(kind = %event.kind, "event ingested");
        self.state.write().apply(event, self.config.max_events);
    }

    pub(crate) fn state(&self) -> &RwLock<EngineState> {
        &self.state
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

// Ingestion operations (from ingest.rs)
impl AnalyticsEngine {
    /// Record a page view; counts the view and marks the user active
    pub fn record_page_view(&self, page: &str, user_id: Option<&str>) -> AnalyticsResult<()> {
        ingest::record_page_view(self, page, user_id)
    }

    /// Record a caller-named event; log-only, no counter side effects
    pub fn record_event(
        &self,
        name: &str,
        data: Value,
        user_id: Option<&str>,
    ) -> AnalyticsResult<()> {
        ingest::record_event(self, name, data, user_id)
    }

    /// Record a payment attempt; successful amounts count toward revenue
    pub fn record_payment(
        &self,
        amount: f64,
        success: bool,
        user_id: Option<&str>,
        product_id: Option<&str>,
    ) -> AnalyticsResult<()> {
        ingest::record_payment(self, amount, success, user_id, product_id)
    }

    /// Record a subscription; always counts toward revenue
    pub fn record_subscription(
        &self,
        plan_id: &str,
        user_id: &str,
        amount: f64,
    ) -> AnalyticsResult<()> {
        ingest::record_subscription(self, plan_id, user_id, amount)
    }

    /// Record a product interaction and bump its per-product counter
    pub fn record_product_interaction(
        &self,
        product_id: &str,
        action: ProductAction,
        user_id: Option<&str>,
    ) -> AnalyticsResult<()> {
        ingest::record_product_interaction(self, product_id, action, user_id)
    }

    /// Replay previously exported events through the live state transition,
    /// rebuilding the counters; all-or-nothing
    pub fn import_events(&self, events: Vec<Event>) -> AnalyticsResult<usize> {
        ingest::import_events(self, events)
    }
}

// Query operations (from report.rs)
impl AnalyticsEngine {
    /// Build the full analytics report from a consistent snapshot
    pub fn build_report(&self) -> AnalyticsResult<Report> {
        report::build_report(self)
    }

    /// Dump the full event log and a metrics snapshot
    pub fn export_data(&self) -> ExportData {
        report::export_data(self)
    }
}

/// Synthesize the process-lifetime session tag
fn new_session_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", millis, &suffix[..9])
}
