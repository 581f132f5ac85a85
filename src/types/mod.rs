//! Data types for the analytics engine
//!
//! This module contains all the core data structures used throughout the
//! crate: log events, running aggregate counters, and report shapes.

mod event;
mod metrics;
mod report;

pub use event::{
    Event, EventKind, EventPayload, GenericEventData, PageViewData, PaymentData, ProductAction,
    ProductInteractionData, SubscriptionData,
};
pub use metrics::{AggregateMetrics, ProductStats};
pub use report::{ExportData, MetricsExport, Overview, Report};
