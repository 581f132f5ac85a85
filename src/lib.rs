//! Pulse Analytics
//!
//! An in-process event analytics engine: it ingests typed usage events
//! (page views, clicks, payments, subscriptions, product interactions)
//! into an append-only log, maintains running aggregate counters, and
//! answers analytical queries without an external datastore.
//!
//! # Features
//!
//! - **Append-only log**: events are immutable and kept in arrival order
//! - **Incremental counters**: overview metrics update on every ingest
//! - **On-demand scans**: per-day revenue and user-growth views
//! - **Thread-safe**: one RwLock guards the log and counters together
//! - **HTTP surface**: axum ingestion/report endpoints for browser clients
//!
//! # Modules
//!
//! - `types`: Core data structures (Event, AggregateMetrics, Report)
//! - `engine`: The Event Store & Aggregator
//! - `config`: Engine and server configuration
//! - `api`: Axum HTTP layer
//! - `utils`: Time helpers
//!
//! # Example
//!
//! ```
//! use pulse_analytics::AnalyticsEngine;
//!
//! let engine = AnalyticsEngine::new();
//! engine.record_page_view("/home", Some("u1")).unwrap();
//! engine.record_payment(50.0, true, Some("u1"), None).unwrap();
//!
//! let report = engine.build_report().unwrap();
//! assert_eq!(report.overview.total_page_views, 1);
//! assert_eq!(report.overview.total_revenue, 50.0);
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{EngineConfig, ServerConfig};
pub use engine::{AnalyticsEngine, AnalyticsError, AnalyticsResult};
pub use types::{
    AggregateMetrics, Event, EventKind, EventPayload, ExportData, Overview, ProductAction,
    ProductStats, Report,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
