//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::engine::AnalyticsEngine;

use super::rest::{ingest, report};

/// Create the Axum router with all endpoints
pub fn create_router(engine: Arc<AnalyticsEngine>) -> Router {
    // CORS configuration - the instrumentation client posts from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Ingestion endpoints
        .route("/api/analytics/pageview", post(ingest::track_page_view))
        .route("/api/analytics/track", post(ingest::track_event))
        .route("/api/analytics/payment", post(ingest::track_payment))
        .route("/api/analytics/subscription", post(ingest::track_subscription))
        .route("/api/analytics/product", post(ingest::track_product_interaction))
        // Query endpoints
        .route("/api/analytics", get(report::get_report))
        .route("/api/analytics/export", get(report::get_export))
        .layer(cors)
        .with_state(engine)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
