//! Pulse Analytics - Binary Entry Point
//!
//! Starts the HTTP server with a fresh engine. State is memory-resident
//! and discarded on shutdown.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pulse_analytics::api::http::create_router;
use pulse_analytics::{AnalyticsEngine, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let engine = Arc::new(AnalyticsEngine::new());
    tracing::info!(session = engine.session_id(), "engine ready");

    let app = create_router(engine);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "pulse-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("shutting down");
}
