//! Ingestion endpoints
//!
//! JSON bodies carry the fields of the matching engine operation. The
//! browser client also tags calls with its own session identifier and
//! timestamp; those travel inside generic-event payload data, the engine
//! stamps every log entry with its own process-lifetime session tag.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::engine::AnalyticsEngine;
use crate::types::ProductAction;

use super::{error_response, ApiResult, IngestAck};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewRequest {
    pub page: String,
    pub user_id: Option<String>,
}

/// POST /api/analytics/pageview
pub async fn track_page_view(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(req): Json<PageViewRequest>,
) -> ApiResult<IngestAck> {
    engine
        .record_page_view(&req.page, req.user_id.as_deref())
        .map_err(error_response)?;
    Ok(Json(IngestAck::recorded()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventRequest {
    /// Caller-supplied event name
    pub event: String,
    #[serde(default)]
    pub data: Value,
    pub user_id: Option<String>,
}

/// POST /api/analytics/track
pub async fn track_event(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(req): Json<TrackEventRequest>,
) -> ApiResult<IngestAck> {
    engine
        .record_event(&req.event, req.data, req.user_id.as_deref())
        .map_err(error_response)?;
    Ok(Json(IngestAck::recorded()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: f64,
    pub success: bool,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
}

/// POST /api/analytics/payment
pub async fn track_payment(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<IngestAck> {
    engine
        .record_payment(
            req.amount,
            req.success,
            req.user_id.as_deref(),
            req.product_id.as_deref(),
        )
        .map_err(error_response)?;
    Ok(Json(IngestAck::recorded()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub plan_id: String,
    pub user_id: String,
    pub amount: f64,
}

/// POST /api/analytics/subscription
pub async fn track_subscription(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(req): Json<SubscriptionRequest>,
) -> ApiResult<IngestAck> {
    engine
        .record_subscription(&req.plan_id, &req.user_id, req.amount)
        .map_err(error_response)?;
    Ok(Json(IngestAck::recorded()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInteractionRequest {
    pub product_id: String,
    /// One of "views", "purchases", "cartAdds"
    pub action: String,
    pub user_id: Option<String>,
}

/// POST /api/analytics/product
pub async fn track_product_interaction(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(req): Json<ProductInteractionRequest>,
) -> ApiResult<IngestAck> {
    let action: ProductAction = req.action.parse().map_err(error_response)?;
    engine
        .record_product_interaction(&req.product_id, action, req.user_id.as_deref())
        .map_err(error_response)?;
    Ok(Json(IngestAck::recorded()))
}
