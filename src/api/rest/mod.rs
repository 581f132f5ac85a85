//! REST handlers
//!
//! - `POST /api/analytics/pageview` - record a page view
//! - `POST /api/analytics/track` - record a caller-named event
//! - `POST /api/analytics/payment` - record a payment attempt
//! - `POST /api/analytics/subscription` - record a subscription
//! - `POST /api/analytics/product` - record a product interaction
//! - `GET /api/analytics` - full report
//! - `GET /api/analytics/export` - event log and metrics dump

pub mod ingest;
pub mod report;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::engine::AnalyticsError;

/// Handler result: payload on success, status + error body on failure
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, field: Option<&'static str>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
            field,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
            field: None,
        }
    }
}

/// Map engine errors to HTTP responses
pub(crate) fn error_response(err: AnalyticsError) -> (StatusCode, Json<ApiError>) {
    match &err {
        AnalyticsError::Validation { field, .. } => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(err.to_string(), Some(*field))),
        ),
        AnalyticsError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::internal(err.to_string())),
        ),
    }
}

/// Acknowledgement body for ingestion endpoints
#[derive(Debug, Serialize)]
pub struct IngestAck {
    pub status: &'static str,
}

impl IngestAck {
    pub fn recorded() -> Self {
        Self { status: "recorded" }
    }
}
