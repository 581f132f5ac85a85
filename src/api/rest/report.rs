//! Query endpoints

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::engine::AnalyticsEngine;
use crate::types::{ExportData, Report};

use super::{error_response, ApiResult};

/// GET /api/analytics - full report
pub async fn get_report(State(engine): State<Arc<AnalyticsEngine>>) -> ApiResult<Report> {
    let report = engine.build_report().map_err(error_response)?;
    Ok(Json(report))
}

/// GET /api/analytics/export - event log and metrics dump
pub async fn get_export(State(engine): State<Arc<AnalyticsEngine>>) -> Json<ExportData> {
    Json(engine.export_data())
}
