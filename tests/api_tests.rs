//! HTTP API integration tests
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot`, the
//! same way a browser instrumentation client would hit the endpoints.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use pulse_analytics::api::http::create_router;
use pulse_analytics::AnalyticsEngine;

fn test_app() -> Router {
    create_router(Arc::new(AnalyticsEngine::new()))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_pageview_then_report() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/analytics/pageview",
        json!({ "page": "/home", "userId": "u1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "recorded");

    post_json(
        &app,
        "/api/analytics/pageview",
        json!({ "page": "/home", "userId": "u2" }),
    )
    .await;
    post_json(
        &app,
        "/api/analytics/payment",
        json!({ "amount": 50.0, "success": true, "userId": "u1" }),
    )
    .await;

    let (status, report) = get_json(&app, "/api/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["overview"]["totalPageViews"], 2);
    assert_eq!(report["overview"]["uniqueUsers"], 2);
    assert_eq!(report["overview"]["activeUsers"], 2);
    assert_eq!(report["overview"]["totalRevenue"], 50.0);
    assert_eq!(report["overview"]["conversionRate"], 50.0);
    assert_eq!(report["recentEvents"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_track_event_is_log_only() {
    let app = test_app();

    let (status, _) = post_json(
        &app,
        "/api/analytics/track",
        json!({
            "event": "time_on_page",
            "data": { "seconds": 30, "sessionId": "client_session_1" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, report) = get_json(&app, "/api/analytics").await;
    assert_eq!(report["overview"]["totalPageViews"], 0);
    let events = report["recentEvents"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["kind"], "generic");
    assert_eq!(events[0]["payload"]["data"]["sessionId"], "client_session_1");
}

#[tokio::test]
async fn test_subscription_endpoint() {
    let app = test_app();

    let (status, _) = post_json(
        &app,
        "/api/analytics/subscription",
        json!({ "planId": "pro", "userId": "u1", "amount": 9.99 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, report) = get_json(&app, "/api/analytics").await;
    assert_eq!(report["overview"]["subscriptions"], 1);
    assert_eq!(report["overview"]["totalRevenue"], 9.99);
    // Subscriptions never show up in the per-day revenue view
    assert!(report["revenueByDay"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_interaction_endpoint() {
    let app = test_app();

    for _ in 0..2 {
        post_json(
            &app,
            "/api/analytics/product",
            json!({ "productId": "p1", "action": "views" }),
        )
        .await;
    }
    post_json(
        &app,
        "/api/analytics/product",
        json!({ "productId": "p1", "action": "cartAdds", "userId": "u1" }),
    )
    .await;

    let (_, report) = get_json(&app, "/api/analytics").await;
    assert_eq!(report["popularProducts"]["p1"]["views"], 2);
    assert_eq!(report["popularProducts"]["p1"]["cartAdds"], 1);
    assert_eq!(report["popularProducts"]["p1"]["purchases"], 0);
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/analytics/product",
        json!({ "productId": "p1", "action": "wishlist" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["field"], "action");

    // The rejected call created no counter key and no event
    let (_, report) = get_json(&app, "/api/analytics").await;
    assert!(report["popularProducts"].as_object().unwrap().is_empty());
    assert!(report["recentEvents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_negative_amount_is_rejected() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/analytics/payment",
        json!({ "amount": -10.0, "success": true }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "amount");
}

#[tokio::test]
async fn test_export_endpoint() {
    let app = test_app();

    post_json(
        &app,
        "/api/analytics/pageview",
        json!({ "page": "/home", "userId": "u1" }),
    )
    .await;
    post_json(
        &app,
        "/api/analytics/payment",
        json!({ "amount": 20.0, "success": false, "userId": "u2" }),
    )
    .await;

    let (status, export) = get_json(&app, "/api/analytics/export").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(export["events"].as_array().unwrap().len(), 2);
    assert_eq!(export["metrics"]["pageViews"], 1);
    assert_eq!(export["metrics"]["failedPayments"], 1);
    assert_eq!(export["metrics"]["uniqueUsers"], json!(["u1", "u2"]));
    assert_eq!(export["metrics"]["activeUsers"], json!(["u1"]));
}

#[tokio::test]
async fn test_report_on_fresh_engine() {
    let app = test_app();

    let (status, report) = get_json(&app, "/api/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["overview"]["totalPageViews"], 0);
    assert_eq!(report["overview"]["conversionRate"], 0.0);
    assert!(report["userGrowth"].as_object().unwrap().is_empty());
}
