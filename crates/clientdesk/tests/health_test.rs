//! integration tests for the `/healthz` endpoint.

mod common;

use axum::http::StatusCode;
use serde::Deserialize;

use common::{TestApp, body_string};

/// response from the `/healthz` endpoint.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[tokio::test]
async fn test_health_endpoint_returns_pass() {
    let app = TestApp::new().await;

    let response = app.get("/healthz", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .expect("should have content-type header")
        .to_str()
        .expect("content-type should be valid string");
    assert!(
        content_type.contains("application/health+json"),
        "content-type should be application/health+json, got: {}",
        content_type
    );

    let body = body_string(response).await;
    let health: HealthResponse = serde_json::from_str(&body).expect("body should be json");
    assert_eq!(health.status, "pass");
}

#[tokio::test]
async fn test_health_endpoint_needs_no_auth() {
    let app = TestApp::new().await;

    // no cookie at all
    let response = app.get("/healthz", "").await;
    assert_eq!(response.status(), StatusCode::OK);
}
