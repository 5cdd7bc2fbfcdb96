//! health check endpoint.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use clientdesk_db::Database;

use crate::AppState;

/// `GET /healthz`
///
/// pings the database and reports pass/fail in the health+json format.
pub async fn health(State(state): State<AppState>) -> Response {
    let (status, body) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, json!({ "status": "pass" })),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "fail", "output": e.to_string() }),
        ),
    };

    (
        status,
        [(header::CONTENT_TYPE, "application/health+json")],
        body.to_string(),
    )
        .into_response()
}
