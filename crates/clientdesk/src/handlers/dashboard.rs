//! dashboard handler.

use axum::{extract::State, response::Html};
use tower_sessions::Session;

use crate::AppState;
use crate::handlers::session_auth::CurrentUser;
use crate::handlers::{ApiError, selected_client, templates};
use crate::session;

/// `GET /dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
) -> Result<Html<String>, ApiError> {
    let selected = selected_client(&state, &http_session).await?;
    let flashes = session::take_flashes(&http_session).await;

    let body = templates::dashboard_body(&current.user, selected.as_ref());
    Ok(Html(templates::page(
        "Dashboard",
        &current.user,
        selected.as_ref(),
        &flashes,
        &body,
    )))
}
