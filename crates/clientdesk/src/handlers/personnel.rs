//! personnel handlers: listing and creation, scoped by the selected client.

use std::collections::HashMap;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use clientdesk_db::Database;
use clientdesk_types::{ClientId, Personnel, PersonnelId};

use crate::AppState;
use crate::handlers::session_auth::CurrentUser;
use crate::handlers::{ApiError, ResultExt, selected_client, templates};
use crate::session::{self, FlashKind};

/// `GET /personnel`
///
/// with a selected client the list is scoped to it; otherwise it shows
/// personnel across every client the user can view.
pub async fn list_personnel(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
) -> Result<Html<String>, ApiError> {
    let all_clients = state.db.list_clients().await.map_internal()?;
    let visible = state
        .engine
        .visible_clients(&current.user, &all_clients, &current.grants);
    let names: HashMap<ClientId, String> =
        visible.iter().map(|c| (c.id, c.name.clone())).collect();

    // the middleware has already revalidated the selection this request
    let selected = selected_client(&state, &http_session).await?;

    let records = match &selected {
        Some(client) => state
            .db
            .list_personnel_for_client(client.id)
            .await
            .map_internal()?,
        None => {
            let all = state.db.list_personnel().await.map_internal()?;
            all.into_iter()
                .filter(|p| names.contains_key(&p.client_id))
                .collect()
        }
    };

    let rows: Vec<(Personnel, String)> = records
        .into_iter()
        .map(|p| {
            let client_name = names
                .get(&p.client_id)
                .cloned()
                .unwrap_or_else(|| format!("client {}", p.client_id));
            (p, client_name)
        })
        .collect();

    let flashes = session::take_flashes(&http_session).await;
    let body = templates::personnel_body(&rows, selected.as_ref());
    Ok(Html(templates::page(
        "Personnel",
        &current.user,
        selected.as_ref(),
        &flashes,
        &body,
    )))
}

/// `GET /personnel/create`
pub async fn create_personnel_form(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
) -> Result<Html<String>, ApiError> {
    let all_clients = state.db.list_clients().await.map_internal()?;
    let visible = state
        .engine
        .visible_clients(&current.user, &all_clients, &current.grants);

    let selected = selected_client(&state, &http_session).await?;
    let flashes = session::take_flashes(&http_session).await;

    let body = templates::personnel_create_body(&visible);
    Ok(Html(templates::page(
        "Add personnel",
        &current.user,
        selected.as_ref(),
        &flashes,
        &body,
    )))
}

/// personnel creation form body.
#[derive(Debug, Deserialize)]
pub struct CreatePersonnelForm {
    /// the client the person belongs to.
    pub client_id: u64,
    /// first name.
    pub first_name: String,
    /// last name.
    pub last_name: String,
    /// optional email.
    #[serde(default)]
    pub email: Option<String>,
    /// optional phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// optional position.
    #[serde(default)]
    pub position: Option<String>,
    /// optional department.
    #[serde(default)]
    pub department: Option<String>,
    /// optional hire date (YYYY-MM-DD).
    #[serde(default)]
    pub hire_date: Option<String>,
}

/// `POST /personnel`
pub async fn create_personnel(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Form(form): Form<CreatePersonnelForm>,
) -> Result<Response, ApiError> {
    let first_name = form.first_name.trim().to_string();
    let last_name = form.last_name.trim().to_string();
    if first_name.is_empty() || last_name.is_empty() {
        return validation_failure(&http_session, "first and last name are required").await;
    }

    // the target client must exist and be visible to the actor; an
    // ungranted id gets the same message as a bogus one
    let client = state
        .db
        .get_client(ClientId(form.client_id))
        .await
        .map_internal()?;
    let visible = client.as_ref().is_some_and(|c| {
        state
            .engine
            .can_view(&current.user, c, &current.grants)
            .is_allowed()
    });
    if !visible {
        return validation_failure(&http_session, "invalid client selection").await;
    }

    let hire_date = match form.hire_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                return validation_failure(&http_session, "hire date must be YYYY-MM-DD").await;
            }
        },
    };

    let mut person = Personnel::new(
        PersonnelId(0),
        ClientId(form.client_id),
        first_name,
        last_name,
        current.user.id,
    );
    person.email = non_empty(form.email);
    person.phone_number = non_empty(form.phone_number);
    person.position = non_empty(form.position);
    person.department = non_empty(form.department);
    person.hire_date = hire_date;

    let person = state.db.create_personnel(&person).await.map_internal()?;

    info!(personnel = %person.id, client = %person.client_id, by = %current.user.id, "personnel created");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("Personnel record for {} created.", person.full_name()),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/personnel").into_response())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

async fn validation_failure(
    http_session: &Session,
    message: &'static str,
) -> Result<Response, ApiError> {
    session::flash(http_session, FlashKind::Error, message)
        .await
        .map_internal()?;
    Ok(Redirect::to("/personnel/create").into_response())
}
