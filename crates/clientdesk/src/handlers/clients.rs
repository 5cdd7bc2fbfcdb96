//! client handlers: listing, creation, selection, deletion.

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use clientdesk_db::Database;
use clientdesk_types::{AccessLevel, Client, ClientId, Role};

use crate::AppState;
use crate::handlers::session_auth::CurrentUser;
use crate::handlers::{ApiError, OptionExt, ResultExt, selected_client, templates};
use crate::session::{self, FlashKind};

/// `GET /clients`
///
/// every authenticated user may open the listing; the rows are filtered to
/// what the user can actually view.
pub async fn list_clients(
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
    let can_create = state.engine.can_create(&current.user).is_allowed();

    let body = templates::clients_body(&visible, selected.as_ref(), can_create);
    Ok(Html(templates::page(
        "Clients",
        &current.user,
        selected.as_ref(),
        &flashes,
        &body,
    )))
}

/// client creation form body.
#[derive(Debug, Deserialize)]
pub struct CreateClientForm {
    /// client name.
    pub name: String,
    /// industry.
    pub industry: String,
    /// optional contact email.
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// `POST /clients`
pub async fn create_client(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Form(form): Form<CreateClientForm>,
) -> Result<Response, ApiError> {
    if let Some(denial) = state.engine.can_create(&current.user).denial() {
        session::flash(&http_session, FlashKind::Error, denial.to_string())
            .await
            .map_internal()?;
        return Ok(Redirect::to("/clients").into_response());
    }

    let name = form.name.trim();
    let industry = form.industry.trim();
    if name.is_empty() || industry.is_empty() {
        session::flash(
            &http_session,
            FlashKind::Error,
            "name and industry are required",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/clients").into_response());
    }

    let mut client = Client::new(
        ClientId(0),
        name.to_string(),
        industry.to_string(),
        current.user.id,
    );
    client.contact_email = form
        .contact_email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    let client = state.db.create_client(&client).await.map_internal()?;

    // managers hold no implicit access, so the creator gets an admin grant
    // on the new client; admins need none
    if current.user.role == Role::Manager {
        state
            .db
            .grant_access(current.user.id, client.id, AccessLevel::Admin)
            .await
            .map_internal()?;
    }

    info!(client = %client.id, by = %current.user.id, "client created");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("Client \"{}\" created.", client.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/clients").into_response())
}

/// client update form body. absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateClientForm {
    /// new name.
    #[serde(default)]
    pub name: Option<String>,
    /// new industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// new active flag.
    #[serde(default)]
    pub active: Option<bool>,
}

/// `POST /clients/{id}`
///
/// admins always; managers need a write or admin grant on this client.
pub async fn update_client(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
    Form(form): Form<UpdateClientForm>,
) -> Result<Response, ApiError> {
    let mut client = state
        .db
        .get_client(ClientId(id))
        .await
        .map_internal()?
        .or_not_found("client not found")?;

    if let Some(denial) = state
        .engine
        .can_update(&current.user, &client, &current.grants)
        .denial()
    {
        session::flash(&http_session, FlashKind::Error, denial.to_string())
            .await
            .map_internal()?;
        return Ok(Redirect::to("/clients").into_response());
    }

    if let Some(name) = form.name.as_deref().map(str::trim) {
        if name.is_empty() {
            session::flash(&http_session, FlashKind::Error, "name cannot be empty")
                .await
                .map_internal()?;
            return Ok(Redirect::to("/clients").into_response());
        }
        client.name = name.to_string();
    }
    if let Some(industry) = form.industry.as_deref().map(str::trim) {
        if industry.is_empty() {
            session::flash(&http_session, FlashKind::Error, "industry cannot be empty")
                .await
                .map_internal()?;
            return Ok(Redirect::to("/clients").into_response());
        }
        client.industry = industry.to_string();
    }
    if let Some(active) = form.active {
        client.active = active;
    }
    client.updated_by = Some(current.user.id);

    let client = state.db.update_client(&client).await.map_internal()?;

    info!(client = %client.id, by = %current.user.id, "client updated");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("Client \"{}\" updated.", client.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/clients").into_response())
}

/// `POST /clients/{id}/restore`
///
/// admin only: undo a soft delete. grants were dropped with the delete, so
/// non-admin access has to be granted again afterwards.
pub async fn restore_client(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let client = state
        .db
        .get_client_including_deleted(ClientId(id))
        .await
        .map_internal()?
        .or_not_found("client not found")?;

    if let Some(denial) = state.engine.can_restore(&current.user, &client).denial() {
        session::flash(&http_session, FlashKind::Error, denial.to_string())
            .await
            .map_internal()?;
        return Ok(Redirect::to("/clients").into_response());
    }

    state.db.restore_client(client.id).await.map_internal()?;

    info!(client = %client.id, by = %current.user.id, "client restored");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("Client \"{}\" restored.", client.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/clients").into_response())
}

/// `POST /clients/{id}/select`
///
/// a denial leaves any prior selection untouched and surfaces as a flash
/// message, not a hard failure.
pub async fn select_client(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let client = state
        .db
        .get_client(ClientId(id))
        .await
        .map_internal()?
        .or_not_found("client not found")?;

    let mut selection = session::selection(&http_session).await;

    match selection.select(&state.engine, &current.user, &client, &current.grants) {
        Ok(()) => {
            session::store_selection(&http_session, selection)
                .await
                .map_internal()?;
            session::flash(
                &http_session,
                FlashKind::Success,
                format!("Now working with \"{}\".", client.name),
            )
            .await
            .map_internal()?;
        }
        Err(denial) => {
            session::flash(&http_session, FlashKind::Error, denial.to_string())
                .await
                .map_internal()?;
        }
    }

    Ok(Redirect::to("/clients").into_response())
}

/// `POST /clients/clear`
pub async fn clear_selection(
    http_session: Session,
    _current: CurrentUser,
) -> Result<Response, ApiError> {
    let mut selection = session::selection(&http_session).await;
    selection.clear();
    session::store_selection(&http_session, selection)
        .await
        .map_internal()?;

    session::flash(&http_session, FlashKind::Success, "Client selection cleared.")
        .await
        .map_internal()?;

    Ok(Redirect::to("/clients").into_response())
}

/// `POST /clients/{id}/delete`
///
/// admin only. the deletion is soft; any session still pointing at the
/// client gets cleared by revalidation on its next request.
pub async fn delete_client(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let client = state
        .db
        .get_client(ClientId(id))
        .await
        .map_internal()?
        .or_not_found("client not found")?;

    if let Some(denial) = state.engine.can_delete(&current.user, &client).denial() {
        session::flash(&http_session, FlashKind::Error, denial.to_string())
            .await
            .map_internal()?;
        return Ok(Redirect::to("/clients").into_response());
    }

    state.db.delete_client(client.id).await.map_internal()?;

    info!(client = %client.id, by = %current.user.id, "client deleted");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("Client \"{}\" deleted.", client.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/clients").into_response())
}
