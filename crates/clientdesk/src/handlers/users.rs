//! user management handlers: listing, creation, grant assignment.

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use clientdesk_db::Database;
use clientdesk_types::{AccessLevel, ClientId, Role, User, UserId};

use crate::AppState;
use crate::handlers::session_auth::CurrentUser;
use crate::handlers::{ApiError, OptionExt, ResultExt, selected_client, templates};
use crate::session::{self, FlashKind};
use crate::auth;

/// whether the actor may manage users at all.
fn can_manage_users(user: &User) -> bool {
    match user.role {
        Role::Admin | Role::Manager => true,
        Role::User => false,
    }
}

/// roles the actor is allowed to hand out.
///
/// managers cannot mint admins - roles are never escalated past the
/// actor's own standing.
fn assignable_roles(actor: &User) -> Vec<Role> {
    match actor.role {
        Role::Admin => vec![Role::Admin, Role::Manager, Role::User],
        Role::Manager => vec![Role::Manager, Role::User],
        Role::User => vec![],
    }
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
) -> Result<Html<String>, ApiError> {
    let users = state.db.list_users().await.map_internal()?;
    let selected = selected_client(&state, &http_session).await?;
    let flashes = session::take_flashes(&http_session).await;

    let body = templates::users_body(&users, can_manage_users(&current.user));
    Ok(Html(templates::page(
        "Users",
        &current.user,
        selected.as_ref(),
        &flashes,
        &body,
    )))
}

/// `GET /users/create`
pub async fn create_user_form(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
) -> Result<Response, ApiError> {
    if !can_manage_users(&current.user) {
        session::flash(
            &http_session,
            FlashKind::Error,
            "only administrators and managers can create users",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/users").into_response());
    }

    let all_clients = state.db.list_clients().await.map_internal()?;
    let assignable = state
        .engine
        .visible_clients(&current.user, &all_clients, &current.grants);

    let selected = selected_client(&state, &http_session).await?;
    let flashes = session::take_flashes(&http_session).await;

    let body = templates::user_create_body(&assignable, &assignable_roles(&current.user));
    Ok(Html(templates::page(
        "Create user",
        &current.user,
        selected.as_ref(),
        &flashes,
        &body,
    ))
    .into_response())
}

/// user creation form body.
#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    /// display name.
    pub name: String,
    /// login email.
    pub email: String,
    /// plaintext password.
    pub password: String,
    /// requested role.
    pub role: String,
    /// optional initial client assignment.
    #[serde(default)]
    pub client_id: Option<String>,
    /// access level for the initial assignment.
    #[serde(default)]
    pub access_level: Option<String>,
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Form(form): Form<CreateUserForm>,
) -> Result<Response, ApiError> {
    if !can_manage_users(&current.user) {
        session::flash(
            &http_session,
            FlashKind::Error,
            "only administrators and managers can create users",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/users").into_response());
    }

    // field validation; failures flash and re-render the form page
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() {
        return validation_failure(&http_session, "name and email are required").await;
    }
    if form.password.len() < 8 {
        return validation_failure(&http_session, "password must be at least 8 characters").await;
    }

    let Ok(role) = form.role.parse::<Role>() else {
        return validation_failure(&http_session, "unknown role").await;
    };
    if !assignable_roles(&current.user).contains(&role) {
        return validation_failure(&http_session, "you cannot assign that role").await;
    }

    if state
        .db
        .get_user_by_email(&email)
        .await
        .map_internal()?
        .is_some()
    {
        return validation_failure(&http_session, "a user with that email already exists").await;
    }

    // optional initial client assignment
    let assignment = match parse_assignment(&form) {
        Ok(assignment) => assignment,
        Err(msg) => return validation_failure(&http_session, msg).await,
    };

    if let Some((client_id, _)) = assignment {
        let client = state
            .db
            .get_client(client_id)
            .await
            .map_internal()?
            .or_not_found("client not found")?;

        // the actor can only hand out access to clients they can see
        if !state
            .engine
            .can_view(&current.user, &client, &current.grants)
            .is_allowed()
        {
            return validation_failure(&http_session, "invalid client selection").await;
        }
    }

    let mut user = User::new(UserId(0), name, email, role);
    user.password_hash = auth::hash_password(&form.password).map_internal()?;
    let user = state.db.create_user(&user).await.map_internal()?;

    if let Some((client_id, level)) = assignment {
        state
            .db
            .grant_access(user.id, client_id, level)
            .await
            .map_internal()?;
    }

    info!(user = %user.id, role = %user.role, by = %current.user.id, "user created");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("User \"{}\" created.", user.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/users").into_response())
}

/// grant assignment form body.
#[derive(Debug, Deserialize)]
pub struct GrantForm {
    /// target client.
    pub client_id: u64,
    /// level to grant.
    pub access_level: String,
}

/// `POST /users/{id}/grants`
///
/// admin only: grant (or re-grant at a new level) a user access to a client.
pub async fn assign_grant(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
    Form(form): Form<GrantForm>,
) -> Result<Response, ApiError> {
    if current.user.role != Role::Admin {
        session::flash(
            &http_session,
            FlashKind::Error,
            "only administrators can manage access grants",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/users").into_response());
    }

    let target = state
        .db
        .get_user(UserId(id))
        .await
        .map_internal()?
        .or_not_found("user not found")?;
    let client = state
        .db
        .get_client(ClientId(form.client_id))
        .await
        .map_internal()?
        .or_not_found("client not found")?;

    let Ok(level) = form.access_level.parse::<AccessLevel>() else {
        return validation_failure(&http_session, "unknown access level").await;
    };

    state
        .db
        .grant_access(target.id, client.id, level)
        .await
        .map_internal()?;

    info!(user = %target.id, client = %client.id, %level, by = %current.user.id, "access granted");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!(
            "Granted {} access on \"{}\" to {}.",
            level, client.name, target.name
        ),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/users").into_response())
}

/// grant revocation form body.
#[derive(Debug, Deserialize)]
pub struct RevokeForm {
    /// target client.
    pub client_id: u64,
}

/// `POST /users/{id}/grants/revoke`
///
/// admin only. any session of the target user still pointing at the client
/// gets cleared by revalidation on its next request.
pub async fn revoke_grant(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
    Form(form): Form<RevokeForm>,
) -> Result<Response, ApiError> {
    if current.user.role != Role::Admin {
        session::flash(
            &http_session,
            FlashKind::Error,
            "only administrators can manage access grants",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/users").into_response());
    }

    let target = state
        .db
        .get_user(UserId(id))
        .await
        .map_internal()?
        .or_not_found("user not found")?;

    state
        .db
        .revoke_access(target.id, ClientId(form.client_id))
        .await
        .map_internal()?;

    info!(user = %target.id, client = form.client_id, by = %current.user.id, "access revoked");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("Revoked access for {}.", target.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/users").into_response())
}

/// `POST /users/{id}/delete`
pub async fn delete_user(
    State(state): State<AppState>,
    http_session: Session,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    if current.user.role != Role::Admin {
        session::flash(
            &http_session,
            FlashKind::Error,
            "only administrators can delete users",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/users").into_response());
    }

    if UserId(id) == current.user.id {
        session::flash(
            &http_session,
            FlashKind::Error,
            "you cannot delete your own account",
        )
        .await
        .map_internal()?;
        return Ok(Redirect::to("/users").into_response());
    }

    let target = state
        .db
        .get_user(UserId(id))
        .await
        .map_internal()?
        .or_not_found("user not found")?;

    state.db.delete_user(target.id).await.map_internal()?;

    info!(user = %target.id, by = %current.user.id, "user deleted");
    session::flash(
        &http_session,
        FlashKind::Success,
        format!("User \"{}\" deleted.", target.name),
    )
    .await
    .map_internal()?;

    Ok(Redirect::to("/users").into_response())
}

/// parse the optional (client, level) assignment out of the form.
///
/// an error is a user-facing validation message.
fn parse_assignment(
    form: &CreateUserForm,
) -> Result<Option<(ClientId, AccessLevel)>, &'static str> {
    let client_id = form
        .client_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let Some(raw_id) = client_id else {
        return Ok(None);
    };

    let Ok(id) = raw_id.parse::<u64>() else {
        return Err("invalid client selection");
    };

    let level = match form.access_level.as_deref() {
        None | Some("") => AccessLevel::Read,
        Some(raw) => raw.parse().map_err(|_| "unknown access level")?,
    };

    Ok(Some((ClientId(id), level)))
}

async fn validation_failure(
    http_session: &Session,
    message: &'static str,
) -> Result<Response, ApiError> {
    session::flash(http_session, FlashKind::Error, message)
        .await
        .map_internal()?;
    Ok(Redirect::to("/users/create").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> User {
        User::new(
            UserId(1),
            "Actor".to_string(),
            "actor@example.com".to_string(),
            role,
        )
    }

    #[test]
    fn test_assignable_roles() {
        assert_eq!(
            assignable_roles(&actor(Role::Admin)),
            vec![Role::Admin, Role::Manager, Role::User]
        );
        assert_eq!(
            assignable_roles(&actor(Role::Manager)),
            vec![Role::Manager, Role::User]
        );
        assert!(assignable_roles(&actor(Role::User)).is_empty());
    }

    fn form_with_assignment(client_id: Option<&str>, level: Option<&str>) -> CreateUserForm {
        CreateUserForm {
            name: "n".to_string(),
            email: "e".to_string(),
            password: "p".to_string(),
            role: "user".to_string(),
            client_id: client_id.map(str::to_string),
            access_level: level.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_assignment_defaults_to_read() {
        let form = form_with_assignment(Some("3"), None);
        let parsed = parse_assignment(&form).unwrap();
        assert_eq!(parsed, Some((ClientId(3), AccessLevel::Read)));
    }

    #[test]
    fn test_parse_assignment_empty_is_none() {
        let form = form_with_assignment(Some(""), None);
        assert_eq!(parse_assignment(&form).unwrap(), None);
    }

    #[test]
    fn test_parse_assignment_bad_level() {
        let form = form_with_assignment(Some("3"), Some("owner"));
        assert!(parse_assignment(&form).is_err());
    }

    #[test]
    fn test_parse_assignment_bad_id() {
        let form = form_with_assignment(Some("not-a-number"), None);
        assert!(parse_assignment(&form).is_err());
    }
}
