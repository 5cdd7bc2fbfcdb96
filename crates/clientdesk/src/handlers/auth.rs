//! login and logout handlers.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use clientdesk_db::Database;

use crate::AppState;
use crate::handlers::session_auth::MaybeUser;
use crate::handlers::{ApiError, ResultExt, templates};
use crate::{auth, session};

/// root redirect: dashboard for logged-in users, login for guests.
pub async fn root(MaybeUser(user): MaybeUser) -> Redirect {
    match user {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

/// `GET /login`
pub async fn login_form(MaybeUser(user): MaybeUser) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(templates::login_page(None, "")).into_response()
}

/// login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// login email.
    pub email: String,
    /// plaintext password.
    pub password: String,
}

/// `POST /login`
///
/// failure renders the form again with a generic message - the same one for
/// an unknown email and a wrong password.
pub async fn login(
    State(state): State<AppState>,
    http_session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Ok(Html(templates::login_page(
            Some("email and password are required"),
            email,
        ))
        .into_response());
    }

    let user = state.db.get_user_by_email(email).await.map_internal()?;

    let verified = user
        .as_ref()
        .is_some_and(|u| auth::verify_password(&form.password, &u.password_hash));

    let Some(user) = user.filter(|_| verified) else {
        return Ok(Html(templates::login_page(
            Some("invalid email or password"),
            email,
        ))
        .into_response());
    };

    session::log_in(&http_session, user.id)
        .await
        .map_internal()?;

    info!(user = %user.id, "user logged in");
    Ok(Redirect::to("/dashboard").into_response())
}

/// `POST /logout`
///
/// destroys the session, which also drops any client selection.
pub async fn logout(http_session: Session) -> Result<Redirect, ApiError> {
    session::log_out(&http_session).await.map_internal()?;
    Ok(Redirect::to("/login"))
}
