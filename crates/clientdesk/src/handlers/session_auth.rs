//! session-based authentication for request handlers.
//!
//! handlers take a [`CurrentUser`] argument to require an authenticated
//! session. the extractor loads the user row and their access grants once
//! per handler invocation, so decision logic downstream works on explicit
//! data instead of ambient session lookups.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use clientdesk_access::GrantSet;
use clientdesk_db::Database;
use clientdesk_types::User;

use crate::AppState;
use crate::session;

/// context for an authenticated request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// the authenticated user.
    pub user: User,
    /// the user's access grants, loaded fresh for this request.
    pub grants: GrantSet,
}

/// rejection for unauthenticated requests: redirect to the login page.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRedirect)?;

        let user_id = session::user_id(&session).await.ok_or(AuthRedirect)?;

        // a deleted user's session is no longer valid
        let user = state
            .db
            .get_user(user_id)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRedirect)?;

        let grants = state
            .db
            .grants_for(user.id)
            .await
            .map(GrantSet::from_grants)
            .unwrap_or_default();

        Ok(CurrentUser { user, grants })
    }
}

/// optional authentication: `None` for guests.
///
/// used by routes that behave differently for logged-in users (the root
/// redirect, the login form) instead of rejecting guests outright.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await else {
            return Ok(MaybeUser(None));
        };

        let Some(user_id) = session::user_id(&session).await else {
            return Ok(MaybeUser(None));
        };

        let user = state.db.get_user(user_id).await.ok().flatten();
        Ok(MaybeUser(user))
    }
}
