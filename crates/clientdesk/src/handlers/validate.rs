//! per-request revalidation of the selected client.
//!
//! runs before handlers on every request. if the session carries a selected
//! client, the client row is re-fetched and the user's grant re-checked; a
//! selection that is no longer authorized is cleared and a warning is
//! flashed for the next rendered page. this step never blocks or fails the
//! request - store errors leave the selection untouched and the request
//! continues.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;
use tracing::{debug, warn};

use clientdesk_access::{GrantSet, Revalidation};
use clientdesk_db::Database;

use crate::AppState;
use crate::session::{self, FlashKind};

/// middleware: revalidate the session's selected client.
pub async fn validate_selected_client(
    State(state): State<AppState>,
    http_session: Session,
    request: Request,
    next: Next,
) -> Response {
    // only validate when a user is logged in and a client is selected
    if let Some(user_id) = session::user_id(&http_session).await {
        let mut selection = session::selection(&http_session).await;

        if let Some(client_id) = selection.client_id() {
            match state.db.get_user(user_id).await {
                Ok(Some(user)) => {
                    let fetched = state.db.get_client(client_id).await.ok().flatten();

                    match state.db.grants_for(user.id).await {
                        Ok(grants) => {
                            let grants = GrantSet::from_grants(grants);
                            let outcome = selection.revalidate(
                                &state.engine,
                                &user,
                                fetched.as_ref(),
                                &grants,
                            );

                            if let Revalidation::Cleared(reason) = outcome {
                                debug!(
                                    user = %user.id,
                                    client = %client_id,
                                    %reason,
                                    "clearing stale client selection"
                                );
                                let _ = session::store_selection(&http_session, selection).await;
                                let _ = session::flash(
                                    &http_session,
                                    FlashKind::Warning,
                                    reason.to_string(),
                                )
                                .await;
                            }
                        }
                        Err(e) => {
                            // cannot tell whether the grant still exists;
                            // leave the selection for the next request
                            warn!(error = %e, "grant lookup failed during selection revalidation");
                        }
                    }
                }
                Ok(None) => {
                    // user row is gone; the auth extractor will reject the
                    // request, nothing to revalidate here
                }
                Err(e) => {
                    warn!(error = %e, "user lookup failed during selection revalidation");
                }
            }
        }
    }

    next.run(request).await
}
