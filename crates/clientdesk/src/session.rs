//! session state helpers.
//!
//! the session stores three things, all scalar:
//! - [`USER_ID_KEY`]: the authenticated user's id
//! - [`SELECTED_CLIENT_KEY`]: the currently selected client's id
//! - a list of pending flash messages
//!
//! entity snapshots are never cached in the session; every request
//! re-fetches rows and re-checks grants before trusting them.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use clientdesk_access::Selection;
use clientdesk_types::{ClientId, UserId};

/// session key holding the authenticated user's id.
pub const USER_ID_KEY: &str = "user_id";

/// session key holding the selected client's id.
pub const SELECTED_CLIENT_KEY: &str = "selected_client_id";

const FLASH_KEY: &str = "flash";

/// severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    /// action completed.
    Success,
    /// non-fatal notice, e.g. a cleared selection.
    Warning,
    /// action was denied or failed.
    Error,
}

/// a one-shot message displayed on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    /// severity.
    pub kind: FlashKind,
    /// user-facing text.
    pub message: String,
}

/// the authenticated user's id, if any.
pub async fn user_id(session: &Session) -> Option<UserId> {
    session
        .get::<u64>(USER_ID_KEY)
        .await
        .ok()
        .flatten()
        .map(UserId)
}

/// record a successful login. cycles the session id first.
pub async fn log_in(session: &Session, id: UserId) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, id.0).await
}

/// destroy the session, dropping the login and any selection with it.
pub async fn log_out(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

/// the current selection as stored in the session.
pub async fn selection(session: &Session) -> Selection {
    match session.get::<u64>(SELECTED_CLIENT_KEY).await {
        Ok(Some(id)) => Selection::Selected(ClientId(id)),
        _ => Selection::Unselected,
    }
}

/// persist a selection state back to the session.
pub async fn store_selection(
    session: &Session,
    selection: Selection,
) -> Result<(), tower_sessions::session::Error> {
    match selection.client_id() {
        Some(id) => session.insert(SELECTED_CLIENT_KEY, id.0).await,
        None => {
            session.remove::<u64>(SELECTED_CLIENT_KEY).await?;
            Ok(())
        }
    }
}

/// queue a flash message for the next rendered page.
pub async fn flash(
    session: &Session,
    kind: FlashKind,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut pending: Vec<Flash> = session.get(FLASH_KEY).await?.unwrap_or_default();
    pending.push(Flash {
        kind,
        message: message.into(),
    });
    session.insert(FLASH_KEY, pending).await
}

/// take all pending flash messages, leaving none behind.
pub async fn take_flashes(session: &Session) -> Vec<Flash> {
    session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
