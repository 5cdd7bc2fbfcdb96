//! http handlers for the clientdesk web interface.

mod auth;
mod clients;
mod dashboard;
mod error;
mod health;
mod personnel;
mod session_auth;
pub mod templates;
mod users;
mod validate;

pub use auth::{login, login_form, logout, root};
pub use clients::{
    clear_selection, create_client, delete_client, list_clients, restore_client, select_client,
    update_client,
};
pub use dashboard::dashboard;
pub use error::{ApiError, OptionExt, ResultExt};
pub use health::health;
pub use personnel::{create_personnel, create_personnel_form, list_personnel};
pub use session_auth::{CurrentUser, MaybeUser};
pub use users::{assign_grant, create_user, create_user_form, delete_user, list_users, revoke_grant};
pub use validate::validate_selected_client;

use tower_sessions::Session;

use clientdesk_db::Database;
use clientdesk_types::Client;

use crate::AppState;
use crate::session;

/// fetch the selected client row for page chrome.
///
/// the validation middleware has already revalidated the selection this
/// request, so a stored id either resolves or was just cleared; a row that
/// vanishes in between simply renders as no selection.
pub(crate) async fn selected_client(
    state: &AppState,
    http_session: &Session,
) -> Result<Option<Client>, ApiError> {
    match session::selection(http_session).await.client_id() {
        Some(id) => state.db.get_client(id).await.map_internal(),
        None => Ok(None),
    }
}
