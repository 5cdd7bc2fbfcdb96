//! client-access authorization for clientdesk.
//!
//! this crate implements the per-client access model: a user's global role
//! combined with per-(user, client) access grants decides what the user may
//! see and change. decisions use deny-by-default semantics - for a non-admin,
//! no grant means no access.
//!
//! two pieces:
//! - [`engine`]: pure decision logic ([`AccessEngine`]) over a loaded
//!   [`GrantSet`]
//! - [`selection`]: the session-scoped "currently selected client" state
//!   machine, revalidated against the engine on every request

#![warn(missing_docs)]

pub mod engine;
pub mod selection;

pub use engine::{AccessEngine, Decision, Denial, GrantSet};
pub use selection::{ClearReason, Revalidation, Selection};
