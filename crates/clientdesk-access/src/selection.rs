//! the session-scoped client selection state machine.
//!
//! a session can have at most one "currently selected client" that scopes
//! subsequent views. the selection stores only the client id - the client
//! row is re-fetched and the grant re-checked on every request, so a grant
//! revoked after selection clears the selection on the next request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clientdesk_types::{Client, ClientId, User};

use crate::engine::{AccessEngine, Denial, GrantSet};

/// why a selection was cleared during revalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClearReason {
    /// the selected client row no longer exists (or was soft-deleted).
    #[error("the selected client no longer exists and has been cleared")]
    ClientGone,

    /// the user's grant on the selected client was revoked.
    #[error("you no longer have access to the selected client, so the selection was cleared")]
    AccessRevoked,
}

/// outcome of [`Selection::revalidate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidation {
    /// nothing was selected; nothing to check.
    Unselected,
    /// the selection is still authorized for the current user.
    StillValid,
    /// the selection was cleared.
    Cleared(ClearReason),
}

/// the selection state for one session.
///
/// two states: unselected, or selected with a client id. all transitions
/// are pure; the http layer persists the state in the session and performs
/// the client fetch for revalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// no client selected.
    #[default]
    Unselected,
    /// a client is selected.
    Selected(ClientId),
}

impl Selection {
    /// the selected client id, if any.
    pub fn client_id(&self) -> Option<ClientId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(*id),
        }
    }

    /// whether a client is currently selected.
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }

    /// select a client for this session.
    ///
    /// requires [`AccessEngine::can_select`] to allow; on denial the prior
    /// state is left untouched and the denial is returned to the caller.
    pub fn select(
        &mut self,
        engine: &AccessEngine,
        user: &User,
        client: &Client,
        grants: &GrantSet,
    ) -> Result<(), Denial> {
        match engine.can_select(user, client, grants).denial() {
            None => {
                *self = Selection::Selected(client.id);
                Ok(())
            }
            Some(denial) => Err(denial),
        }
    }

    /// clear the selection. always succeeds, idempotent.
    pub fn clear(&mut self) {
        *self = Selection::Unselected;
    }

    /// re-check that the selection is still authorized for `user`.
    ///
    /// `fetched` is the freshly-loaded client row for the selected id
    /// (`None` when the row is gone). no-op when unselected, and
    /// side-effect free when the selection is still valid.
    pub fn revalidate(
        &mut self,
        engine: &AccessEngine,
        user: &User,
        fetched: Option<&Client>,
        grants: &GrantSet,
    ) -> Revalidation {
        if !self.is_selected() {
            return Revalidation::Unselected;
        }

        let Some(client) = fetched else {
            self.clear();
            return Revalidation::Cleared(ClearReason::ClientGone);
        };

        if engine.can_select(user, client, grants).is_allowed() {
            Revalidation::StillValid
        } else {
            self.clear();
            Revalidation::Cleared(ClearReason::AccessRevoked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientdesk_types::{AccessGrant, AccessLevel, Role, UserId};

    fn user(role: Role) -> User {
        User::new(
            UserId(1),
            "Test".to_string(),
            "test@example.com".to_string(),
            role,
        )
    }

    fn client(id: u64) -> Client {
        Client::new(
            ClientId(id),
            format!("Client {}", id),
            "Consulting".to_string(),
            UserId(99),
        )
    }

    fn read_grant(client_id: u64) -> GrantSet {
        GrantSet::from_grants([AccessGrant::new(
            UserId(1),
            ClientId(client_id),
            AccessLevel::Read,
        )])
    }

    #[test]
    fn test_select_with_grant() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let c = client(1);
        let mut selection = Selection::default();

        selection.select(&engine, &u, &c, &read_grant(1)).unwrap();
        assert_eq!(selection.client_id(), Some(ClientId(1)));
    }

    #[test]
    fn test_select_denied_leaves_state_unchanged() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let granted = client(1);
        let ungranted = client(2);
        let grants = read_grant(1);

        let mut selection = Selection::default();
        selection.select(&engine, &u, &granted, &grants).unwrap();

        let err = selection
            .select(&engine, &u, &ungranted, &grants)
            .unwrap_err();
        assert_eq!(err, Denial::NoClientAccess);
        // prior selection survives the denied attempt
        assert_eq!(selection.client_id(), Some(ClientId(1)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let c = client(1);

        let mut selection = Selection::default();
        selection.select(&engine, &u, &c, &read_grant(1)).unwrap();

        selection.clear();
        assert_eq!(selection, Selection::Unselected);
        selection.clear();
        assert_eq!(selection, Selection::Unselected);
    }

    #[test]
    fn test_revalidate_noop_when_unselected() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let mut selection = Selection::default();

        let outcome = selection.revalidate(&engine, &u, None, &GrantSet::empty());
        assert_eq!(outcome, Revalidation::Unselected);
        assert_eq!(selection, Selection::Unselected);
    }

    #[test]
    fn test_revalidate_still_valid() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let c = client(1);
        let grants = read_grant(1);

        let mut selection = Selection::default();
        selection.select(&engine, &u, &c, &grants).unwrap();

        let outcome = selection.revalidate(&engine, &u, Some(&c), &grants);
        assert_eq!(outcome, Revalidation::StillValid);
        assert_eq!(selection.client_id(), Some(ClientId(1)));

        // idempotent: running it again changes nothing
        let outcome = selection.revalidate(&engine, &u, Some(&c), &grants);
        assert_eq!(outcome, Revalidation::StillValid);
    }

    #[test]
    fn test_revalidate_clears_when_client_gone() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let c = client(1);
        let grants = read_grant(1);

        let mut selection = Selection::default();
        selection.select(&engine, &u, &c, &grants).unwrap();

        let outcome = selection.revalidate(&engine, &u, None, &grants);
        assert_eq!(outcome, Revalidation::Cleared(ClearReason::ClientGone));
        assert_eq!(selection, Selection::Unselected);
    }

    #[test]
    fn test_revalidate_clears_when_access_revoked() {
        let engine = AccessEngine::new();
        let u = user(Role::User);
        let c = client(1);

        let mut selection = Selection::default();
        selection.select(&engine, &u, &c, &read_grant(1)).unwrap();

        // the only grant for the pair is revoked between requests
        let outcome = selection.revalidate(&engine, &u, Some(&c), &GrantSet::empty());
        assert_eq!(outcome, Revalidation::Cleared(ClearReason::AccessRevoked));
        assert_eq!(selection, Selection::Unselected);
    }

    #[test]
    fn test_revalidate_admin_survives_grant_revocation() {
        let engine = AccessEngine::new();
        let admin = user(Role::Admin);
        let c = client(1);

        let mut selection = Selection::default();
        selection
            .select(&engine, &admin, &c, &GrantSet::empty())
            .unwrap();

        let outcome = selection.revalidate(&engine, &admin, Some(&c), &GrantSet::empty());
        assert_eq!(outcome, Revalidation::StillValid);
    }

    #[test]
    fn test_clear_reason_messages_are_distinct() {
        assert_ne!(
            ClearReason::ClientGone.to_string(),
            ClearReason::AccessRevoked.to_string()
        );
    }
}
