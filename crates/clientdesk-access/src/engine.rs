//! the access decision engine.

use std::collections::HashMap;

use thiserror::Error;

use clientdesk_types::{AccessGrant, AccessLevel, Client, ClientId, Role, User};

/// reasons a decision can deny.
///
/// a denial is a normal outcome, not an error: callers surface it as a
/// flash message or filter the item out of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    /// the user holds no grant for the client.
    #[error("you do not have permission to access this client")]
    NoClientAccess,

    /// the user's role may not create clients.
    #[error("only administrators and managers can create clients")]
    CannotCreate,

    /// the user's grant level is too low to modify the client.
    #[error("you do not have write access to this client")]
    InsufficientAccessLevel,

    /// the action is reserved for administrators.
    #[error("only administrators can perform this action")]
    AdminOnly,
}

/// outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// the action is permitted.
    Allow,
    /// the action is denied, with a user-facing reason.
    Deny(Denial),
}

impl Decision {
    /// whether the decision permits the action.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// the denial reason, if denied.
    pub fn denial(&self) -> Option<Denial> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

/// a user's access grants, loaded once per request.
///
/// callers fetch the grant rows from the store and hand the engine this
/// in-memory view, so decision methods stay synchronous and side-effect
/// free. at most one level per client (the store enforces uniqueness).
#[derive(Debug, Clone, Default)]
pub struct GrantSet {
    levels: HashMap<ClientId, AccessLevel>,
}

impl GrantSet {
    /// an empty grant set (no access to anything for a non-admin).
    pub fn empty() -> Self {
        Self::default()
    }

    /// build a grant set from persisted grants.
    pub fn from_grants(grants: impl IntoIterator<Item = AccessGrant>) -> Self {
        Self {
            levels: grants
                .into_iter()
                .map(|g| (g.client_id, g.access_level))
                .collect(),
        }
    }

    /// whether any grant exists for the client.
    pub fn has(&self, client_id: ClientId) -> bool {
        self.levels.contains_key(&client_id)
    }

    /// the granted level for the client, if any.
    pub fn level_for(&self, client_id: ClientId) -> Option<AccessLevel> {
        self.levels.get(&client_id).copied()
    }

    /// number of grants held.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// whether the set holds no grants.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// pure decision logic for client access.
///
/// stateless; all methods take `&self` plus the acting user, the target
/// client and the user's [`GrantSet`]. constructed once and shared via the
/// application state so handlers receive it explicitly rather than through
/// ambient globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessEngine;

impl AccessEngine {
    /// create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// whether the user may see the client listing at all.
    ///
    /// always allowed: the listing itself is filtered per item, the
    /// permission to look at it is not restricted.
    pub fn can_view_any(&self, _user: &User) -> Decision {
        Decision::Allow
    }

    /// whether the user may view the client.
    pub fn can_view(&self, user: &User, client: &Client, grants: &GrantSet) -> Decision {
        match user.role {
            Role::Admin => Decision::Allow,
            Role::Manager | Role::User => {
                if grants.has(client.id) {
                    Decision::Allow
                } else {
                    Decision::Deny(Denial::NoClientAccess)
                }
            }
        }
    }

    /// whether the user may select the client as the session-wide context.
    ///
    /// same rule as [`can_view`](Self::can_view); kept as its own operation
    /// because selection denials carry a user-facing message.
    pub fn can_select(&self, user: &User, client: &Client, grants: &GrantSet) -> Decision {
        self.can_view(user, client, grants)
    }

    /// whether the user may create clients.
    pub fn can_create(&self, user: &User) -> Decision {
        match user.role {
            Role::Admin | Role::Manager => Decision::Allow,
            Role::User => Decision::Deny(Denial::CannotCreate),
        }
    }

    /// whether the user may update the client.
    ///
    /// admins always; managers need a `write` or `admin` grant on this
    /// client; regular users never.
    pub fn can_update(&self, user: &User, client: &Client, grants: &GrantSet) -> Decision {
        match user.role {
            Role::Admin => Decision::Allow,
            Role::Manager => match grants.level_for(client.id) {
                Some(AccessLevel::Write) | Some(AccessLevel::Admin) => Decision::Allow,
                Some(AccessLevel::Read) => Decision::Deny(Denial::InsufficientAccessLevel),
                None => Decision::Deny(Denial::NoClientAccess),
            },
            Role::User => Decision::Deny(Denial::InsufficientAccessLevel),
        }
    }

    /// whether the user may delete the client.
    pub fn can_delete(&self, user: &User, _client: &Client) -> Decision {
        self.admin_only(user)
    }

    /// whether the user may restore a deleted client.
    pub fn can_restore(&self, user: &User, _client: &Client) -> Decision {
        self.admin_only(user)
    }

    /// whether the user may permanently delete the client.
    pub fn can_force_delete(&self, user: &User, _client: &Client) -> Decision {
        self.admin_only(user)
    }

    /// filter a client list down to what the user may see.
    ///
    /// admins see everything; everyone else sees exactly their granted
    /// clients. a non-admin with zero grants sees an empty list - there is
    /// no fall-open to the full listing.
    pub fn visible_clients<'a>(
        &self,
        user: &User,
        all_clients: &'a [Client],
        grants: &GrantSet,
    ) -> Vec<&'a Client> {
        all_clients
            .iter()
            .filter(|c| self.can_view(user, c, grants).is_allowed())
            .collect()
    }

    fn admin_only(&self, user: &User) -> Decision {
        match user.role {
            Role::Admin => Decision::Allow,
            Role::Manager | Role::User => Decision::Deny(Denial::AdminOnly),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientdesk_types::UserId;

    fn user_with_role(role: Role) -> User {
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
            "Healthcare".to_string(),
            UserId(99),
        )
    }

    fn grant_set(pairs: &[(u64, AccessLevel)]) -> GrantSet {
        GrantSet::from_grants(
            pairs
                .iter()
                .map(|(id, level)| AccessGrant::new(UserId(1), ClientId(*id), *level)),
        )
    }

    #[test]
    fn test_admin_allows_everything() {
        let engine = AccessEngine::new();
        let admin = user_with_role(Role::Admin);
        let c = client(1);
        let grants = GrantSet::empty();

        assert!(engine.can_view(&admin, &c, &grants).is_allowed());
        assert!(engine.can_select(&admin, &c, &grants).is_allowed());
        assert!(engine.can_create(&admin).is_allowed());
        assert!(engine.can_update(&admin, &c, &grants).is_allowed());
        assert!(engine.can_delete(&admin, &c).is_allowed());
        assert!(engine.can_restore(&admin, &c).is_allowed());
        assert!(engine.can_force_delete(&admin, &c).is_allowed());
    }

    #[test]
    fn test_view_requires_grant_for_non_admin() {
        let engine = AccessEngine::new();
        let c = client(1);
        let other = client(2);

        for role in [Role::Manager, Role::User] {
            let user = user_with_role(role);
            let grants = grant_set(&[(1, AccessLevel::Read)]);

            assert!(engine.can_view(&user, &c, &grants).is_allowed());
            assert_eq!(
                engine.can_view(&user, &other, &grants).denial(),
                Some(Denial::NoClientAccess)
            );
        }
    }

    #[test]
    fn test_select_denial_carries_message() {
        let engine = AccessEngine::new();
        let user = user_with_role(Role::User);
        let c = client(1);

        let decision = engine.can_select(&user, &c, &GrantSet::empty());
        let denial = decision.denial().unwrap();
        assert_eq!(
            denial.to_string(),
            "you do not have permission to access this client"
        );
    }

    #[test]
    fn test_create_is_role_gated() {
        let engine = AccessEngine::new();
        assert!(engine.can_create(&user_with_role(Role::Admin)).is_allowed());
        assert!(
            engine
                .can_create(&user_with_role(Role::Manager))
                .is_allowed()
        );
        assert_eq!(
            engine.can_create(&user_with_role(Role::User)).denial(),
            Some(Denial::CannotCreate)
        );
    }

    #[test]
    fn test_manager_update_needs_write_grant() {
        let engine = AccessEngine::new();
        let manager = user_with_role(Role::Manager);
        let client_a = client(1);
        let client_b = client(2);
        let grants = grant_set(&[(1, AccessLevel::Write)]);

        assert!(engine.can_update(&manager, &client_a, &grants).is_allowed());
        assert_eq!(
            engine.can_update(&manager, &client_b, &grants).denial(),
            Some(Denial::NoClientAccess)
        );
    }

    #[test]
    fn test_manager_read_grant_cannot_update() {
        let engine = AccessEngine::new();
        let manager = user_with_role(Role::Manager);
        let c = client(1);
        let grants = grant_set(&[(1, AccessLevel::Read)]);

        assert_eq!(
            engine.can_update(&manager, &c, &grants).denial(),
            Some(Denial::InsufficientAccessLevel)
        );
    }

    #[test]
    fn test_regular_user_never_updates() {
        let engine = AccessEngine::new();
        let user = user_with_role(Role::User);
        let c = client(1);
        // even an admin-level grant does not let a regular user update
        let grants = grant_set(&[(1, AccessLevel::Admin)]);

        assert!(!engine.can_update(&user, &c, &grants).is_allowed());
    }

    #[test]
    fn test_delete_is_admin_only() {
        let engine = AccessEngine::new();
        let c = client(1);

        // an admin-level grant does not substitute for the admin role
        for role in [Role::Manager, Role::User] {
            let user = user_with_role(role);
            assert_eq!(
                engine.can_delete(&user, &c).denial(),
                Some(Denial::AdminOnly)
            );
            assert_eq!(
                engine.can_force_delete(&user, &c).denial(),
                Some(Denial::AdminOnly)
            );
        }
    }

    #[test]
    fn test_visible_clients_filters_by_grant() {
        let engine = AccessEngine::new();
        let user = user_with_role(Role::User);
        let all = vec![client(1), client(2), client(3)];
        let grants = grant_set(&[(1, AccessLevel::Read), (3, AccessLevel::Write)]);

        let visible = engine.visible_clients(&user, &all, &grants);
        let ids: Vec<u64> = visible.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_visible_clients_empty_for_grantless_non_admin() {
        let engine = AccessEngine::new();
        let all = vec![client(1), client(2)];

        // no fall-open: zero grants means zero visible clients
        for role in [Role::Manager, Role::User] {
            let user = user_with_role(role);
            let visible = engine.visible_clients(&user, &all, &GrantSet::empty());
            assert!(visible.is_empty());
        }
    }

    #[test]
    fn test_visible_clients_admin_sees_all() {
        let engine = AccessEngine::new();
        let admin = user_with_role(Role::Admin);
        let all = vec![client(1), client(2)];

        let visible = engine.visible_clients(&admin, &all, &GrantSet::empty());
        assert_eq!(visible.len(), 2);
    }
}
