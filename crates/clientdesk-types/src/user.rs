//! user type representing an application user.
//!
//! users carry a global [`Role`] that governs baseline privileges across all
//! clients. per-client rights come from access grants, not from the role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// global classification of a user.
///
/// a closed set: every authorization decision matches exhaustively on this
/// enum, so adding a role forces every decision site to be revisited instead
/// of falling through to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// full access to every client and every administrative action.
    Admin,
    /// may create clients and update clients granted with write access.
    Manager,
    /// baseline role, rights come entirely from access grants.
    User,
}

impl Role {
    /// the string stored in the database for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a clientdesk user.
///
/// the password hash is an argon2id phc string; it never leaves the server
/// and is skipped during serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// unique identifier.
    pub id: UserId,

    /// display name.
    pub name: String,

    /// email address - unique, used as the login identifier.
    pub email: String,

    /// argon2id phc-format password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// global role.
    pub role: Role,

    /// when the user was created.
    pub created_at: DateTime<Utc>,

    /// when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// create a new user with the given name, email and role.
    ///
    /// the password hash starts empty; set it before persisting.
    pub fn new(id: UserId, name: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            password_hash: String::new(),
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Manager, Role::User] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_unknown() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err()); // case sensitive
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let mut user = User::new(
            UserId(1),
            "Test".to_string(),
            "test@example.com".to_string(),
            Role::User,
        );
        user.password_hash = "$argon2id$secret".to_string();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
