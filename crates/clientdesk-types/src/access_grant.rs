//! access grants - the (user, client) many-to-many relationship.
//!
//! a grant gives a user a specific [`AccessLevel`] on one client. at most one
//! grant exists per (user, client) pair; for a non-admin user, the absence of
//! a grant means no access at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ClientId, Error, UserId};

/// access level granted to a user on a single client.
///
/// governs mutation rights independent of the user's global role. ordered:
/// `Read < Write < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// may view the client and its records.
    Read,
    /// may modify the client's records.
    Write,
    /// may administer the client.
    Admin,
}

impl AccessLevel {
    /// the string stored in the database for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::Admin => "admin",
        }
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(AccessLevel::Read),
            "write" => Ok(AccessLevel::Write),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(Error::UnknownAccessLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a persisted access grant for one (user, client) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    /// the user holding the grant.
    pub user_id: UserId,

    /// the client the grant applies to.
    pub client_id: ClientId,

    /// level of access granted.
    pub access_level: AccessLevel,

    /// when the grant was created.
    pub created_at: DateTime<Utc>,

    /// when the grant was last changed (re-assignment updates in place).
    pub updated_at: DateTime<Utc>,
}

impl AccessGrant {
    /// create a new grant effective now.
    pub fn new(user_id: UserId, client_id: ClientId, access_level: AccessLevel) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            client_id,
            access_level,
            created_at: now,
            updated_at: now,
        }
    }
}
