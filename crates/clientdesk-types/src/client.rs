//! client type representing a managed tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// unique identifier for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a client record.
///
/// clients are the tenants of the system: personnel records hang off a
/// client, and access grants scope users to clients. inactive clients are
/// kept for history; the `active` flag is display/lifecycle state and does
/// not participate in authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// unique identifier.
    pub id: ClientId,

    /// client name.
    pub name: String,

    /// industry the client operates in.
    pub industry: String,

    /// contact email address.
    pub contact_email: Option<String>,

    /// contact phone number.
    pub contact_phone: Option<String>,

    /// website url.
    pub website_url: Option<String>,

    /// whether the client is active.
    pub active: bool,

    /// user who created the record.
    pub created_by: UserId,

    /// user who last updated the record.
    pub updated_by: Option<UserId>,

    /// when the client was created.
    pub created_at: DateTime<Utc>,

    /// when the client was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// create a new active client.
    pub fn new(id: ClientId, name: String, industry: String, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            industry,
            contact_email: None,
            contact_phone: None,
            website_url: None,
            active: true,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}
