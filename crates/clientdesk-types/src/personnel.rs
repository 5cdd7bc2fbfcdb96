//! personnel type - people employed at a client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{ClientId, UserId};

/// unique identifier for a personnel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonnelId(pub u64);

impl From<u64> for PersonnelId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PersonnelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a personnel record belonging to a client.
///
/// optionally linked to an application user (`user_id`), e.g. when the
/// person also logs in to clientdesk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personnel {
    /// unique identifier.
    pub id: PersonnelId,

    /// the client this person belongs to.
    pub client_id: ClientId,

    /// linked application user, if any.
    pub user_id: Option<UserId>,

    /// first name.
    pub first_name: String,

    /// last name.
    pub last_name: String,

    /// email address.
    pub email: Option<String>,

    /// phone number.
    pub phone_number: Option<String>,

    /// job position.
    pub position: Option<String>,

    /// department.
    pub department: Option<String>,

    /// date of hire.
    pub hire_date: Option<NaiveDate>,

    /// whether the record is active.
    pub active: bool,

    /// user who created the record.
    pub created_by: UserId,

    /// user who last updated the record.
    pub updated_by: Option<UserId>,

    /// when the record was created.
    pub created_at: DateTime<Utc>,

    /// when the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Personnel {
    /// create a new active personnel record.
    pub fn new(
        id: PersonnelId,
        client_id: ClientId,
        first_name: String,
        last_name: String,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            client_id,
            user_id: None,
            first_name,
            last_name,
            email: None,
            phone_number: None,
            position: None,
            department: None,
            hire_date: None,
            active: true,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
