//! access grant entity - the client/user pivot table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use clientdesk_types::{AccessGrant, AccessLevel, ClientId, UserId};

/// access grant database model.
///
/// one row per (client, user) pair; the migration enforces uniqueness.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "client_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub client_id: i64,
    pub user_id: i64,
    /// access level stored as its lowercase string form ("read", "write", "admin").
    pub access_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AccessGrant {
    fn from(model: Model) -> Self {
        // an unrecognized level degrades to read-only
        let access_level = model.access_level.parse().unwrap_or(AccessLevel::Read);

        AccessGrant {
            user_id: UserId(model.user_id as u64),
            client_id: ClientId(model.client_id as u64),
            access_level,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&AccessGrant> for ActiveModel {
    fn from(grant: &AccessGrant) -> Self {
        ActiveModel {
            id: NotSet,
            client_id: Set(grant.client_id.0 as i64),
            user_id: Set(grant.user_id.0 as i64),
            access_level: Set(grant.access_level.as_str().to_string()),
            created_at: Set(grant.created_at),
            updated_at: Set(grant.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trip() {
        let model = Model {
            id: 1,
            client_id: 3,
            user_id: 7,
            access_level: "write".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let grant: AccessGrant = model.into();
        assert_eq!(grant.client_id, ClientId(3));
        assert_eq!(grant.user_id, UserId(7));
        assert_eq!(grant.access_level, AccessLevel::Write);
    }
}
