//! client entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use clientdesk_types::{Client, ClientId, UserId};

/// client database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub industry: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website_url: Option<String>,
    pub active: bool,
    pub created_by: i64,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::personnel::Entity")]
    Personnel,
    #[sea_orm(has_many = "super::client_user::Entity")]
    AccessGrants,
}

impl Related<super::personnel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Personnel.def()
    }
}

impl Related<super::client_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessGrants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(model: Model) -> Self {
        Client {
            id: ClientId(model.id as u64),
            name: model.name,
            industry: model.industry,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            website_url: model.website_url,
            active: model.active,
            created_by: UserId(model.created_by as u64),
            updated_by: model.updated_by.map(|id| UserId(id as u64)),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Client> for ActiveModel {
    fn from(client: &Client) -> Self {
        ActiveModel {
            id: if client.id.0 == 0 {
                NotSet
            } else {
                Set(client.id.0 as i64)
            },
            name: Set(client.name.clone()),
            industry: Set(client.industry.clone()),
            contact_email: Set(client.contact_email.clone()),
            contact_phone: Set(client.contact_phone.clone()),
            website_url: Set(client.website_url.clone()),
            active: Set(client.active),
            created_by: Set(client.created_by.0 as i64),
            updated_by: Set(client.updated_by.map(|id| id.0 as i64)),
            created_at: Set(client.created_at),
            updated_at: Set(client.updated_at),
            deleted_at: NotSet,
        }
    }
}
