//! personnel entity for database storage.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use clientdesk_types::{ClientId, Personnel, PersonnelId, UserId};

/// personnel database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "personnel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub client_id: i64,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub active: bool,
    pub created_by: i64,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
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

impl From<Model> for Personnel {
    fn from(model: Model) -> Self {
        Personnel {
            id: PersonnelId(model.id as u64),
            client_id: ClientId(model.client_id as u64),
            user_id: model.user_id.map(|id| UserId(id as u64)),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            position: model.position,
            department: model.department,
            hire_date: model.hire_date,
            active: model.active,
            created_by: UserId(model.created_by as u64),
            updated_by: model.updated_by.map(|id| UserId(id as u64)),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Personnel> for ActiveModel {
    fn from(personnel: &Personnel) -> Self {
        ActiveModel {
            id: if personnel.id.0 == 0 {
                NotSet
            } else {
                Set(personnel.id.0 as i64)
            },
            client_id: Set(personnel.client_id.0 as i64),
            user_id: Set(personnel.user_id.map(|id| id.0 as i64)),
            first_name: Set(personnel.first_name.clone()),
            last_name: Set(personnel.last_name.clone()),
            email: Set(personnel.email.clone()),
            phone_number: Set(personnel.phone_number.clone()),
            position: Set(personnel.position.clone()),
            department: Set(personnel.department.clone()),
            hire_date: Set(personnel.hire_date),
            active: Set(personnel.active),
            created_by: Set(personnel.created_by.0 as i64),
            updated_by: Set(personnel.updated_by.map(|id| id.0 as i64)),
            created_at: Set(personnel.created_at),
            updated_at: Set(personnel.updated_at),
            deleted_at: NotSet,
        }
    }
}
