//! database migrations for clientdesk.

pub use sea_orm_migration::prelude::*;

mod m20260701_000001_create_users;
mod m20260701_000002_create_clients;
mod m20260701_000003_create_personnel;
mod m20260701_000004_create_client_user;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_000001_create_users::Migration),
            Box::new(m20260701_000002_create_clients::Migration),
            Box::new(m20260701_000003_create_personnel::Migration),
            Box::new(m20260701_000004_create_client_user::Migration),
        ]
    }
}
