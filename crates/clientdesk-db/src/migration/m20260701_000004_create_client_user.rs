//! create client_user table migration.
//!
//! this table defines which users have access to which clients and at what
//! level. admins bypass it and can access all clients.

use sea_orm_migration::prelude::*;

use super::m20260701_000001_create_users::Users;
use super::m20260701_000002_create_clients::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientUser::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientUser::ClientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientUser::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClientUser::AccessLevel)
                            .string()
                            .not_null()
                            .default("read"),
                    )
                    .col(
                        ColumnDef::new(ClientUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientUser::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_user_client")
                            .from(ClientUser::Table, ClientUser::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_user_user")
                            .from(ClientUser::Table, ClientUser::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // a user cannot be assigned to the same client twice
        manager
            .create_index(
                Index::create()
                    .name("idx_client_user_pair")
                    .table(ClientUser::Table)
                    .col(ClientUser::ClientId)
                    .col(ClientUser::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // index on user_id for the per-request grants_for lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_client_user_user_id")
                    .table(ClientUser::Table)
                    .col(ClientUser::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClientUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClientUser {
    Table,
    Id,
    ClientId,
    UserId,
    AccessLevel,
    CreatedAt,
    UpdatedAt,
}
