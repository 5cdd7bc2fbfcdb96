//! create personnel table migration.

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
                    .table(Personnel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Personnel::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Personnel::ClientId).big_integer().not_null())
                    .col(ColumnDef::new(Personnel::UserId).big_integer())
                    .col(ColumnDef::new(Personnel::FirstName).string().not_null())
                    .col(ColumnDef::new(Personnel::LastName).string().not_null())
                    .col(ColumnDef::new(Personnel::Email).string())
                    .col(ColumnDef::new(Personnel::PhoneNumber).string())
                    .col(ColumnDef::new(Personnel::Position).string())
                    .col(ColumnDef::new(Personnel::Department).string())
                    .col(ColumnDef::new(Personnel::HireDate).date())
                    .col(
                        ColumnDef::new(Personnel::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Personnel::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Personnel::UpdatedBy).big_integer())
                    .col(
                        ColumnDef::new(Personnel::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Personnel::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Personnel::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personnel_client")
                            .from(Personnel::Table, Personnel::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personnel_user")
                            .from(Personnel::Table, Personnel::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // index on client_id for the selection-scoped listing
        manager
            .create_index(
                Index::create()
                    .name("idx_personnel_client_id")
                    .table(Personnel::Table)
                    .col(Personnel::ClientId)
                    .to_owned(),
            )
            .await?;

        // index for soft deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_personnel_deleted_at")
                    .table(Personnel::Table)
                    .col(Personnel::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Personnel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Personnel {
    Table,
    Id,
    ClientId,
    UserId,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Position,
    Department,
    HireDate,
    Active,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
