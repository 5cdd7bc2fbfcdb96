//! database layer for clientdesk.
//!
//! this crate provides persistent storage for:
//! - Users
//! - Clients
//! - Personnel
//! - Access grants (the client/user pivot)
//!
//! all primary entities use soft-delete semantics - records are marked with
//! a `deleted_at` timestamp rather than being physically removed. access
//! grant rows are the exception: they are hard-deleted together with either
//! side of the pair, so a deleted user or client leaves no dangling grants.

#![warn(missing_docs)]

mod entity;
mod error;
mod migration;

pub use error::Error;

use std::future::Future;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database as SeaOrmDatabase, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;

use clientdesk_types::{
    AccessGrant, AccessLevel, Client, ClientId, Config, Personnel, PersonnelId, User, UserId,
};

/// result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// database trait for clientdesk storage operations.
///
/// this trait abstracts over different database backends (sqlite, postgresql).
pub trait Database: Send + Sync {
    // ─── Health Check ─────────────────────────────────────────────────────────

    /// ping the database to verify connectivity.
    ///
    /// returns `Ok(())` if the database is reachable, `Err` otherwise.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    // ─── User Operations ─────────────────────────────────────────────────────

    /// create a new user. returns the created user with its assigned id.
    fn create_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// get a user by id. returns `None` if not found or soft-deleted.
    fn get_user(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// get a user by email. returns `None` if not found or soft-deleted.
    fn get_user_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send;

    /// list all non-deleted users.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// update an existing user. returns the updated user.
    fn update_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// soft-delete a user and remove their access grants.
    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<()>> + Send;

    // ─── Client Operations ───────────────────────────────────────────────────

    /// create a new client. returns the created client with its assigned id.
    fn create_client(&self, client: &Client) -> impl Future<Output = Result<Client>> + Send;

    /// get a client by id. returns `None` if not found or soft-deleted.
    fn get_client(&self, id: ClientId) -> impl Future<Output = Result<Option<Client>>> + Send;

    /// get a client by id even when soft-deleted (for restore).
    fn get_client_including_deleted(
        &self,
        id: ClientId,
    ) -> impl Future<Output = Result<Option<Client>>> + Send;

    /// list all non-deleted clients.
    fn list_clients(&self) -> impl Future<Output = Result<Vec<Client>>> + Send;

    /// update an existing client. also bumps `updated_at`.
    fn update_client(&self, client: &Client) -> impl Future<Output = Result<Client>> + Send;

    /// soft-delete a client and remove its access grants.
    fn delete_client(&self, id: ClientId) -> impl Future<Output = Result<()>> + Send;

    /// restore a soft-deleted client.
    fn restore_client(&self, id: ClientId) -> impl Future<Output = Result<()>> + Send;

    // ─── Personnel Operations ────────────────────────────────────────────────

    /// create a new personnel record. returns it with its assigned id.
    fn create_personnel(
        &self,
        personnel: &Personnel,
    ) -> impl Future<Output = Result<Personnel>> + Send;

    /// get a personnel record by id. returns `None` if not found or soft-deleted.
    fn get_personnel(
        &self,
        id: PersonnelId,
    ) -> impl Future<Output = Result<Option<Personnel>>> + Send;

    /// list all non-deleted personnel records.
    fn list_personnel(&self) -> impl Future<Output = Result<Vec<Personnel>>> + Send;

    /// list all non-deleted personnel belonging to a specific client.
    fn list_personnel_for_client(
        &self,
        client_id: ClientId,
    ) -> impl Future<Output = Result<Vec<Personnel>>> + Send;

    /// update an existing personnel record. also bumps `updated_at`.
    fn update_personnel(
        &self,
        personnel: &Personnel,
    ) -> impl Future<Output = Result<Personnel>> + Send;

    /// soft-delete a personnel record.
    fn delete_personnel(&self, id: PersonnelId) -> impl Future<Output = Result<()>> + Send;

    // ─── Access Grant Operations ─────────────────────────────────────────────

    /// all grants held by a user, one per granted client.
    fn grants_for(&self, user_id: UserId) -> impl Future<Output = Result<Vec<AccessGrant>>> + Send;

    /// grant a user access to a client at the given level.
    ///
    /// idempotent upsert: re-granting an existing pair updates the level in
    /// place, preserving the one-row-per-pair invariant.
    fn grant_access(
        &self,
        user_id: UserId,
        client_id: ClientId,
        level: AccessLevel,
    ) -> impl Future<Output = Result<AccessGrant>> + Send;

    /// remove a user's grant on a client. no-op when no grant exists.
    fn revoke_access(
        &self,
        user_id: UserId,
        client_id: ClientId,
    ) -> impl Future<Output = Result<()>> + Send;

    /// whether any grant exists for the (user, client) pair.
    fn has_access(
        &self,
        user_id: UserId,
        client_id: ClientId,
    ) -> impl Future<Output = Result<bool>> + Send;
}

/// the main database implementation using sea-orm.
#[derive(Clone)]
pub struct ClientdeskDb {
    conn: DatabaseConnection,
}

impl ClientdeskDb {
    /// create a new database connection from config.
    pub async fn new(config: &Config) -> Result<Self> {
        let url = Self::build_connection_url(&config.database)?;
        let conn: DatabaseConnection = SeaOrmDatabase::connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };

        // enable WAL mode for sqlite if configured
        if config.database.db_type == "sqlite" && config.database.write_ahead_log {
            db.enable_wal_mode().await?;
        }

        db.migrate().await?;
        Ok(db)
    }

    /// enable write-ahead logging mode for sqlite.
    ///
    /// WAL mode allows concurrent reads during writes. must be called before
    /// any writes.
    async fn enable_wal_mode(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA journal_mode=WAL")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable WAL mode: {}", e)))?;
        tracing::info!("sqlite WAL mode enabled");
        Ok(())
    }

    /// build a sea-orm compatible connection url from config.
    fn build_connection_url(config: &clientdesk_types::DatabaseConfig) -> Result<String> {
        match config.db_type.as_str() {
            "sqlite" => {
                let path = if config.connection_string.starts_with("sqlite:") {
                    config.connection_string.clone()
                } else {
                    format!("sqlite:{}", config.connection_string)
                };
                // add ?mode=rwc to create the file if it doesn't exist
                if path.contains('?') {
                    Ok(path)
                } else {
                    Ok(format!("{}?mode=rwc", path))
                }
            }
            "postgres" | "postgresql" => Ok(config.connection_string.clone()),
            other => Err(Error::InvalidData(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }

    /// create an in-memory sqlite database for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let conn: DatabaseConnection = SeaOrmDatabase::connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(())
    }
}

impl Database for ClientdeskDb {
    // health check

    async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    // user operations

    async fn create_user(&self, user: &User) -> Result<User> {
        let model: entity::user::ActiveModel = user.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let result = entity::user::Entity::find_by_id(id.0 as i64)
            .filter(entity::user::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = entity::user::Entity::find()
            .filter(entity::user::Column::Email.eq(email))
            .filter(entity::user::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let results = entity::user::Entity::find()
            .filter(entity::user::Column::DeletedAt.is_null())
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut model: entity::user::ActiveModel = user.into();
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        entity::user::Entity::update_many()
            .col_expr(
                entity::user::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::user::Column::Id.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;

        // grants cascade with the user
        entity::client_user::Entity::delete_many()
            .filter(entity::client_user::Column::UserId.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    // client operations

    async fn create_client(&self, client: &Client) -> Result<Client> {
        let model: entity::client::ActiveModel = client.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>> {
        let result = entity::client::Entity::find_by_id(id.0 as i64)
            .filter(entity::client::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_client_including_deleted(&self, id: ClientId) -> Result<Option<Client>> {
        let result = entity::client::Entity::find_by_id(id.0 as i64)
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let results = entity::client::Entity::find()
            .filter(entity::client::Column::DeletedAt.is_null())
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_client(&self, client: &Client) -> Result<Client> {
        let mut model: entity::client::ActiveModel = client.into();
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_client(&self, id: ClientId) -> Result<()> {
        entity::client::Entity::update_many()
            .col_expr(
                entity::client::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::client::Column::Id.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;

        // grants cascade with the client
        entity::client_user::Entity::delete_many()
            .filter(entity::client_user::Column::ClientId.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    async fn restore_client(&self, id: ClientId) -> Result<()> {
        entity::client::Entity::update_many()
            .col_expr(
                entity::client::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .filter(entity::client::Column::Id.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // personnel operations

    async fn create_personnel(&self, personnel: &Personnel) -> Result<Personnel> {
        let model: entity::personnel::ActiveModel = personnel.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_personnel(&self, id: PersonnelId) -> Result<Option<Personnel>> {
        let result = entity::personnel::Entity::find_by_id(id.0 as i64)
            .filter(entity::personnel::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_personnel(&self) -> Result<Vec<Personnel>> {
        let results = entity::personnel::Entity::find()
            .filter(entity::personnel::Column::DeletedAt.is_null())
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_personnel_for_client(&self, client_id: ClientId) -> Result<Vec<Personnel>> {
        let results = entity::personnel::Entity::find()
            .filter(entity::personnel::Column::ClientId.eq(client_id.0 as i64))
            .filter(entity::personnel::Column::DeletedAt.is_null())
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_personnel(&self, personnel: &Personnel) -> Result<Personnel> {
        let mut model: entity::personnel::ActiveModel = personnel.into();
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_personnel(&self, id: PersonnelId) -> Result<()> {
        entity::personnel::Entity::update_many()
            .col_expr(
                entity::personnel::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::personnel::Column::Id.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // access grant operations

    async fn grants_for(&self, user_id: UserId) -> Result<Vec<AccessGrant>> {
        let results = entity::client_user::Entity::find()
            .filter(entity::client_user::Column::UserId.eq(user_id.0 as i64))
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn grant_access(
        &self,
        user_id: UserId,
        client_id: ClientId,
        level: AccessLevel,
    ) -> Result<AccessGrant> {
        let existing = entity::client_user::Entity::find()
            .filter(entity::client_user::Column::UserId.eq(user_id.0 as i64))
            .filter(entity::client_user::Column::ClientId.eq(client_id.0 as i64))
            .one(&self.conn)
            .await?;

        match existing {
            Some(model) => {
                // re-assignment updates the level in place
                let mut active: entity::client_user::ActiveModel = model.into();
                active.access_level = Set(level.as_str().to_string());
                active.updated_at = Set(Utc::now());
                let result = active.update(&self.conn).await?;
                Ok(result.into())
            }
            None => {
                let grant = AccessGrant::new(user_id, client_id, level);
                let model: entity::client_user::ActiveModel = (&grant).into();
                let result = model.insert(&self.conn).await?;
                Ok(result.into())
            }
        }
    }

    async fn revoke_access(&self, user_id: UserId, client_id: ClientId) -> Result<()> {
        entity::client_user::Entity::delete_many()
            .filter(entity::client_user::Column::UserId.eq(user_id.0 as i64))
            .filter(entity::client_user::Column::ClientId.eq(client_id.0 as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn has_access(&self, user_id: UserId, client_id: ClientId) -> Result<bool> {
        let count = entity::client_user::Entity::find()
            .filter(entity::client_user::Column::UserId.eq(user_id.0 as i64))
            .filter(entity::client_user::Column::ClientId.eq(client_id.0 as i64))
            .one(&self.conn)
            .await?;
        Ok(count.is_some())
    }
}
