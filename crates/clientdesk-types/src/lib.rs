//! core types for clientdesk - a multi-tenant client administration server.
//!
//! this crate provides the fundamental data structures used throughout clientdesk:
//! - [`user`]: application users and their global roles
//! - [`client`]: client (tenant) records
//! - [`personnel`]: personnel records attached to clients
//! - [`access_grant`]: per-(user, client) access level grants
//! - [`config`]: application configuration

#![warn(missing_docs)]

mod access_grant;
mod client;
mod config;
mod error;
mod personnel;
mod user;

pub use access_grant::{AccessGrant, AccessLevel};
pub use client::{Client, ClientId};
pub use config::{Config, DatabaseConfig, SessionConfig};
pub use error::Error;
pub use personnel::{Personnel, PersonnelId};
pub use user::{Role, User, UserId};

/// result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;
