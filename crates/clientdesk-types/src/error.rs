//! error types for clientdesk-types.

use thiserror::Error;

/// errors that can occur when constructing or parsing domain values.
#[derive(Debug, Error)]
pub enum Error {
    /// role string is not one of `admin`, `manager`, `user`.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// access level string is not one of `read`, `write`, `admin`.
    #[error("unknown access level: {0}")]
    UnknownAccessLevel(String),

    /// configuration file could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
