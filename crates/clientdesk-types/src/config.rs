//! configuration types for clientdesk.

use serde::{Deserialize, Serialize};

/// main configuration for clientdesk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// public url of the server (used in redirects and links).
    pub server_url: String,

    /// address to bind the http server to.
    pub listen_addr: String,

    /// database configuration.
    pub database: DatabaseConfig,

    /// session configuration.
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            database: DatabaseConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// database type: "sqlite" or "postgres".
    pub db_type: String,

    /// database connection string or file path.
    pub connection_string: String,

    /// enable write-ahead logging for sqlite.
    pub write_ahead_log: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            connection_string: "/var/lib/clientdesk/db.sqlite".to_string(),
            write_ahead_log: true,
        }
    }
}

/// session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// name of the session cookie.
    pub cookie_name: String,

    /// mark the session cookie secure (https only).
    pub cookie_secure: bool,

    /// idle session expiry in minutes.
    pub expiry_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "clientdesk_session".to_string(),
            cookie_secure: false,
            expiry_minutes: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.db_type, "sqlite");
        assert!(config.database.write_ahead_log);
        assert_eq!(config.session.cookie_name, "clientdesk_session");
    }
}
