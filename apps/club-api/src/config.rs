//! Club API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `club-api` starts a working local instance.

use serde::{Deserialize, Serialize};
use std::env;

/// Club API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Maximum connections in the database pool
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable             | Default        |
    /// |----------------------|----------------|
    /// | `HTTP_PORT`          | `8080`         |
    /// | `DATABASE_PATH`      | `clubhouse.db` |
    /// | `DB_MAX_CONNECTIONS` | `5`            |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "clubhouse.db".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        // The test process may carry these variables; only assert when
        // the environment is clean.
        if env::var("HTTP_PORT").is_err() && env::var("DB_MAX_CONNECTIONS").is_err() {
            let config = ApiConfig::load().unwrap();
            assert_eq!(config.http_port, 8080);
            assert_eq!(config.db_max_connections, 5);
        }
    }
}
