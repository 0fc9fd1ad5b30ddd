//! User directory configuration.

use std::env;
use std::str::FromStr;

use common::DatabaseConfig;

/// User directory configuration.
#[derive(Debug, Clone, Default)]
pub struct UserDirectoryConfig {
    /// Connection pool settings
    pub database: DatabaseConfig,
}

impl UserDirectoryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to [`DatabaseConfig::default`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: lookup("USER_DIRECTORY_DATABASE_URL")
                    .or_else(|| lookup("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: parse_setting(&lookup, "USER_DIRECTORY_DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: parse_setting(&lookup, "USER_DIRECTORY_DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                connect_timeout_secs: parse_setting(&lookup, "USER_DIRECTORY_DB_CONNECT_TIMEOUT_SECS")
                    .unwrap_or(defaults.connect_timeout_secs),
                sqlx_logging: parse_setting(&lookup, "USER_DIRECTORY_SQL_LOGGING")
                    .unwrap_or(defaults.sqlx_logging),
            },
        }
    }

    /// Override the database URL (e.g. from a CLI flag).
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database.url = url.into();
        self
    }
}

fn parse_setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
