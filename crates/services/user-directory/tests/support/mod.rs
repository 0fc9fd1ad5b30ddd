//! Shared setup for tests that run against a real (in-memory SQLite) store.

#![allow(dead_code)]

use common::DatabaseConfig;
use domain::NewUser;
use user_directory_lib::infra::Database;

/// Settings for a private in-memory SQLite database.
///
/// The pool holds a single connection: every SQLite `:memory:` connection is
/// its own database.
pub fn test_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
        sqlx_logging: false,
    }
}

/// Fresh, fully migrated in-memory database.
pub async fn test_database() -> Database {
    Database::connect(&test_config())
        .await
        .expect("in-memory database should connect and migrate")
}

pub fn new_user(email: &str, name: Option<&str>, provider: &str) -> NewUser {
    NewUser::new(email, name.map(str::to_string), provider)
}

pub fn alice() -> NewUser {
    new_user("a@example.com", Some("Alice"), "google")
}
