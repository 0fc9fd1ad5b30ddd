//! User Directory Library
//!
//! Durable storage of registered accounts with store-enforced email
//! uniqueness. Callers (web layer, sign-in flow) go through [`UserService`];
//! the `user-directory` binary exposes the same operations for administration.
//!
//! # Layers
//!
//! - **repository**: SeaORM entity and `UserRepository`/`UserStore`
//! - **service**: validation and use cases (`UserService`/`UserManager`)
//! - **infra**: connection pool and schema migrations
//! - **cli** / **commands**: administrative command line

pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use common::AppResult;

use crate::config::UserDirectoryConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

pub use crate::service::{SignIn, UserService};

/// Connect, apply pending migrations and assemble the directory service.
pub async fn connect(config: &UserDirectoryConfig) -> AppResult<Arc<dyn UserService>> {
    let db = Database::connect(&config.database).await?;
    Ok(directory(db.get_connection()))
}

/// Assemble the directory service on an existing connection.
pub fn directory(connection: DatabaseConnection) -> Arc<dyn UserService> {
    let user_repo = Arc::new(UserStore::new(connection));
    Arc::new(UserManager::new(user_repo))
}
