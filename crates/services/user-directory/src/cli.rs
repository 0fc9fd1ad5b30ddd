//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::repository::UserSortKey;

/// Account directory for the foodblr backend
#[derive(Parser, Debug)]
#[command(name = "user-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database URL (overrides USER_DIRECTORY_DATABASE_URL / DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Database migration commands
    Migrate(MigrateArgs),

    /// Inspect and administer accounts
    Users(UsersArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the users command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Account administration actions
#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// List accounts page by page
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 20)]
        per_page: u64,
        #[arg(long, value_enum, default_value_t = SortArg::CreatedAt)]
        sort: SortArg,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show an account by id
    Show { id: Uuid },
    /// Look an account up by exact email
    Find { email: String },
    /// Register an account
    Create {
        #[arg(long)]
        email: String,
        /// Identity provider (e.g. google)
        #[arg(long)]
        provider: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Resolve an identity-provider login, registering on first use
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        provider: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Change email and/or display name
    Update {
        id: Uuid,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, conflicts_with = "clear_name")]
        name: Option<String>,
        /// Remove the display name
        #[arg(long)]
        clear_name: bool,
    },
    /// Permanently delete an account
    Delete { id: Uuid },
}

/// Sort keys accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    CreatedAt,
    Email,
}

impl From<SortArg> for UserSortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::CreatedAt => UserSortKey::CreatedAt,
            SortArg::Email => UserSortKey::Email,
        }
    }
}
