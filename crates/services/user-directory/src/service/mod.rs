//! Application services layer.

mod user_service;

pub use user_service::{SignIn, UserManager, UserService};
