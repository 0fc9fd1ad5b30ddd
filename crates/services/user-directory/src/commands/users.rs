//! Users command - account administration.

use serde::Serialize;

use common::{AppError, AppResult, PaginationParams};
use domain::{ExternalIdentity, NewUser, UserChanges};

use crate::cli::{UsersAction, UsersArgs};
use crate::config::UserDirectoryConfig;
use crate::repository::UserOrder;

/// Execute the users command
pub async fn execute(args: UsersArgs, config: &UserDirectoryConfig) -> AppResult<()> {
    let users = crate::connect(config).await?;

    match args.action {
        UsersAction::List {
            page,
            per_page,
            sort,
            desc,
        } => {
            let order = UserOrder {
                key: sort.into(),
                descending: desc,
            };
            let listing = users
                .list_users(PaginationParams::new(page, per_page), order)
                .await?;
            print_json(&listing)
        }
        UsersAction::Show { id } => print_json(&users.get_user(id).await?),
        UsersAction::Find { email } => print_json(&users.get_user_by_email(&email).await?),
        UsersAction::Create {
            email,
            provider,
            name,
        } => print_json(&users.register(NewUser::new(email, name, provider)).await?),
        UsersAction::SignIn {
            email,
            provider,
            name,
        } => {
            let identity = ExternalIdentity {
                email,
                name,
                auth_provider: provider,
            };
            print_json(&users.sign_in(identity).await?)
        }
        UsersAction::Update {
            id,
            email,
            name,
            clear_name,
        } => {
            let changes = update_changes(email, name, clear_name);
            if changes.is_empty() {
                tracing::warn!(user_id = %id, "no fields given; only updated_at will change");
            }
            print_json(&users.update_user(id, changes).await?)
        }
        UsersAction::Delete { id } => {
            users.delete_user(id).await?;
            println!("deleted {}", id);
            Ok(())
        }
    }
}

fn update_changes(email: Option<String>, name: Option<String>, clear_name: bool) -> UserChanges {
    UserChanges {
        email,
        name: if clear_name { Some(None) } else { name.map(Some) },
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_name_maps_to_explicit_none() {
        let changes = update_changes(None, None, true);
        assert_eq!(changes.name, Some(None));
        assert!(!changes.is_empty());
    }

    #[test]
    fn missing_name_leaves_it_untouched() {
        let changes = update_changes(Some("b@example.com".into()), None, false);
        assert_eq!(changes.name, None);
        assert_eq!(changes.email.as_deref(), Some("b@example.com"));
    }

    #[test]
    fn given_name_is_set() {
        let changes = update_changes(None, Some("Bob".into()), false);
        assert_eq!(changes.name, Some(Some("Bob".to_string())));
    }
}
