//! User service - account lifecycle use cases.
//!
//! Validation happens here, before the repository is touched. Uniqueness is
//! left to the store: there is no check-then-insert on the write path.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt, Paginated, PaginationParams};
use domain::{ExternalIdentity, NewUser, User, UserChanges};

use crate::repository::{UserOrder, UserRepository};

/// Outcome of resolving an external identity to an account
#[derive(Debug, Clone, Serialize)]
pub struct SignIn {
    pub user: User,
    /// True when this sign-in registered the account
    pub created: bool,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account; `Conflict` if the email is taken
    async fn register(&self, input: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by exact email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// Update name and/or email
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Permanently delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Paged listing
    async fn list_users(
        &self,
        params: PaginationParams,
        order: UserOrder,
    ) -> AppResult<Paginated<User>>;

    /// Map an identity-provider login onto an account, creating it on first use
    async fn sign_in(&self, identity: ExternalIdentity) -> AppResult<SignIn>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn resume(&self, existing: User, provider: &str) -> AppResult<SignIn> {
        if !existing.registered_with(provider) {
            tracing::info!(
                user_id = %existing.id,
                registered_with = %existing.auth_provider,
                provider,
                "sign-in through a different provider"
            );
        }

        let user = self.repo.touch(existing.id).await?;
        Ok(SignIn {
            user,
            created: false,
        })
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, input: NewUser) -> AppResult<User> {
        input.check()?;
        self.repo.create(input).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.repo.find_by_email(email).await?.ok_or_not_found()
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        changes.check()?;
        self.repo.update(id, changes).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }

    async fn list_users(
        &self,
        params: PaginationParams,
        order: UserOrder,
    ) -> AppResult<Paginated<User>> {
        let (users, total) = self.repo.list(params, order).await?;
        Ok(Paginated::from_params(users, &params, total))
    }

    async fn sign_in(&self, identity: ExternalIdentity) -> AppResult<SignIn> {
        let input = NewUser::from(identity);
        input.check()?;

        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            return self.resume(existing, &input.auth_provider).await;
        }

        let email = input.email.clone();
        let provider = input.auth_provider.clone();
        match self.repo.create(input).await {
            Ok(user) => Ok(SignIn {
                user,
                created: true,
            }),
            Err(AppError::Conflict(_)) => {
                // A concurrent first sign-in registered the email in between
                tracing::debug!("sign-in lost registration race; resolving existing account");
                let existing = self.repo.find_by_email(&email).await?.ok_or_not_found()?;
                self.resume(existing, &provider).await
            }
            Err(e) => Err(e),
        }
    }
}
