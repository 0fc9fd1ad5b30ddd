//! User repository backed by SeaORM.
//!
//! The store assigns ids and timestamps; email uniqueness is enforced by the
//! `uk_users_email` index and surfaced as `AppError::Conflict`.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, PaginationParams};
use domain::{NewUser, User, UserChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entity name reported when the email constraint fires
const EMAIL_ENTITY: &str = "Email";

/// Column a listing is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortKey {
    #[default]
    CreatedAt,
    Email,
}

/// Listing order. Ties are broken by id so pages never overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserOrder {
    pub key: UserSortKey,
    pub descending: bool,
}

impl UserOrder {
    pub fn asc(key: UserSortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn desc(key: UserSortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }

    fn direction(&self) -> Order {
        if self.descending {
            Order::Desc
        } else {
            Order::Asc
        }
    }

    fn column(&self) -> user::Column {
        match self.key {
            UserSortKey::CreatedAt => user::Column::CreatedAt,
            UserSortKey::Email => user::Column::Email,
        }
    }
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user; `Conflict` if the email is taken
    async fn create(&self, input: NewUser) -> AppResult<User>;

    /// Apply changes and refresh `updated_at`
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Refresh `updated_at` only (re-authentication bookkeeping)
    async fn touch(&self, id: Uuid) -> AppResult<User>;

    /// Permanently delete user
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// One page of users plus the total number of users
    async fn list(&self, params: PaginationParams, order: UserOrder) -> AppResult<(Vec<User>, u64)>;

    /// Number of registered users
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn save(&self, active: ActiveModel) -> AppResult<User> {
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, EMAIL_ENTITY))?;
        Ok(User::from(model))
    }
}

/// Current time at the precision the store keeps (microseconds).
fn store_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at`, never earlier than the previous one.
fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    store_now().max(previous)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        tracing::debug!(user_id = %id, found = result.is_some(), "find user by id");

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        tracing::debug!(found = result.is_some(), "find user by email");

        Ok(result.map(User::from))
    }

    async fn create(&self, input: NewUser) -> AppResult<User> {
        let now = store_now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            name: Set(input.name),
            auth_provider: Set(input.auth_provider),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, EMAIL_ENTITY))?;
        tracing::info!(user_id = %model.id, provider = %model.auth_provider, "user created");

        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let current = self.find_model(id).await?;
        let updated_at = next_updated_at(current.updated_at);
        let mut active: ActiveModel = current.into();

        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        active.updated_at = Set(updated_at);

        let user = self.save(active).await?;
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn touch(&self, id: Uuid) -> AppResult<User> {
        let current = self.find_model(id).await?;
        let updated_at = next_updated_at(current.updated_at);
        let mut active: ActiveModel = current.into();
        active.updated_at = Set(updated_at);

        self.save(active).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn list(&self, params: PaginationParams, order: UserOrder) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by(order.column(), order.direction())
            .order_by(user::Column::Id, order.direction())
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = match params.offset() {
            Some(offset) if offset < total => paginator.fetch_page(params.page_index()).await?,
            _ => Vec::new(),
        };

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn count(&self) -> AppResult<u64> {
        let total = UserEntity::find().count(&self.db).await?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn store_now_has_microsecond_precision() {
        assert_eq!(store_now().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let future = Utc::now() + Duration::hours(1);
        assert_eq!(next_updated_at(future), future);

        let past = Utc::now() - Duration::hours(1);
        assert!(next_updated_at(past) > past);
    }

    #[test]
    fn default_order_is_oldest_first() {
        let order = UserOrder::default();
        assert_eq!(order.key, UserSortKey::CreatedAt);
        assert!(!order.descending);
        assert!(matches!(UserOrder::desc(UserSortKey::Email).direction(), Order::Desc));
    }
}
