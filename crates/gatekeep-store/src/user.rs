//! Credential store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatekeep_core::{AppResult, UserId};
use gatekeep_entity::user::{CreateUser, User, UserRole};

/// Read/write contract the auth core needs from user persistence.
///
/// Implementations report their own failures as `AppError`s; callers
/// propagate them unmodified.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Finds a user whose username OR email equals `handle`.
    async fn find_by_handle_or_email(&self, handle: &str) -> AppResult<Option<User>>;

    /// Finds a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Records a successful interactive login.
    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AppResult<()>;

    /// Inserts a new user. Fails with `Conflict` when the username or email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Replaces the stored password hash. Fails with `NotFound` for an unknown id.
    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<()>;

    /// Enables or disables an account.
    async fn set_active(&self, id: UserId, is_active: bool) -> AppResult<User>;

    /// Changes an account's role.
    async fn set_role(&self, id: UserId, role: UserRole) -> AppResult<User>;
}
