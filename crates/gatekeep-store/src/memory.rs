//! In-memory user store using a Tokio read-write lock for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use gatekeep_core::{AppError, AppResult, UserId};
use gatekeep_entity::user::{CreateUser, User, UserRole};

use crate::user::UserStore;

/// Internal state for the memory-based store.
#[derive(Debug, Default)]
struct InnerState {
    /// Records by primary key.
    users: HashMap<UserId, User>,
    /// Unique index on username.
    by_username: HashMap<String, UserId>,
    /// Unique index on email.
    by_email: HashMap<String, UserId>,
}

impl InnerState {
    fn get_mut(&mut self, id: UserId) -> AppResult<&mut User> {
        self.users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

/// In-memory user store guarded by a Tokio `RwLock`.
///
/// Suitable for single-node deployments and tests only.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    /// Protected inner state.
    state: Arc<RwLock<InnerState>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_handle_or_email(&self, handle: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        let id = state
            .by_username
            .get(handle)
            .or_else(|| state.by_email.get(handle));
        Ok(id.and_then(|id| state.users.get(id)).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state.get_mut(id)?;
        user.last_login_at = Some(at);
        Ok(())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;

        if state.by_username.contains_key(&data.username) {
            return Err(AppError::conflict("Username is already taken"));
        }
        if state.by_email.contains_key(&data.email) {
            return Err(AppError::conflict("Email is already registered"));
        }

        let user = data.into_user(Utc::now());
        state.by_username.insert(user.username.clone(), user.id);
        state.by_email.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());

        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state.get_mut(id)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_active(&self, id: UserId, is_active: bool) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state.get_mut(id)?;
        user.is_active = is_active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state.get_mut(id)?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}
