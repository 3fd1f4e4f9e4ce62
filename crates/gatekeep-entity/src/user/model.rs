//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatekeep_core::UserId;

use super::role::UserRole;

/// A stored credential together with its account state.
///
/// `username` and `email` are each unique and each resolve the record on
/// their own. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2id PHC hash string.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Human-readable full name.
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Disabled accounts fail authentication and authorization.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful interactive login.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name (optional).
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Initial active flag.
    pub is_active: bool,
}

impl CreateUser {
    /// Materializes the record with a fresh id and timestamps.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: UserId::new(),
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            full_name: self.full_name,
            role: self.role,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}
