//! Account service: registration, deactivation, and password management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::ValidateEmail;

use gatekeep_core::{AppError, AppResult, UserId};
use gatekeep_entity::user::{CreateUser, User, UserRole};
use gatekeep_store::UserStore;

use crate::error::AuthError;
use crate::guard::{RoleRequirement, Subject};
use crate::password::{CredentialHasher, PasswordValidator};

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 50;

/// Self-registration input.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Full name (optional).
    pub full_name: Option<String>,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Creates accounts and rotates their passwords.
#[derive(Clone)]
pub struct AccountService {
    /// Credential store.
    store: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<CredentialHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("validator", &self.validator)
            .finish()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<CredentialHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
        }
    }

    /// Registers a regular, active user.
    pub async fn register(&self, account: NewAccount) -> AppResult<User> {
        self.create(account, UserRole::User).await
    }

    /// Seeds an admin account unless the username or email is already taken.
    ///
    /// Returns `None` when an account answering to either handle exists.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let username = username.trim();
        let email = email.trim();

        for handle in [username, email] {
            if self.store.find_by_handle_or_email(handle).await?.is_some() {
                info!(username = %username, "Bootstrap admin already present");
                return Ok(None);
            }
        }

        let account = NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: None,
        };
        let admin = self.create(account, UserRole::Admin).await?;
        info!(user_id = %admin.id, username = %admin.username, "Bootstrap admin created");
        Ok(Some(admin))
    }

    async fn create(&self, account: NewAccount, role: UserRole) -> AppResult<User> {
        let username = account.username.trim();
        let email = account.email.trim();

        validate_username(username)?;
        validate_email(email)?;
        self.validator
            .validate(&account.password, &[username, email])?;

        let password_hash = self.hasher.hash_blocking(&account.password).await?;

        let full_name = account
            .full_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let user = self
            .store
            .create(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                full_name,
                role,
                is_active: true,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Fetches a user record by id.
    pub async fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Marks an account inactive.
    ///
    /// Users may deactivate themselves; deactivating anyone else requires the
    /// admin role. The target's outstanding tokens stop working on their next
    /// request because every request re-checks the active flag.
    pub async fn deactivate(&self, actor: &Subject, target: UserId) -> Result<User, AuthError> {
        if actor.id != target && !actor.role.is_admin() {
            warn!(actor_id = %actor.id, target_id = %target, "Deactivation refused");
            return Err(AuthError::Forbidden {
                role: actor.role,
                required: RoleRequirement::admin_only(),
            });
        }

        let user = self.store.set_active(target, false).await?;
        info!(actor_id = %actor.id, user_id = %user.id, "User deactivated");
        Ok(user)
    }

    /// Changes a user's password after re-verifying the current one.
    ///
    /// Tokens issued before the change remain valid until they expire.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self.get_user(user_id).await?;

        if !self
            .hasher
            .verify_blocking(current_password, &user.password_hash)
            .await?
        {
            warn!(user_id = %user_id, "Password change refused: current password incorrect");
            return Err(AuthError::InvalidCredentials);
        }

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator
            .validate(new_password, &[&user.username, &user.email])?;

        let new_hash = self.hasher.hash_blocking(new_password).await?;
        self.store.update_password_hash(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }

    let mut chars = username.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation("Username must start with a letter"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::validation(
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    if !email.validate_email() {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}
