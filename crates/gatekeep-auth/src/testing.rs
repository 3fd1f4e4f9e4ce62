//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatekeep_core::config::AuthConfig;
use gatekeep_core::{AppError, AppResult, UserId};
use gatekeep_entity::user::{CreateUser, User, UserRole};
use gatekeep_store::{MemoryUserStore, UserStore};

use crate::account::AccountService;
use crate::guard::AuthorizationChain;
use crate::jwt::TokenCodec;
use crate::password::{CredentialHasher, PasswordValidator};
use crate::session::{Authenticator, SessionRenewal, TokenIssuer};

pub(crate) const SECRET: &str = "unit-test-signing-secret-0123456789abcdef";

/// Default TTLs with an Argon2 cost cheap enough for tests.
pub(crate) fn auth_config() -> AuthConfig {
    let mut config = AuthConfig::with_secret(SECRET);
    config.hash_cost_factor = 1;
    config.hash_memory_kib = 1024;
    config
}

pub(crate) fn hasher() -> CredentialHasher {
    CredentialHasher::new(&auth_config()).expect("test argon2 params are valid")
}

/// A memory store wired to every service in the crate.
pub(crate) struct Fixture {
    pub store: Arc<MemoryUserStore>,
    pub codec: Arc<TokenCodec>,
    pub hasher: CredentialHasher,
    pub issuer: Arc<TokenIssuer>,
    pub config: AuthConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let config = auth_config();
        let codec = Arc::new(TokenCodec::new(&config));
        let issuer = Arc::new(TokenIssuer::new(codec.clone(), &config));
        Self {
            store: Arc::new(MemoryUserStore::new()),
            codec,
            hasher: hasher(),
            issuer,
            config,
        }
    }

    fn dyn_store(&self) -> Arc<dyn UserStore> {
        self.store.clone()
    }

    /// Stores a user with email `{username}@example.com`, bypassing the password policy.
    pub async fn add_user(&self, username: &str, password: &str, role: UserRole, active: bool) -> User {
        let password_hash = self.hasher.hash(password).expect("hashing succeeds");
        self.store
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash,
                full_name: None,
                role,
                is_active: active,
            })
            .await
            .expect("fixture user is unique")
    }

    pub async fn find(&self, id: UserId) -> User {
        self.store
            .find_by_id(id)
            .await
            .expect("store is healthy")
            .expect("user exists")
    }

    /// A well-formed user that was never stored.
    pub fn detached_user(username: &str) -> User {
        CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: String::new(),
            full_name: None,
            role: UserRole::User,
            is_active: true,
        }
        .into_user(Utc::now())
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(
            self.dyn_store(),
            Arc::new(self.hasher.clone()),
            self.issuer.clone(),
        )
    }

    pub fn renewal(&self) -> SessionRenewal {
        SessionRenewal::new(self.codec.clone(), self.dyn_store(), self.issuer.clone())
    }

    pub fn chain(&self) -> AuthorizationChain {
        AuthorizationChain::new(self.codec.clone(), self.dyn_store())
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(
            self.dyn_store(),
            Arc::new(self.hasher.clone()),
            Arc::new(PasswordValidator::new(&self.config)),
        )
    }
}

/// A store whose every call fails.
pub(crate) struct FailingStore;

fn unavailable<T>() -> AppResult<T> {
    Err(AppError::storage("user store unavailable"))
}

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_handle_or_email(&self, _handle: &str) -> AppResult<Option<User>> {
        unavailable()
    }

    async fn find_by_id(&self, _id: UserId) -> AppResult<Option<User>> {
        unavailable()
    }

    async fn update_last_login(&self, _id: UserId, _at: DateTime<Utc>) -> AppResult<()> {
        unavailable()
    }

    async fn create(&self, _data: CreateUser) -> AppResult<User> {
        unavailable()
    }

    async fn update_password_hash(&self, _id: UserId, _password_hash: &str) -> AppResult<()> {
        unavailable()
    }

    async fn set_active(&self, _id: UserId, _is_active: bool) -> AppResult<User> {
        unavailable()
    }

    async fn set_role(&self, _id: UserId, _role: UserRole) -> AppResult<User> {
        unavailable()
    }
}
