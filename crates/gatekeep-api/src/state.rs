//! Application state shared across all handlers.

use std::sync::Arc;

use gatekeep_auth::{
    AccountService, Authenticator, AuthorizationChain, CredentialHasher, PasswordValidator,
    SessionRenewal, TokenCodec, TokenIssuer,
};
use gatekeep_core::AppResult;
use gatekeep_core::config::AppConfig;
use gatekeep_store::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login flow
    pub authenticator: Arc<Authenticator>,
    /// Refresh-token exchange
    pub renewal: Arc<SessionRenewal>,
    /// Authorization gates
    pub chain: Arc<AuthorizationChain>,
    /// Registration and password changes
    pub accounts: Arc<AccountService>,
}

impl AppState {
    /// Wires every auth service to `store` using `config`.
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> AppResult<Self> {
        let hasher = Arc::new(CredentialHasher::new(&config.auth)?);
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let codec = Arc::new(TokenCodec::new(&config.auth));
        let issuer = Arc::new(TokenIssuer::new(codec.clone(), &config.auth));

        Ok(Self {
            authenticator: Arc::new(Authenticator::new(
                store.clone(),
                hasher.clone(),
                issuer.clone(),
            )),
            renewal: Arc::new(SessionRenewal::new(codec.clone(), store.clone(), issuer)),
            chain: Arc::new(AuthorizationChain::new(codec, store.clone())),
            accounts: Arc::new(AccountService::new(store, hasher, validator)),
            config: Arc::new(config),
        })
    }
}
