//! Interactive login: credential verification and token issuance.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use gatekeep_store::UserStore;

use super::issuer::{TokenIssuer, TokenPair};
use crate::error::AuthError;
use crate::password::CredentialHasher;

/// Verifies a login attempt and produces a token pair.
#[derive(Clone)]
pub struct Authenticator {
    /// Credential store.
    store: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<CredentialHasher>,
    /// Pair minting.
    issuer: Arc<TokenIssuer>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Authenticator {
    /// Creates a new authenticator.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<CredentialHasher>,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Resolve `handle` by username or email
    /// 2. Verify the password (unknown handle and wrong password fail alike)
    /// 3. Reject inactive accounts
    /// 4. Mint an access + refresh pair
    /// 5. Record the login time
    ///
    /// The last-login write is the only side effect and happens only once the
    /// pair exists.
    pub async fn login(&self, handle: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.store.find_by_handle_or_email(handle).await? else {
            self.hasher.verify_dummy_blocking(password).await?;
            warn!("Login failed: unknown handle");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify_blocking(password, &user.password_hash)
            .await?
        {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login refused: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        let tokens = self.issuer.issue_pair(&user)?;
        self.store.update_last_login(user.id, Utc::now()).await?;

        info!(user_id = %user.id, role = %user.role, "Login successful");
        Ok(tokens)
    }
}
