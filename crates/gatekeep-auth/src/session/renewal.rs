//! Refresh-token exchange for a fresh token pair.

use std::sync::Arc;

use tracing::{info, warn};

use gatekeep_store::UserStore;

use super::issuer::{TokenIssuer, TokenPair};
use crate::error::{AuthError, TokenRejection};
use crate::jwt::{TokenCodec, TokenKind};

/// Exchanges a valid refresh token for a brand-new pair.
///
/// Refresh tokens are not rotated or tracked: a refresh token stays usable
/// until its own expiry, even after it has been exchanged.
#[derive(Clone)]
pub struct SessionRenewal {
    /// Token verification.
    codec: Arc<TokenCodec>,
    /// Credential store.
    store: Arc<dyn UserStore>,
    /// Pair minting.
    issuer: Arc<TokenIssuer>,
}

impl std::fmt::Debug for SessionRenewal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRenewal")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl SessionRenewal {
    /// Creates a new renewal service.
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn UserStore>,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            codec,
            store,
            issuer,
        }
    }

    /// Refreshes a session:
    ///
    /// 1. Decode the token (signature, expiry)
    /// 2. Require `kind == refresh`
    /// 3. Re-read the subject from the store, never from the token snapshot
    /// 4. Reject deleted or disabled accounts
    /// 5. Mint a new pair with the current role and handle
    ///
    /// Does not touch the last-login timestamp.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.codec.decode(refresh_token)?;

        if claims.kind != TokenKind::Refresh {
            warn!(user_id = %claims.sub, kind = %claims.kind, "Refresh refused: wrong token kind");
            return Err(TokenRejection::WrongKind {
                expected: TokenKind::Refresh,
                found: claims.kind,
            }
            .into());
        }

        let Some(user) = self.store.find_by_id(claims.user_id()).await? else {
            warn!(user_id = %claims.sub, "Refresh refused: subject no longer exists");
            return Err(TokenRejection::UnknownSubject.into());
        };

        if !user.is_active {
            warn!(user_id = %user.id, "Refresh refused: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        let tokens = self.issuer.issue_pair(&user)?;

        info!(user_id = %user.id, "Token refreshed");
        Ok(tokens)
    }
}
