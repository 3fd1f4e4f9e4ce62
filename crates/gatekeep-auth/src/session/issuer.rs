//! Token pair minting shared by login and renewal.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use gatekeep_core::AppResult;
use gatekeep_core::config::AuthConfig;
use gatekeep_entity::user::User;

use crate::jwt::{SubjectClaims, TokenCodec, TokenKind};

/// Result of a successful token pair generation.
///
/// Successive pairs are independent; nothing links a pair to the one it replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Mints access + refresh pairs with the configured lifetimes.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    /// Signing codec.
    codec: Arc<TokenCodec>,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(codec: Arc<TokenCodec>, config: &AuthConfig) -> Self {
        Self::with_ttls(codec, config.access_token_ttl(), config.refresh_token_ttl())
    }

    /// Creates an issuer with explicit lifetimes.
    pub fn with_ttls(codec: Arc<TokenCodec>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            codec,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Generates a new pair carrying a snapshot of `user`.
    pub fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        let subject = SubjectClaims::from(user);

        let access = self
            .codec
            .encode(&subject, TokenKind::Access, self.access_ttl)?;
        let refresh = self
            .codec
            .encode(&subject, TokenKind::Refresh, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "bearer".to_string(),
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Returns the codec used for signing.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}
