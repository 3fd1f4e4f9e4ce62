//! Claims carried by access and refresh tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use gatekeep_core::{TokenId, UserId};
use gatekeep_entity::user::{User, UserRole};

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token authorizing individual requests.
    Access,
    /// Long-lived token used only to obtain a new pair.
    Refresh,
}

impl TokenKind {
    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject attributes embedded in a token.
///
/// These are a snapshot taken at issuance, for display only. Authorization
/// decisions re-read the live record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectClaims {
    /// The user ID.
    pub id: UserId,
    /// Username at issuance.
    pub username: String,
    /// Email at issuance.
    pub email: String,
    /// Role at issuance.
    pub role: UserRole,
}

impl From<&User> for SubjectClaims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user ID.
    pub sub: UserId,
    /// Username snapshot.
    pub username: String,
    /// Email snapshot.
    pub email: String,
    /// Role snapshot.
    pub role: UserRole,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Issued-at timestamp (seconds since epoch, UTC).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch, UTC).
    pub exp: i64,
    /// Unique token ID.
    pub jti: TokenId,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        self.sub
    }

    /// Returns the embedded subject snapshot.
    pub fn subject(&self) -> SubjectClaims {
        SubjectClaims {
            id: self.sub,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Whether the token is expired at `now`; a token expiring this very second is.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Returns the lifetime the token was minted with, in seconds.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}
