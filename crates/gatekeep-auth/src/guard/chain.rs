//! The ordered authorization gates and their common compositions.
//!
//! ```text
//! NoToken -> Gate 1 -> TokenInvalid | TokenValidWrongKind | Decoded
//!         -> Gate 2 -> SubjectUnknown | SubjectResolved
//!         -> Gate 3 -> Disabled | Active
//!         -> Gate 4 -> InsufficientRole | Authorized
//! ```
//!
//! Each gate either hands the resolved value forward or stops with its own
//! error. Gates never revisit an earlier stage.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gatekeep_core::UserId;
use gatekeep_entity::user::{User, UserRole};
use gatekeep_store::UserStore;

use super::bearer::{TokenPresence, require_token};
use super::requirement::RoleRequirement;
use crate::error::{AuthError, TokenRejection};
use crate::jwt::{Claims, TokenCodec, TokenKind};

/// An authenticated, active identity read from the live store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// User ID.
    pub id: UserId,
    /// Current username.
    pub username: String,
    /// Current email.
    pub email: String,
    /// Full name, if set.
    pub full_name: Option<String>,
    /// Current role.
    pub role: UserRole,
    /// Last interactive login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for Subject {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            last_login_at: user.last_login_at,
        }
    }
}

/// Gate 3: an inactive account is `AccountDisabled`.
pub fn require_active(user: User) -> Result<Subject, AuthError> {
    if !user.is_active {
        debug!(user_id = %user.id, "Authorization stopped: account disabled");
        return Err(AuthError::AccountDisabled);
    }
    Ok(Subject::from(user))
}

/// Gate 4: the subject's live role must satisfy `requirement`.
pub fn require_role(subject: &Subject, requirement: &RoleRequirement) -> Result<(), AuthError> {
    if requirement.is_satisfied_by(subject.role) {
        Ok(())
    } else {
        debug!(user_id = %subject.id, role = %subject.role, %requirement, "Authorization stopped: insufficient role");
        Err(AuthError::Forbidden {
            role: subject.role,
            required: requirement.clone(),
        })
    }
}

/// Runs the token-dependent gates against a codec and the live store.
#[derive(Clone)]
pub struct AuthorizationChain {
    /// Token verification.
    codec: Arc<TokenCodec>,
    /// Credential store.
    store: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AuthorizationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationChain")
            .field("codec", &self.codec)
            .finish()
    }
}

impl AuthorizationChain {
    /// Creates a new chain.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn UserStore>) -> Self {
        Self { codec, store }
    }

    /// Gate 1: verify the token and require `kind == access`.
    pub fn decode_access(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.codec.decode(token)?;
        if claims.kind != TokenKind::Access {
            debug!(user_id = %claims.sub, kind = %claims.kind, "Authorization stopped: wrong token kind");
            return Err(TokenRejection::WrongKind {
                expected: TokenKind::Access,
                found: claims.kind,
            }
            .into());
        }
        Ok(claims)
    }

    /// Gate 2: fetch the subject by the token's id; the snapshot is ignored.
    pub async fn resolve_subject(&self, claims: &Claims) -> Result<User, AuthError> {
        match self.store.find_by_id(claims.user_id()).await? {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = %claims.sub, "Authorization stopped: unknown subject");
                Err(AuthError::Unauthenticated)
            }
        }
    }

    /// Gates 1-3 for a token already known to be present.
    pub async fn authenticate_token(&self, token: &str) -> Result<Subject, AuthError> {
        let claims = self.decode_access(token)?;
        let user = self.resolve_subject(&claims).await?;
        require_active(user)
    }

    /// Gates 0-3 with a mandatory token: "any authenticated user".
    pub async fn authenticate(&self, raw: Option<&str>) -> Result<Subject, AuthError> {
        let token = require_token(raw)?;
        self.authenticate_token(token).await
    }

    /// Gates 0-3 with the given presence policy.
    ///
    /// A token that is present but fails any gate is an error under either
    /// policy; only absence differs.
    pub async fn resolve(
        &self,
        raw: Option<&str>,
        presence: TokenPresence,
    ) -> Result<Option<Subject>, AuthError> {
        let token = match (raw, presence) {
            (None, TokenPresence::Optional) => return Ok(None),
            (raw, _) => require_token(raw)?,
        };
        self.authenticate_token(token).await.map(Some)
    }

    /// Gates 1-3 when a token is present; absence yields no subject.
    pub async fn authenticate_optional(
        &self,
        raw: Option<&str>,
    ) -> Result<Option<Subject>, AuthError> {
        self.resolve(raw, TokenPresence::Optional).await
    }

    /// All gates: mandatory token, then `requirement`.
    pub async fn authorize(
        &self,
        raw: Option<&str>,
        requirement: &RoleRequirement,
    ) -> Result<Subject, AuthError> {
        let subject = self.authenticate(raw).await?;
        require_role(&subject, requirement)?;
        Ok(subject)
    }
}
