//! Authentication and authorization outcomes surfaced to callers.

use thiserror::Error;

use gatekeep_core::{AppError, ErrorKind};
use gatekeep_entity::user::UserRole;

use crate::guard::RoleRequirement;
use crate::jwt::TokenKind;

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// Not a well-formed three-part signed token.
    #[error("token is malformed")]
    Malformed,
    /// Signature did not verify, or the header named a different algorithm.
    #[error("token signature is invalid")]
    BadSignature,
    /// `exp` is at or before the current second.
    #[error("token has expired")]
    Expired,
    /// Valid token presented where the other kind is required.
    #[error("expected {expected} token, got {found} token")]
    WrongKind {
        /// Kind the entry point requires.
        expected: TokenKind,
        /// Kind embedded in the token.
        found: TokenKind,
    },
    /// Signed and unexpired, but the subject no longer exists.
    #[error("token subject no longer exists")]
    UnknownSubject,
}

/// Terminal, non-retryable failure of a login, renewal, or authorization.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown handle or wrong password; the two are deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// The account exists and the credentials or token are valid, but it is inactive.
    #[error("Account is disabled")]
    AccountDisabled,
    /// The presented token cannot be used here.
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenRejection),
    /// No token where one is mandatory, or the token subject no longer exists.
    #[error("Authentication required")]
    Unauthenticated,
    /// The subject is authenticated and active but its role is insufficient.
    #[error("Role '{role}' does not satisfy requirement: {required}")]
    Forbidden {
        /// The subject's current role.
        role: UserRole,
        /// What the operation demanded.
        required: RoleRequirement,
    },
    /// Store or internal failure, propagated unmodified.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl AuthError {
    /// Returns the error kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::AccountDisabled => ErrorKind::AccountDisabled,
            Self::InvalidToken(_) => ErrorKind::InvalidToken,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Backend(e) => e.kind,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Backend(e) => e,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
