//! Bearer token extraction from a transport credential value.

use crate::error::AuthError;

/// Whether an entry point insists on a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPresence {
    /// Absence fails with `Unauthenticated`.
    Mandatory,
    /// Absence proceeds with no subject.
    Optional,
}

/// Pulls the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Gate 0 (mandatory branch): absence of a token is `Unauthenticated`.
pub fn require_token(raw: Option<&str>) -> Result<&str, AuthError> {
    raw.ok_or(AuthError::Unauthenticated)
}
