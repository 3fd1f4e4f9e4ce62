//! Bearer-token extractors backed by the authorization chain.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use gatekeep_auth::guard::{RoleRequirement, Subject, TokenPresence, extract_bearer, require_role};

use crate::error::ApiError;
use crate::state::AppState;

/// Reads the bearer token from the `Authorization` header, if any.
///
/// A header with another scheme counts as no token.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer)
}

/// An authenticated, active subject (gates 0-3 with a mandatory token).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Subject);

impl AuthUser {
    /// Applies the role gate to this subject.
    pub fn require(&self, requirement: &RoleRequirement) -> Result<(), ApiError> {
        require_role(&self.0, requirement).map_err(ApiError::from)
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Subject;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let subject = state
            .chain
            .authenticate(bearer_token(parts))
            .await?;
        Ok(AuthUser(subject))
    }
}

/// Optional authentication: no token yields `None`, a bad token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Subject>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let subject = state
            .chain
            .resolve(bearer_token(parts), TokenPresence::Optional)
            .await?;
        Ok(MaybeAuthUser(subject))
    }
}
