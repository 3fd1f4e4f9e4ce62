//! Signed token encoding and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use gatekeep_core::config::AuthConfig;
use gatekeep_core::{AppError, AppResult, TokenId};

use super::claims::{Claims, SubjectClaims, TokenKind};
use crate::error::TokenRejection;

/// The only algorithm ever produced or accepted.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed token and its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact `header.payload.signature` string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Encodes and verifies HS256-signed tokens with a single shared secret.
///
/// The codec is kind-agnostic: it stamps the kind on encode but does not
/// enforce it on decode.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.signing_secret.as_bytes())
    }

    /// Creates a codec from a raw secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = true;
        // Expiry is checked strictly after decoding.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs a token for `subject` that expires `ttl` from now.
    pub fn encode(
        &self,
        subject: &SubjectClaims,
        kind: TokenKind,
        ttl: Duration,
    ) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            AppError::configuration(format!("{kind} token lifetime is out of range"))
        })?;

        let claims = Claims {
            sub: subject.id,
            username: subject.username.clone(),
            email: subject.email.clone(),
            role: subject.role,
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: TokenId::new(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies the signature, then the expiry, and returns the claims.
    ///
    /// Claims are never returned from a token whose signature did not verify.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenRejection> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let rejection = match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenRejection::Expired,
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenRejection::BadSignature
                }
                _ => TokenRejection::Malformed,
            };
            debug!(reason = %rejection, "Token rejected");
            rejection
        })?;

        let claims = data.claims;
        if claims.is_expired_at(Utc::now().timestamp()) {
            debug!(user_id = %claims.sub, kind = %claims.kind, "Token rejected at expiry boundary");
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}
