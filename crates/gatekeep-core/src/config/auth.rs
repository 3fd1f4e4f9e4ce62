//! Authentication configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Secrets shorter than this are accepted but reported at startup.
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;

/// Longest accepted refresh token lifetime (one year).
pub const MAX_REFRESH_TTL_DAYS: u64 = 365;

/// Token signing and credential hashing configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC-SHA256 secret for token signing. Required.
    pub signing_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Argon2id time cost (number of passes).
    #[serde(default = "default_hash_cost")]
    pub hash_cost_factor: u32,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2id degree of parallelism.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
    /// Minimum length for new passwords.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn strength score (0-4) for new passwords.
    #[serde(default = "default_password_score")]
    pub password_min_score: u8,
}

impl AuthConfig {
    /// Creates a configuration with the given secret and default values elsewhere.
    pub fn with_secret(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            hash_cost_factor: default_hash_cost(),
            hash_memory_kib: default_hash_memory(),
            hash_parallelism: default_hash_parallelism(),
            password_min_length: default_password_min(),
            password_min_score: default_password_score(),
        }
    }

    /// Lifetime of access tokens. Saturates at `Duration::MAX` instead of overflowing.
    pub fn access_token_ttl(&self) -> Duration {
        i64::try_from(self.access_token_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or(Duration::MAX)
    }

    /// Lifetime of refresh tokens. Saturates at `Duration::MAX` instead of overflowing.
    pub fn refresh_token_ttl(&self) -> Duration {
        i64::try_from(self.refresh_token_ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .unwrap_or(Duration::MAX)
    }

    /// Rejects configurations that cannot produce a working auth core.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.signing_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.signing_secret must not be empty"));
        }
        if !(1..=MAX_ACCESS_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be between 1 and {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if !(1..=MAX_REFRESH_TTL_DAYS).contains(&self.refresh_token_ttl_days) {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_days must be between 1 and {MAX_REFRESH_TTL_DAYS}"
            )));
        }
        if self.password_min_score > 4 {
            return Err(AppError::configuration(
                "auth.password_min_score must be between 0 and 4",
            ));
        }
        Ok(())
    }

    /// Returns whether the signing secret is shorter than recommended.
    pub fn has_weak_secret(&self) -> bool {
        self.signing_secret.len() < RECOMMENDED_SECRET_BYTES
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("hash_cost_factor", &self.hash_cost_factor)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_parallelism", &self.hash_parallelism)
            .field("password_min_length", &self.password_min_length)
            .field("password_min_score", &self.password_min_score)
            .finish()
    }
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_hash_cost() -> u32 {
    2
}

fn default_hash_memory() -> u32 {
    19456
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_password_min() -> usize {
    8
}

fn default_password_score() -> u8 {
    2
}
