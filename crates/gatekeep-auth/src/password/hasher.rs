//! Argon2id password hashing and verification.

use std::sync::{Arc, OnceLock};

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use gatekeep_core::config::AuthConfig;
use gatekeep_core::{AppError, AppResult};

/// Plaintext behind the hash that unknown-account logins are checked against.
const DUMMY_PASSWORD: &str = "gatekeep-dummy-credential";

/// One-way, salted password hashing with Argon2id.
///
/// The salt and cost parameters are embedded in the PHC output string, so
/// verification needs nothing but the stored hash. Hashing is deliberately
/// slow; async callers should use [`hash_blocking`](Self::hash_blocking) and
/// [`verify_blocking`](Self::verify_blocking).
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    /// Cost parameters for new hashes.
    params: Params,
    /// Hash of [`DUMMY_PASSWORD`] under `params`, computed on first use.
    dummy_hash: Arc<OnceLock<String>>,
}

impl CredentialHasher {
    /// Creates a hasher from the configured cost factors.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_cost_factor,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            params,
            dummy_hash: Arc::new(OnceLock::new()),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `false` for a mismatch and for any stored hash that cannot be
    /// parsed; a corrupted record denies access instead of failing the caller.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be checked");
                false
            }
        }
    }

    fn dummy_hash(&self) -> AppResult<&str> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash);
        }
        let hash = self.hash(DUMMY_PASSWORD)?;
        Ok(self.dummy_hash.get_or_init(|| hash))
    }

    /// Performs a full verification against a fixed dummy hash and discards
    /// the outcome.
    ///
    /// Callers that found no account use this so the miss costs the same as
    /// a wrong password.
    pub fn verify_dummy(&self, plaintext: &str) -> AppResult<()> {
        let dummy = self.dummy_hash()?;
        let _ = self.verify(plaintext, dummy);
        Ok(())
    }

    /// Runs [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, plaintext: &str) -> AppResult<String> {
        let hasher = self.clone();
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Runs [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_blocking(&self, plaintext: &str, stored_hash: &str) -> AppResult<bool> {
        let hasher = self.clone();
        let plaintext = plaintext.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored_hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))
    }

    /// Runs [`verify_dummy`](Self::verify_dummy) on the blocking thread pool.
    pub async fn verify_dummy_blocking(&self, plaintext: &str) -> AppResult<()> {
        let hasher = self.clone();
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify_dummy(&plaintext))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }
}
