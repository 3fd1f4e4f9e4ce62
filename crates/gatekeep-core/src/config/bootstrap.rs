//! Startup account seeding.

use serde::{Deserialize, Serialize};

/// Optional administrator account created when the server starts.
///
/// Seeding happens only when all three fields are present.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Login name of the seeded administrator.
    #[serde(default)]
    pub admin_username: Option<String>,
    /// Email of the seeded administrator.
    #[serde(default)]
    pub admin_email: Option<String>,
    /// Plaintext password, hashed at startup.
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl BootstrapConfig {
    /// Returns `(username, email, password)` when seeding is fully configured.
    pub fn admin(&self) -> Option<(&str, &str, &str)> {
        match (&self.admin_username, &self.admin_email, &self.admin_password) {
            (Some(username), Some(email), Some(password)) => {
                Some((username.as_str(), email.as_str(), password.as_str()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
