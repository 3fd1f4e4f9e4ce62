//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `GATEKEEP__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod auth;
pub mod bootstrap;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::bootstrap::BootstrapConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Built once at startup and then shared read-only; every component receives
/// the section it needs at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token and credential settings.
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Startup account seeding.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml` with the `config/{env}.toml` overlay and
    /// environment variables such as `GATEKEEP__AUTH__SIGNING_SECRET`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATEKEEP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::finish(config)
    }

    /// Load configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::finish(config)
    }

    fn finish(config: config::Config) -> Result<Self, AppError> {
        let app: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        app.auth.validate()?;
        Ok(app)
    }
}
