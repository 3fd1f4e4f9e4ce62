//! Gatekeep Server: authentication and authorization service.
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the HTTP server over an in-memory credential store.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use gatekeep_core::config::AppConfig;
use gatekeep_store::MemoryUserStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e:#}");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> anyhow::Result<AppConfig> {
    let env = std::env::var("GATEKEEP_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env).with_context(|| format!("loading configuration for env '{env}'"))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Gatekeep v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MemoryUserStore::new());
    gatekeep_api::run_server(config, store)
        .await
        .context("running HTTP server")?;

    Ok(())
}
