//! Application builder: wires router, tracing layer, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gatekeep_core::config::AppConfig;
use gatekeep_core::{AppError, AppResult};
use gatekeep_store::UserStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

/// Seeds the configured admin account, if any.
pub async fn seed_admin(state: &AppState) -> AppResult<()> {
    let Some((username, email, password)) = state.config.bootstrap.admin() else {
        return Ok(());
    };
    state
        .accounts
        .bootstrap_admin(username, email, password)
        .await?;
    Ok(())
}

/// Runs the Gatekeep server against `store` until Ctrl+C.
pub async fn run_server(config: AppConfig, store: Arc<dyn UserStore>) -> AppResult<()> {
    info!("Starting Gatekeep server...");

    if config.auth.has_weak_secret() {
        warn!("auth.signing_secret is shorter than 32 bytes; use a longer random secret");
    }

    let addr = config.server.bind_address();
    let state = AppState::new(config, store)?;
    seed_admin(&state).await?;

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Gatekeep server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Gatekeep server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
