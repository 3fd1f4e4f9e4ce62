//! Route definitions for the Gatekeep HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes, threading `state` through.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: register, login, refresh, me, status, password
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/status", get(handlers::auth::status))
        .route("/auth/password", post(handlers::auth::change_password))
}

/// User lookup (moderators and admins) and deactivation (self or admin)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(handlers::user::get_user))
        .route(
            "/users/{id}/deactivate",
            post(handlers::user::deactivate_user),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
