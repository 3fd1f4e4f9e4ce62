//! # gatekeep-api
//!
//! HTTP API layer for Gatekeep built on Axum.
//!
//! Provides the auth and user endpoints, bearer-token extractors, DTOs,
//! and the mapping from domain errors to status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server, seed_admin};
pub use error::ApiError;
pub use state::AppState;
