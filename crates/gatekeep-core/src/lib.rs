//! # gatekeep-core
//!
//! Core crate for Gatekeep. Contains configuration schemas, typed
//! identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Gatekeep crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::id::{TokenId, UserId};
