//! # gatekeep-store
//!
//! The credential store contract consumed by the auth core, plus an
//! in-memory implementation for single-node deployments and tests.
//!
//! ## Modules
//!
//! - `user`: the [`UserStore`] trait
//! - `memory`: [`MemoryUserStore`], a lock-guarded map implementation

pub mod memory;
pub mod user;

pub use memory::MemoryUserStore;
pub use user::UserStore;
