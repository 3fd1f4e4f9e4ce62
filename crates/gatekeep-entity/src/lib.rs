//! # gatekeep-entity
//!
//! Domain entities for Gatekeep: the stored credential record with its
//! account state, and the closed role enumeration.

pub mod user;

pub use user::{CreateUser, User, UserRole};
