//! Request handlers, one module per route group.

pub mod auth;
pub mod health;
pub mod user;
