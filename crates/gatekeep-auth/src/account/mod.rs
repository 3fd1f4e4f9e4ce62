//! Account lifecycle: self-registration, password changes, admin seeding.

pub mod service;

pub use service::{AccountService, NewAccount};
