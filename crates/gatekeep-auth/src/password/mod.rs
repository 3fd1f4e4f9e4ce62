//! Password hashing and policy enforcement.

pub mod hasher;
pub mod validator;

pub use hasher::CredentialHasher;
pub use validator::PasswordValidator;
