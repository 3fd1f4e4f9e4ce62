//! # gatekeep-auth
//!
//! Authentication and authorization core for Gatekeep.
//!
//! ## Modules
//!
//! - `password`: Argon2id credential hashing and password policy
//! - `jwt`: HS256 signed tokens and their claims
//! - `session`: login and refresh-token renewal
//! - `guard`: bearer extraction and the ordered authorization gates
//! - `account`: registration, password changes, admin seeding
//! - `error`: the authentication error taxonomy

pub mod account;
pub mod error;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountService, NewAccount};
pub use error::{AuthError, TokenRejection};
pub use guard::{AuthorizationChain, RoleRequirement, Subject};
pub use jwt::{Claims, TokenCodec, TokenKind};
pub use password::{CredentialHasher, PasswordValidator};
pub use session::{Authenticator, SessionRenewal, TokenIssuer, TokenPair};
