//! Session establishment and renewal.
//!
//! Sessions are stateless: a session is nothing more than the token pair
//! the client holds.

pub mod authenticator;
pub mod issuer;
pub mod renewal;

pub use authenticator::Authenticator;
pub use issuer::{TokenIssuer, TokenPair};
pub use renewal::SessionRenewal;
