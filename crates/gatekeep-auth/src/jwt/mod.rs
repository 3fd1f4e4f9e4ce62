//! Signed token encoding, decoding, and claims.

pub mod claims;
pub mod codec;

pub use claims::{Claims, SubjectClaims, TokenKind};
pub use codec::{IssuedToken, TokenCodec};
