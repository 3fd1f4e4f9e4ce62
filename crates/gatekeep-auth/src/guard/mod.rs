//! Composable authorization gates.
//!
//! - Gate 0: token extraction (`bearer`)
//! - Gate 1: decode and kind check
//! - Gate 2: subject resolution against the live store
//! - Gate 3: active-account check
//! - Gate 4: role check (`requirement`)

pub mod bearer;
pub mod chain;
pub mod requirement;

pub use bearer::{TokenPresence, extract_bearer, require_token};
pub use chain::{AuthorizationChain, Subject, require_active, require_role};
pub use requirement::RoleRequirement;
