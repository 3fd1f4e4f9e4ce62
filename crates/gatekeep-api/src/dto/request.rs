//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatekeep_auth::NewAccount;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Full name.
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
}

impl From<RegisterRequest> for NewAccount {
    fn from(req: RegisterRequest) -> Self {
        NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        }
    }
}

/// Login request body. `username` also accepts an email address.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1))]
    pub new_password: String,
}
