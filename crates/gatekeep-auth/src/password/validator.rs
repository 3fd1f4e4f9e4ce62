//! Password policy enforcement for new passwords.

use gatekeep_core::config::AuthConfig;
use gatekeep_core::{AppError, AppResult};

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Minimum zxcvbn score.
    min_score: zxcvbn::Score,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: score_from_config(config.password_min_score),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> AppResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        // Penalizes passwords built from the username or email.
        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < self.min_score {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> AppResult<()> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

fn score_from_config(score: u8) -> zxcvbn::Score {
    match score {
        0 => zxcvbn::Score::Zero,
        1 => zxcvbn::Score::One,
        2 => zxcvbn::Score::Two,
        3 => zxcvbn::Score::Three,
        _ => zxcvbn::Score::Four,
    }
}
