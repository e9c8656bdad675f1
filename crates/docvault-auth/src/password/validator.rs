//! Password policy enforcement for new passwords.

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against the configured policy.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the violation.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(min: usize) -> PasswordValidator {
        PasswordValidator { min_length: min }
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(validator(8).validate("short").is_err());
    }

    #[test]
    fn test_minimum_length_accepted() {
        assert!(validator(8).validate("12345678").is_ok());
    }
}
