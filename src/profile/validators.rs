// src/profile/validators.rs

use super::models::SetUsernameRequest;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Username Validator
// ============================================================================

pub struct UsernameValidator;

impl Validator<SetUsernameRequest> for UsernameValidator {
    fn validate(&self, data: &SetUsernameRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let username = data.username.trim();

        if username.len() < 3 {
            result.add_error("username", "Username must be at least 3 characters long");
        }

        if username.len() > 30 {
            result.add_error("username", "Username must be at most 30 characters");
        }

        // Allowed pattern: [A-Za-z0-9_]+
        if !username.is_empty()
            && !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            result.add_error(
                "username",
                "Username can only contain letters, numbers, and underscores",
            );
        }

        result
    }
}
