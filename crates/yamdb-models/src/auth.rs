use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::validate_username;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Confirmation code is required"))]
    pub confirmation_code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup("critic", "critic@example.com").validate().is_ok());
        assert!(signup("", "critic@example.com").validate().is_err());
        assert!(signup("Me", "critic@example.com").validate().is_err());
        assert!(signup("critic", "critic").validate().is_err());
        assert!(
            signup("critic", &format!("{}@example.com", "a".repeat(250)))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_signup_reports_each_field() {
        let errors = signup("bad name", "nope").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_token_request_requires_both_fields() {
        let empty_code = TokenRequest {
            username: "critic".to_string(),
            confirmation_code: String::new(),
        };
        assert!(empty_code.validate().is_err());
    }
}
