use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::account::AccountSummary;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 120))]
    pub name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub account: AccountSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str) -> RegisterPayload {
        RegisterPayload {
            name: name.into(),
            email: "asha@example.com".into(),
            password: "secret1".into(),
            role: "worker".into(),
        }
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let errors = register("   ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn ordinary_registration_passes() {
        assert!(register("Asha Rao").validate().is_ok());
    }
}
