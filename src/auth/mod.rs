pub mod extractors;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod token;

use crate::models::{Role, UserProfile};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::Identity;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use policy::{authorize_task_action, TaskAction};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account, 2 to 50 characters.
    #[validate(length(min = 2, max = 50))]
    pub name: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account, 6 to 50 characters.
    #[validate(length(min = 6, max = 50))]
    pub password: String,
    /// Authorization tier; defaults to `User` when absent.
    pub role: Option<Role>,
}

/// Payload for requesting a password reset.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Payload for completing a password reset (the token travels in the path).
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6, max = 50))]
    pub password: String,
}

/// Response structure after successful login.
/// Contains the JWT access token and the authenticated user's public profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    /// The public profile of the authenticated user.
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Ann Example".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            role: None,
        };
        assert!(valid_register.validate().is_ok());

        let short_name_register = RegisterRequest {
            name: "A".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            role: None,
        };
        assert!(short_name_register.validate().is_err());

        let short_password_register = RegisterRequest {
            name: "Ann Example".to_string(),
            email: "test@example.com".to_string(),
            password: "12345".to_string(),
            role: Some(crate::models::Role::Admin),
        };
        assert!(short_password_register.validate().is_err());
    }

    #[test]
    fn test_reset_payload_validation() {
        let valid = ResetPasswordRequest {
            password: "newsecret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let too_short = ResetPasswordRequest {
            password: "short".to_string(),
        };
        assert!(too_short.validate().is_err());

        let bad_email = ForgotPasswordRequest {
            email: "nope".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }
}
