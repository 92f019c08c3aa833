//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! various error conditions that can occur, from database issues to authorization failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies of the shape
//! `{"status": "error", "message": ...}` (validation failures additionally carry a
//! field-level `errors` array). It also provides `From` trait implementations for
//! common error types like `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError`, allowing for easy
//! conversion using the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, often carrying a message
/// detailing the issue. These errors are then converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request carried no usable credential (HTTP 401).
    /// Used when the bearer token is missing or an identity could not be established.
    Unauthenticated(String),
    /// The credential was present but invalid or insufficient for the action (HTTP 403).
    /// Covers failed token verification and authorization policy violations.
    Forbidden(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint was violated, e.g. duplicate email (HTTP 400).
    Conflict(String),
    /// The presented password-reset token did not match any user or has expired (HTTP 400).
    InvalidResetToken(String),
    /// Represents an error due to failed input validation (HTTP 400).
    /// Wraps errors from the `validator` crate so field-level detail can be reported.
    ValidationFailed(ValidationErrors),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate; detail is logged, never sent to clients.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidResetToken(msg) => write!(f, "Invalid Reset Token: {}", msg),
            AppError::ValidationFailed(errors) => write!(f, "Validation Failed: {}", errors),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Flattens `validator::ValidationErrors` into a `[{field, message}]` array
/// suitable for the response body.
fn validation_detail(errors: &ValidationErrors) -> serde_json::Value {
    let fields: Vec<serde_json::Value> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                json!({ "field": field, "message": message })
            })
        })
        .collect();
    json!(fields)
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error responses.
/// Internal and database errors are logged server-side and presented to the client
/// as a generic message.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated(msg) => HttpResponse::Unauthorized().json(json!({
                "status": "error",
                "message": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "status": "error",
                "message": msg
            })),
            AppError::Conflict(msg) | AppError::InvalidResetToken(msg) => {
                HttpResponse::BadRequest().json(json!({
                    "status": "error",
                    "message": msg
                }))
            }
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "status": "error",
                "message": msg
            })),
            AppError::ValidationFailed(errors) => HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Validation failed",
                "errors": validation_detail(errors)
            })),
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                // Internal detail stays in the logs.
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "status": "error",
                    "message": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` is mapped to `AppError::NotFound`,
/// while other database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationFailed`,
/// preserving field-level detail.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::ValidationFailed(errors)
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Forbidden`.
///
/// A token that fails verification is a present-but-invalid credential.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Forbidden(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_error_responses() {
        // Test Unauthenticated
        let error = AppError::Unauthenticated("Missing token".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        // Test Forbidden
        let error = AppError::Forbidden("Access denied".into());
        let response = error.error_response();
        assert_eq!(response.status(), 403);

        // Test NotFound
        let error = AppError::NotFound("Resource not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        // Conflict and reset-token failures surface as 400, matching the API contract.
        let error = AppError::Conflict("User already exists".into());
        assert_eq!(error.error_response().status(), 400);
        let error = AppError::InvalidResetToken("Token is invalid or has expired".into());
        assert_eq!(error.error_response().status(), 400);

        // Test InternalServerError
        let error = AppError::InternalServerError("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_validation_failure_carries_field_detail() {
        let probe = Probe {
            email: "not-an-email".into(),
        };
        let errors = probe.validate().unwrap_err();
        let detail = validation_detail(&errors);
        let fields = detail.as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["field"], "email");

        let error: AppError = errors.into();
        assert_eq!(error.error_response().status(), 400);
    }
}
