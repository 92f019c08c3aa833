use crate::error::AppError;
use crate::models::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in hours when `JWT_EXPIRATION_HOURS` is not set.
const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Role carried by the token so protected handlers need no store lookup.
    pub role: Role,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

fn jwt_secret() -> Result<String, AppError> {
    std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))
}

fn expiration_hours() -> i64 {
    std::env::var("JWT_EXPIRATION_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or(DEFAULT_EXPIRATION_HOURS)
}

/// Generates a JWT for a given user id and role.
///
/// The token expires after `JWT_EXPIRATION_HOURS` (default 24) and is signed
/// with the `JWT_SECRET` environment variable using HS256.
///
/// # Returns
/// A `Result` containing the JWT string if successful.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set or if
/// token encoding fails.
pub fn generate_token(user_id: Uuid, role: Role) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::hours(expiration_hours()))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    let secret = jwt_secret()?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// Default validation checks are applied (signature, expiration).
///
/// # Returns
/// A `Result` containing the decoded `Claims` if the token is valid.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set.
/// Returns `AppError::Forbidden` if the token is malformed, its signature is
/// invalid, or it has expired — a present-but-unusable credential.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = jwt_secret()?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Forbidden(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static JWT_ENV_LOCK: Mutex<()> = Mutex::new(());

    // Helper to run test logic with a temporarily set JWT_SECRET
    fn run_with_temp_jwt_secret<F>(secret_value: &str, test_logic: F)
    where
        F: FnOnce(),
    {
        let _guard = JWT_ENV_LOCK.lock().unwrap();

        let original_secret_val = std::env::var("JWT_SECRET").ok();
        std::env::set_var("JWT_SECRET", secret_value);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test_logic));

        if let Some(original) = original_secret_val {
            std::env::set_var("JWT_SECRET", original);
        } else {
            std::env::remove_var("JWT_SECRET");
        }

        if let Err(panic_payload) = result {
            std::panic::resume_unwind(panic_payload);
        }
    }

    #[test]
    fn test_token_round_trip_preserves_identity() {
        run_with_temp_jwt_secret("test_secret_for_gen_verify", || {
            let user_id = Uuid::new_v4();
            let token = generate_token(user_id, Role::Admin).unwrap();
            let claims = verify_token(&token).unwrap();
            assert_eq!(claims.sub, user_id);
            assert_eq!(claims.role, Role::Admin);
            assert!(claims.exp > claims.iat);

            let token = generate_token(user_id, Role::User).unwrap();
            let claims = verify_token(&token).unwrap();
            assert_eq!(claims.role, Role::User);
        });
    }

    #[test]
    fn test_token_expiration() {
        run_with_temp_jwt_secret("test_secret_for_expiration", || {
            let now = chrono::Utc::now();
            let claims_expired = Claims {
                sub: Uuid::new_v4(),
                role: Role::User,
                iat: (now - chrono::Duration::hours(3)).timestamp() as usize,
                exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
            };
            let expired_token = encode(
                &Header::default(),
                &claims_expired,
                &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
            )
            .unwrap();

            match verify_token(&expired_token) {
                Err(AppError::Forbidden(msg)) => {
                    assert!(
                        msg.contains("ExpiredSignature"),
                        "Unexpected error message for expired token: {}",
                        msg
                    );
                }
                Ok(_) => panic!("Token should have been invalid due to expiration"),
                Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
            }
        });
    }

    #[test]
    fn test_tampered_token_signature() {
        run_with_temp_jwt_secret("a_completely_different_secret", || {
            // Sign with one secret, verify against another.
            let token = {
                let claims = Claims {
                    sub: Uuid::new_v4(),
                    role: Role::Admin,
                    iat: chrono::Utc::now().timestamp() as usize,
                    exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
                };
                encode(
                    &Header::default(),
                    &claims,
                    &EncodingKey::from_secret("attacker_secret".as_bytes()),
                )
                .unwrap()
            };

            match verify_token(&token) {
                Err(AppError::Forbidden(msg)) => {
                    assert!(
                        msg.contains("InvalidSignature") || msg.contains("InvalidToken"),
                        "Unexpected error message for invalid signature: {}",
                        msg
                    );
                }
                Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
                Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
            }
        });
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        run_with_temp_jwt_secret("some_secret", || {
            assert!(matches!(
                verify_token("not-a-jwt-at-all"),
                Err(AppError::Forbidden(_))
            ));
        });
    }
}
