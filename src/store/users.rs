//! Credential store: owns user records and everything derived from a
//! plaintext password or reset token.
//!
//! Hashing happens inside this module. No caller ever stores a plaintext
//! password or reset token; `create` and `reset_password` take the plaintext,
//! hash it, and persist only the hash. Reads through [`UserStore::find_profile`]
//! never include the hash column.

use chrono::Utc;
use log::info;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::{
    generate_reset_token, hash_password, hash_reset_token, verify_password,
    RESET_TOKEN_TTL_MINUTES,
};
use crate::error::AppError;
use crate::models::{Role, User, UserProfile};
use crate::store::is_unique_violation;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, \
     password_reset_token, password_reset_expires, created_at, updated_at";

pub struct UserStore<'a> {
    pool: &'a PgPool,
}

impl<'a> UserStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Registers a new user with a freshly computed password hash.
    ///
    /// Fails with `Conflict` if the email is already taken. The duplicate
    /// check is done up front for a clean message; the unique constraint on
    /// `users.email` backs it under concurrent registration.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<UserProfile, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(password)?;

        let profile = sqlx::query_as::<_, UserProfile>(
            "INSERT INTO users (id, name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, email, role",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("User already exists".into())
            } else {
                e.into()
            }
        })?;

        info!("new user registered: {}", profile.id);
        Ok(profile)
    }

    /// Looks up a user by email (including the hash column, which normal
    /// reads omit) and verifies the password against the stored hash.
    ///
    /// Fails with `Unauthenticated` on unknown email or hash mismatch; the
    /// message does not distinguish the two cases.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        match user {
            Some(user) => {
                if verify_password(password, &user.password_hash)? {
                    Ok(user)
                } else {
                    Err(AppError::Unauthenticated("Invalid email or password".into()))
                }
            }
            None => Err(AppError::Unauthenticated("Invalid email or password".into())),
        }
    }

    /// Public profile for an existing user id.
    pub async fn find_profile(&self, id: Uuid) -> Result<UserProfile, AppError> {
        sqlx::query_as::<_, UserProfile>("SELECT id, name, email, role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Issues a password-reset token for the given email.
    ///
    /// Stores only the token's SHA-256 digest plus a 10-minute expiry on the
    /// matching user and returns the plaintext token, which is the caller's to
    /// deliver out of band. Returns `Ok(None)` when no user matches, so the
    /// handler can answer with the same generic success either way.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, AppError> {
        let (token, token_hash) = generate_reset_token();
        let expires = Utc::now() + chrono::Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        let updated = sqlx::query(
            "UPDATE users \
             SET password_reset_token = $1, password_reset_expires = $2, updated_at = now() \
             WHERE email = $3",
        )
        .bind(&token_hash)
        .bind(expires)
        .bind(email)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        info!("password reset requested for {}", email);
        Ok(Some(token))
    }

    /// Consumes a reset token: sets the new password hash and clears both
    /// reset columns in one statement, so a token is usable at most once.
    ///
    /// Fails with `InvalidResetToken` when the token's digest matches no user
    /// or the stored expiry has passed.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let token_hash = hash_reset_token(token);
        let password_hash = hash_password(new_password)?;

        let updated = sqlx::query(
            "UPDATE users \
             SET password_hash = $1, password_reset_token = NULL, \
                 password_reset_expires = NULL, updated_at = now() \
             WHERE password_reset_token = $2 AND password_reset_expires > now()",
        )
        .bind(&password_hash)
        .bind(&token_hash)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::InvalidResetToken(
                "Token is invalid or has expired".into(),
            ));
        }

        info!("password reset completed");
        Ok(())
    }
}
