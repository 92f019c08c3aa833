//! Credential hashing primitives.
//!
//! Passwords are hashed with bcrypt at the default cost; the plaintext never
//! leaves the function that hashes it. Password-reset tokens are high-entropy
//! random values hashed with SHA-256 before storage, so the stored value can
//! never be replayed as the token itself.

use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Reset tokens expire this many minutes after issuance.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Generates a fresh password-reset token.
///
/// Returns `(plaintext, digest)`: the plaintext goes back to the requester
/// once, only the digest is stored.
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token = hex::encode(bytes);
    let digest = hash_reset_token(&token);
    (token, digest)
}

/// One-way hash of a reset token (SHA-256, hex-encoded).
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
