// ABOUTME: Error types for credential and session token operations
// ABOUTME: Covers hashing failures and malformed stored credentials

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored credential is not a valid hash: {0}")]
    MalformedHash(String),
}
