// ABOUTME: Argon2id password hashing and verification
// ABOUTME: Stores credentials as PHC strings; plaintext is never persisted

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// Hash a plaintext password into a PHC-format string suitable for storage.
/// Each call generates a fresh random salt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    debug!("Hashing password");

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
pub fn verify_password(password: &str, stored_hash: &str) -> AuthResult<bool> {
    debug!("Verifying password against stored hash");

    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::MalformedHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("pw1").unwrap();
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("pw1").unwrap();
        let second = hash_password("pw1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let result = verify_password("pw1", "plaintext-left-over");
        assert!(matches!(result, Err(AuthError::MalformedHash(_))));
    }
}
