// ABOUTME: Session token generation, hashing, and verification
// ABOUTME: Tokens are opaque random strings; only their SHA-256 hash is stored

use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure random session token.
/// Returns a base64-encoded 32-byte token.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Hash a token using SHA-256. This is what gets stored in the database.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a token against a stored hash using constant-time comparison.
/// This prevents timing attacks.
pub fn verify_token_hash(token: &str, stored_hash: &str) -> bool {
    let computed_hash = hash_token(token);

    use subtle::ConstantTimeEq;
    computed_hash
        .as_bytes()
        .ct_eq(stored_hash.as_bytes())
        .into()
}
