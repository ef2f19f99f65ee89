// ABOUTME: Gameplan authentication library providing credential and session primitives
// ABOUTME: Argon2id password hashing plus opaque session token generation and hashing

pub mod error;
pub mod password;
pub mod token;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use password::{hash_password, verify_password};
pub use token::{generate_token, hash_token, verify_token_hash};
