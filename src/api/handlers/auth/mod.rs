//! Signup and login handlers.
//!
//! Both endpoints validate input field by field so every failure is a 400
//! with a message the client can surface as-is, hash or verify passwords with
//! bcrypt off the async runtime, and mint a 30-day session token on success.
//!
//! Login deliberately verifies the password before the creator-approval gate:
//! an unauthenticated caller probing emails sees only the generic 401, never
//! whether a creator account exists or is still pending.

pub mod login;
pub mod password;
pub mod signup;
pub mod types;

pub use self::login::login;
pub use self::signup::signup;

use crate::api::error::AuthError;

/// Presence check for a request field; trims surrounding whitespace. Not
/// for passwords, which must reach the hash byte-for-byte as submitted.
pub(crate) fn require_field(value: Option<&str>, name: &str) -> Result<String, AuthError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AuthError::Validation(format!("{name} is required"))),
    }
}

/// Presence check for the password field. No trimming: whatever the user
/// typed is what gets hashed and verified.
pub(crate) fn require_password(value: Option<&str>) -> Result<String, AuthError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AuthError::Validation("password is required".to_string())),
    }
}
