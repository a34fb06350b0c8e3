//! Stateless session tokens.
//!
//! HS256 JWTs carrying the user id in `sub`, minted at signup/login with a
//! 30-day expiry and verified offline against the server-held secret. There
//! is no revocation list; expiry is the only exit.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Sessions last 30 days from issuance.
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("failed to sign token")]
    Signing,
}

/// Mint a session token bound to `user_id`, expiring [`SESSION_TTL_SECS`]
/// from now.
pub fn mint(secret: &SecretString, user_id: Uuid) -> Result<String, TokenError> {
    mint_at(secret, user_id, Utc::now().timestamp())
}

fn mint_at(secret: &SecretString, user_id: Uuid, iat: i64) -> Result<String, TokenError> {
    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + SESSION_TTL_SECS,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| TokenError::Signing)
}

/// Verify a session token and resolve the user id it binds to.
///
/// # Errors
///
/// `TokenError::Expired` past the 30-day window, `TokenError::Invalid` for
/// bad signatures, malformed tokens, or a `sub` that is not a UUID.
pub fn verify(secret: &SecretString, token: &str) -> Result<Uuid, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
}
