//! bcrypt hashing behind `spawn_blocking`.
//!
//! bcrypt at cost 10 takes tens of milliseconds; running it on the async
//! runtime would stall other requests.

use anyhow::{Context, Result};
use tokio::task::spawn_blocking;

/// Conventional work factor; each hash carries its own random salt.
pub const BCRYPT_COST: u32 = 10;

pub async fn hash(password: String) -> Result<String> {
    spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")
}

pub async fn verify(password: String, hash: String) -> Result<bool> {
    spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .context("failed to verify password")
}
