//! # SkyVault Credential Service
//!
//! `skyvault` is the authentication and authorization core of the SkyVault
//! drone-footage marketplace. It validates registration and login input,
//! hashes passwords with bcrypt, issues signed session tokens, and enforces
//! the creator-approval gate.
//!
//! ## Roles & Approval
//!
//! Every account carries one of three roles: `buyer`, `creator`, or `admin`.
//! Buyers and admins are usable immediately after registration; creators start
//! unapproved and cannot log in until an administrator flips the `approved`
//! flag. Registration never accepts the `admin` role.
//!
//! ## Sessions
//!
//! Successful signup or login mints a stateless HS256 JWT bound to the user
//! id with a 30-day expiry. There is no server-side revocation list; every
//! protected endpoint re-verifies the token signature and expiry on each call.
//!
//! ## Enumeration hygiene
//!
//! Login failures for an unknown email and for a wrong password share one
//! generic 401 response. The creator-approval gate only fires after the
//! password has been verified, so account state is never disclosed to
//! unauthenticated callers.

pub mod api;
pub mod cli;
pub mod token;
pub mod users;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
