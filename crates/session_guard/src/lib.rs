//! Client-side session guard for the SkyVault frontend.
//!
//! The frontend persists two strings after signup/login: a session token and
//! a JSON user descriptor. This crate is the only code that touches that
//! pair. On every protected route render the host app asks the guard whether
//! to show the page, navigate somewhere role-appropriate, or force
//! re-authentication; the decision is a pure function of the stored record
//! and the current route, with no network I/O.
//!
//! A [`RouteGuard`] starts in [`GuardState::Checking`]; hosts render a
//! loading indicator in that state so protected content never flashes before
//! the decision lands. The guard then resolves to `Authorized` (render
//! children) or `Redirecting` (render nothing, navigate to
//! [`RouteGuard::redirect_target`]).
//!
//! This is a UX-only, point-in-time check of a possibly stale snapshot; real
//! access control lives on the API, which re-verifies the token on every
//! call.

mod guard;
mod routes;
mod session;

pub use guard::{evaluate_guest, evaluate_protected, GuardState, Outcome, RouteGuard, LOGIN_PATH};
pub use routes::{canonical_home_path, RouteParams};
pub use session::{
    MemoryStore, Role, Session, SessionContext, SessionStore, StoredUser, TOKEN_KEY, USER_KEY,
};
