//! Route authorization decisions.
//!
//! Two guards cooperate: [`evaluate_guest`] wraps the login/signup pages and
//! bounces already-authenticated users to their home route;
//! [`evaluate_protected`] wraps everything else, parameterized by an
//! allowed-role set and the route's `userId`/`email` segments.

use crate::routes::{canonical_home_path, RouteParams};
use crate::session::{Role, SessionContext, SessionStore};

/// Where unauthenticated (or de-authenticated) users land.
pub const LOGIN_PATH: &str = "/login";

/// Render state of a guarded route. Hosts show a loading indicator while
/// `Checking` so protected content never flashes before the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authorized,
    Redirecting,
}

/// Outcome of one guard evaluation. Redirects are normal control flow, not
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Authorized,
    Redirect(String),
}

/// Decide whether the current protected route may render.
///
/// Evaluation order:
/// 1. no stored record → login
/// 2. corrupt descriptor → storage cleared (inside `get_session`) → login
/// 3. admins on admin-allowed routes skip the parameter checks entirely
/// 4. mismatched `userId`/`email` segments repair to the user's canonical
///    home rather than rejecting
/// 5. a role outside the allowed set goes to its canonical home, except an
///    unapproved creator, whose session is cleared
/// 6. an unapproved creator never renders anything, even on creator routes
pub fn evaluate_protected<S: SessionStore>(
    ctx: &mut SessionContext<S>,
    allowed: &[Role],
    params: &RouteParams,
) -> Outcome {
    if !ctx.has_record() {
        return Outcome::Redirect(LOGIN_PATH.to_string());
    }

    let Some(session) = ctx.get_session() else {
        // corrupt record, storage already cleared
        return Outcome::Redirect(LOGIN_PATH.to_string());
    };

    let user = session.user;

    if user.role == Role::Admin && allowed.contains(&Role::Admin) {
        return Outcome::Authorized;
    }

    if !params.matches(&user) {
        return Outcome::Redirect(canonical_home_path(&user));
    }

    let unapproved_creator = user.role == Role::Creator && !user.approved;

    if !allowed.is_empty() && !allowed.contains(&user.role) {
        if unapproved_creator {
            ctx.clear_session();
            return Outcome::Redirect(LOGIN_PATH.to_string());
        }
        return Outcome::Redirect(canonical_home_path(&user));
    }

    if unapproved_creator {
        ctx.clear_session();
        return Outcome::Redirect(LOGIN_PATH.to_string());
    }

    Outcome::Authorized
}

/// Guard for the login/signup pages: an authenticated user is sent home
/// instead of seeing the form; a corrupt record is discarded and the form
/// renders.
pub fn evaluate_guest<S: SessionStore>(ctx: &mut SessionContext<S>) -> Option<String> {
    ctx.get_session()
        .map(|session| canonical_home_path(&session.user))
}

/// State machine wrapper around [`evaluate_protected`]. Starts in
/// [`GuardState::Checking`]; `resolve` moves it to a terminal state within
/// one synchronous pass.
#[derive(Debug)]
pub struct RouteGuard {
    state: GuardState,
    target: Option<String>,
}

impl RouteGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GuardState::Checking,
            target: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    /// Navigation target once the guard resolved to `Redirecting`.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn resolve<S: SessionStore>(
        &mut self,
        ctx: &mut SessionContext<S>,
        allowed: &[Role],
        params: &RouteParams,
    ) -> GuardState {
        match evaluate_protected(ctx, allowed, params) {
            Outcome::Authorized => {
                self.state = GuardState::Authorized;
                self.target = None;
            }
            Outcome::Redirect(path) => {
                self.state = GuardState::Redirecting;
                self.target = Some(path);
            }
        }
        self.state
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}
