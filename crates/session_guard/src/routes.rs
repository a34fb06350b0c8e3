//! Canonical route computation shared by every guard call site.

use crate::session::{Role, StoredUser};

/// The role-specific default route a user is sent to when denied access
/// elsewhere. One pure function so redirect targets stay consistent across
/// the guest guard, the protected guard, and login handling.
#[must_use]
pub fn canonical_home_path(user: &StoredUser) -> String {
    match user.role {
        Role::Admin => "/admin/dashboard".to_string(),
        Role::Creator => format!("/creator/{}/{}", user.id, user.email),
        Role::Buyer => format!("/buyer/{}/{}", user.id, user.email),
    }
}

/// `userId`/`email` path segments of the current route, when the route
/// carries them. Admin routes carry none.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

impl RouteParams {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            email: Some(email.into()),
        }
    }

    /// Present segments must exactly match the stored user; absent segments
    /// match anything.
    #[must_use]
    pub fn matches(&self, user: &StoredUser) -> bool {
        let id_ok = self.user_id.as_deref().map_or(true, |id| id == user.id);
        let email_ok = self.email.as_deref().map_or(true, |e| e == user.email);
        id_ok && email_ok
    }
}
