//! Persisted session record and the context that owns it.
//!
//! Consumers never read the key-value store directly; [`SessionContext`] is
//! the single path to the pair, which centralizes the parse-failure recovery
//! (corrupt descriptors are discarded and the user treated as anonymous).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "skyvault.token";
/// Storage key for the JSON user descriptor.
pub const USER_KEY: &str = "skyvault.user";

/// Account role, mirroring the server enum on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Creator,
    Admin,
}

/// User descriptor snapshot stored at login/signup.
///
/// Signup responses omit `approved`, so a missing flag deserializes as
/// `true`; the server re-checks approval on every API call regardless.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_approved")]
    pub approved: bool,
}

const fn default_approved() -> bool {
    true
}

/// The locally persisted pair the guard decides from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: StoredUser,
}

/// Durable string key-value storage. Browser hosts adapt `localStorage`;
/// tests use [`MemoryStore`].
pub trait SessionStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Owns the store; constructed once at application start and shared with
/// every guard call site.
#[derive(Debug)]
pub struct SessionContext<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted session. A missing token or descriptor yields
    /// `None`; a descriptor that fails to parse clears both stored values
    /// and also yields `None`, so corruption recovers to "anonymous" rather
    /// than crashing the app.
    pub fn get_session(&mut self) -> Option<Session> {
        let token = self.store.read(TOKEN_KEY)?;
        let raw = self.store.read(USER_KEY)?;

        match serde_json::from_str::<StoredUser>(&raw) {
            Ok(user) => Some(Session { token, user }),
            Err(_) => {
                self.clear_session();
                None
            }
        }
    }

    /// True when both values are present, regardless of whether the
    /// descriptor parses.
    pub fn has_record(&self) -> bool {
        self.store.read(TOKEN_KEY).is_some() && self.store.read(USER_KEY).is_some()
    }

    pub fn set_session(&mut self, token: &str, user: &StoredUser) {
        self.store.write(TOKEN_KEY, token);
        if let Ok(json) = serde_json::to_string(user) {
            self.store.write(USER_KEY, &json);
        }
    }

    pub fn clear_session(&mut self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer() -> StoredUser {
        StoredUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            role: Role::Buyer,
            approved: true,
        }
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut ctx = SessionContext::new(MemoryStore::default());
        ctx.set_session("tok", &buyer());

        let session = ctx.get_session().unwrap();
        assert_eq!(session.token, "tok");
        assert_eq!(session.user, buyer());
    }

    #[test]
    fn test_missing_record_is_anonymous() {
        let mut ctx = SessionContext::new(MemoryStore::default());
        assert!(ctx.get_session().is_none());
        assert!(!ctx.has_record());
    }

    #[test]
    fn test_corrupt_descriptor_clears_storage() {
        let mut store = MemoryStore::default();
        store.write(TOKEN_KEY, "tok");
        store.write(USER_KEY, "{not json");

        let mut ctx = SessionContext::new(store);
        assert!(ctx.get_session().is_none());
        // both values were discarded, not just skipped
        assert!(!ctx.has_record());
    }

    #[test]
    fn test_clear_session() {
        let mut ctx = SessionContext::new(MemoryStore::default());
        ctx.set_session("tok", &buyer());
        ctx.clear_session();

        assert!(ctx.get_session().is_none());
    }

    #[test]
    fn test_descriptor_without_approved_defaults_true() {
        // signup responses omit the approval flag
        let raw = r#"{"id":"u1","name":"Ada","email":"a@b.com","role":"creator"}"#;
        let user: StoredUser = serde_json::from_str(raw).unwrap();
        assert!(user.approved);
    }
}
