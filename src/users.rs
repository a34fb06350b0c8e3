//! User model and persistence.
//!
//! The `users` table is the only collection this service owns. Emails are
//! stored lower-cased and trimmed; the unique constraint on `email` is the
//! authoritative guard against duplicate registrations, advisory
//! check-then-insert notwithstanding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role. Registration only accepts `buyer` and `creator`; admins are
/// provisioned out of band.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Creator,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Creator => "creator",
            Self::Admin => "admin",
        }
    }

    /// Creators require admin approval before their first login; buyers and
    /// admins are usable immediately.
    #[must_use]
    pub const fn default_approved(&self) -> bool {
        !matches!(self, Self::Creator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Self::Buyer),
            "creator" => Ok(Self::Creator),
            "admin" => Ok(Self::Admin),
            other => Err(UserError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("unknown role: {0}")]
    InvalidRole(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role-canonical default route, mirrored by the client-side guard.
    #[must_use]
    pub fn home_path(&self) -> String {
        match self.role {
            Role::Admin => "/admin/dashboard".to_string(),
            Role::Creator => format!("/creator/{}/{}", self.id, self.email),
            Role::Buyer => format!("/buyer/{}/{}", self.id, self.email),
        }
    }
}

/// Lower-case and trim an email so lookups and uniqueness are
/// case-insensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Advisory existence check before insert; the unique constraint remains the
/// final arbiter under concurrent duplicate signups.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(row.get("exists"))
}

/// Insert a new user with the role-defaulted `approved` flag.
///
/// # Errors
///
/// Returns `UserError::DuplicateEmail` when the insert trips the unique
/// constraint on `email`, `UserError::Database` for anything else.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, UserError> {
    let id = Uuid::new_v4();
    let approved = role.default_approved();

    let row = sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, role, approved) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING created_at",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(approved)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return UserError::DuplicateEmail;
            }
        }
        UserError::Database(e)
    })?;

    Ok(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        role,
        approved,
        created_at: row.get("created_at"),
    })
}

/// Look up a user by normalized email.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, UserError> {
    let row = sqlx::query(
        "SELECT id, name, email, password_hash, role, approved, created_at \
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let role: String = row.get("role");

    Ok(Some(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: Role::from_str(&role)?,
        approved: row.get("approved"),
        created_at: row.get("created_at"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Buyer, Role::Creator, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Creator).unwrap(), "\"creator\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_default_approved() {
        assert!(Role::Buyer.default_approved());
        assert!(Role::Admin.default_approved());
        assert!(!Role::Creator.default_approved());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Pilot@SkyVault.DEV "), "pilot@skyvault.dev");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_home_path_by_role() {
        let mut user = User {
            id: Uuid::nil(),
            name: "Ada".to_string(),
            email: "ada@skyvault.dev".to_string(),
            password_hash: String::new(),
            role: Role::Buyer,
            approved: true,
            created_at: Utc::now(),
        };

        assert_eq!(
            user.home_path(),
            format!("/buyer/{}/ada@skyvault.dev", Uuid::nil())
        );

        user.role = Role::Creator;
        assert_eq!(
            user.home_path(),
            format!("/creator/{}/ada@skyvault.dev", Uuid::nil())
        );

        user.role = Role::Admin;
        assert_eq!(user.home_path(), "/admin/dashboard");
    }
}
