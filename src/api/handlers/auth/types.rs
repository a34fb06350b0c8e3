use crate::users::{Role, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fields arrive as `Option` so presence is validated explicitly, giving a
/// 400 with a field-specific message rather than a framework rejection.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sanitized user descriptor echoed to the client. Never carries the
/// password hash; `approved` only appears on login responses.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl PublicUser {
    #[must_use]
    pub fn sanitized(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            approved: None,
        }
    }

    #[must_use]
    pub fn with_approved(user: &User) -> Self {
        Self {
            approved: Some(user.approved),
            ..Self::sanitized(user)
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
    #[serde(rename = "redirectPath")]
    pub redirect_path: String,
}
