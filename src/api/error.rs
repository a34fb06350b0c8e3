//! HTTP error taxonomy for the credential endpoints.
//!
//! Every failure renders a JSON body with a human-readable `message`. The
//! pending-approval case additionally carries `code: "PENDING_APPROVAL"` so
//! the client can show creator-specific copy instead of a generic failure.

use crate::token::TokenError;
use crate::users::UserError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("an account with this email already exists")]
    Conflict,
    // Deliberately identical for unknown email and wrong password
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("your creator account is awaiting admin approval")]
    PendingApproval,
    #[error("internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::PendingApproval => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::PendingApproval => json!({
                "code": "PENDING_APPROVAL",
                "message": self.to_string(),
            }),
            _ => json!({ "message": self.to_string() }),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::DuplicateEmail => Self::Conflict,
            other => Self::Internal(other.into()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        Self::Internal(e.into())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            // Detail stays in the logs, the client gets a generic message
            error!("internal error: {:?}", e);
        }

        (self.status(), Json(self.body())).into_response()
    }
}
