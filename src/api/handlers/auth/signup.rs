use crate::{
    api::{
        error::AuthError,
        handlers::{
            auth::{
                password, require_field, require_password,
                types::{PublicUser, SignupRequest, SignupResponse},
            },
            valid_email,
        },
    },
    cli::globals::GlobalArgs,
    token,
    users::{self, Role},
};
use axum::{extract::Extension, http::StatusCode, response::Json};
use sqlx::PgPool;
use std::str::FromStr;
use tracing::{debug, error, instrument};

/// Validated registration input with the email already normalized.
#[derive(Debug)]
struct NewAccount {
    name: String,
    email: String,
    password: String,
    role: Role,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Registration successful", body = SignupResponse, content_type = "application/json"),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "An account with this email already exists"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn signup(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Json<SignupRequest>>,
) -> Result<(StatusCode, Json<SignupResponse>), AuthError> {
    let Some(Json(payload)) = payload else {
        return Err(AuthError::Validation("missing payload".to_string()));
    };

    let account = validate(&payload)?;

    // Advisory check for a friendly fast path; the unique constraint on the
    // insert below is the authoritative guard against racing duplicates.
    match users::email_exists(&pool, &account.email).await {
        Ok(true) => return Err(AuthError::Conflict),
        Ok(false) => (),
        Err(e) => {
            error!("Error checking if user exists: {:?}", e);
            return Err(AuthError::Internal(e.into()));
        }
    }

    let password_hash = password::hash(account.password).await?;

    let user = users::insert(
        &pool,
        &account.name,
        &account.email,
        &password_hash,
        account.role,
    )
    .await?;

    debug!("registered {} as {}", user.id, user.role);

    let token = token::mint(&globals.token_secret, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created".to_string(),
            token,
            user: PublicUser::sanitized(&user),
        }),
    ))
}

/// Field-by-field validation, in order, each failure a distinct 400. The
/// password is kept verbatim; everything else is trimmed and the email
/// lower-cased so duplicate detection is case-insensitive.
fn validate(payload: &SignupRequest) -> Result<NewAccount, AuthError> {
    let name = require_field(payload.name.as_deref(), "name")?;
    let email = require_field(payload.email.as_deref(), "email")?;
    let password = require_password(payload.password.as_deref())?;
    let role = require_field(payload.role.as_deref(), "role")?;

    let name_len = name.chars().count();
    if !(2..=50).contains(&name_len) {
        return Err(AuthError::Validation(
            "name must be between 2 and 50 characters".to_string(),
        ));
    }

    if !valid_email(&email) {
        return Err(AuthError::Validation("invalid email address".to_string()));
    }

    if password.chars().count() < 6 {
        return Err(AuthError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }

    // Admin accounts are provisioned out of band, never via signup
    let role = match Role::from_str(&role) {
        Ok(role @ (Role::Buyer | Role::Creator)) => role,
        _ => {
            return Err(AuthError::Validation(
                "role must be buyer or creator".to_string(),
            ))
        }
    };

    Ok(NewAccount {
        name,
        email: users::normalize_email(&email),
        password,
        role,
    })
}
