use crate::api::handlers::auth::types::{
    LoginRequest, LoginResponse, PublicUser, SignupRequest, SignupResponse,
};
use crate::api::handlers::{auth, health};
use crate::users::Role;
use axum::response::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "skyvault",
        description = "SkyVault marketplace credential service"
    ),
    paths(health::health, auth::signup::signup, auth::login::login),
    components(schemas(
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        PublicUser,
        Role
    )),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

// axum handler serving the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
