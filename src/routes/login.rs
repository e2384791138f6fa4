use crate::{
    auth::{
        jwt::{Claims, JwtService},
        password::verify_password,
    },
    database::DatabaseManager,
    error::AppError,
    routes::ApiErrorResponse,
    server::Server,
};
use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

pub fn create_login_routes() -> Router<Server> {
    Router::new().route("/", post(login))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ApiErrorResponse),
    ),
    tag = "Login"
)]
pub async fn login(
    State(server): State<Server>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // one failure message for both unknown user and wrong password, so the
    // response does not reveal which usernames exist
    let user = server
        .database
        .users()
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid username or password".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
    if !is_valid {
        return Err(AppError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    }

    let claims = Claims::new(
        user.id,
        user.username.as_str(),
        server.config.jwt.expires_in_seconds,
    );
    let token = server.jwt_service.create_token(&claims)?;
    info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
