use crate::{
    auth::password::hash_password,
    database::{DatabaseError, DatabaseManager, entities::UserRecord},
    error::AppError,
    routes::{ApiErrorResponse, blogs::BlogResponse},
    server::Server,
};
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

const MIN_USERNAME_LENGTH: usize = 3;
const MIN_PASSWORD_LENGTH: usize = 3;

pub fn create_user_routes() -> Router<Server> {
    Router::new().route("/", get(list_users).post(create_user))
}

/// Registration payload. The raw password is hashed before anything is
/// stored and never appears in a response.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

/// User together with the blogs they own
#[derive(Debug, Serialize, ToSchema)]
pub struct UserWithBlogsResponse {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogResponse>,
}

/// Register a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(server): State<Server>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let username = payload
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("username is required".to_string()))?;
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "username must be at least {} characters long",
            MIN_USERNAME_LENGTH
        )));
    }

    let password = payload
        .password
        .ok_or_else(|| AppError::BadRequest("password is required".to_string()))?;
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }

    let users = server.database.users();

    if users.find_by_username(&username).await?.is_some() {
        return Err(AppError::BadRequest("username must be unique".to_string()));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let mut user = UserRecord::new(username, password_hash);
    user.name = payload.name;

    // the unique index backs up the pre-check when two registrations race
    let created = users.insert(&user).await.map_err(|e| match e {
        DatabaseError::Constraint(message) => AppError::BadRequest(message),
        other => AppError::Database(other),
    })?;
    info!(user_id = created.id, username = %created.username, "Registered user");

    Ok(Json(created.into()))
}

/// List users with their blogs
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users with their owned blogs", body = Vec<UserWithBlogsResponse>),
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(server): State<Server>,
) -> Result<Json<Vec<UserWithBlogsResponse>>, AppError> {
    let users = server.database.users().find_all_with_blogs().await?;

    let response = users
        .into_iter()
        .map(|(user, blogs)| UserWithBlogsResponse {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: blogs.into_iter().map(BlogResponse::from).collect(),
        })
        .collect();

    Ok(Json(response))
}
