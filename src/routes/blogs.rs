use crate::{
    database::{
        DatabaseError, DatabaseManager,
        entities::{BlogRecord, UserRecord},
    },
    error::AppError,
    routes::ApiErrorResponse,
    server::Server,
    stats::{self, FavoriteBlog, TopAuthorByBlogs, TopAuthorByLikes},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

pub fn create_blog_routes() -> Router<Server> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/stats", get(blog_stats))
        .route("/{id}", put(update_blog).delete(delete_blog))
}

/// Blog as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: Option<i64>,
    /// Owning user, when the blog was created with a bearer token
    pub user_id: Option<i32>,
}

impl From<BlogRecord> for BlogResponse {
    fn from(blog: BlogRecord) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user_id: blog.user_id,
        }
    }
}

/// Payload for creating or replacing a blog. Every field is optional at the
/// wire level so validation can answer with 400 instead of a decode failure;
/// `title` and `url` are then required by the handlers.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BlogPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl BlogPayload {
    /// Validate the required fields. Empty strings count as missing.
    fn require_title_and_url(
        self,
    ) -> Result<(String, String, Option<String>, Option<i64>), AppError> {
        let Self {
            title,
            author,
            url,
            likes,
        } = self;
        let title = title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
        let url = url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::BadRequest("url is required".to_string()))?;
        if likes.is_some_and(|likes| likes < 0) {
            return Err(AppError::BadRequest(
                "likes must be a non-negative integer".to_string(),
            ));
        }
        Ok((title, url, author, likes))
    }
}

/// Summary statistics over the stored blogs; absent aggregates mean the
/// store is empty.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlogStatsResponse {
    pub total_likes: i64,
    pub favorite: Option<FavoriteBlog>,
    pub most_blogs: Option<TopAuthorByBlogs>,
    pub most_likes: Option<TopAuthorByLikes>,
}

/// List all blogs
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "All stored blogs", body = Vec<BlogResponse>),
    ),
    tag = "Blogs"
)]
pub async fn list_blogs(State(server): State<Server>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = server.database.blogs().find_all().await?;
    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

/// Summary statistics over all blogs
#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    responses(
        (status = 200, description = "Aggregated statistics", body = BlogStatsResponse),
    ),
    tag = "Blogs"
)]
pub async fn blog_stats(State(server): State<Server>) -> Result<Json<BlogStatsResponse>, AppError> {
    let snapshot = server.database.blogs().find_all().await?;
    Ok(Json(BlogStatsResponse {
        total_likes: stats::total_likes(&snapshot),
        favorite: stats::favorite_blog(&snapshot),
        most_blogs: stats::most_blogs(&snapshot),
        most_likes: stats::most_likes(&snapshot),
    }))
}

/// Create a blog
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = BlogPayload,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Missing title or url", body = ApiErrorResponse),
        (status = 401, description = "Invalid bearer token", body = ApiErrorResponse),
    ),
    security((), ("bearer_auth" = [])),
    tag = "Blogs"
)]
pub async fn create_blog(
    State(server): State<Server>,
    user: Option<Extension<UserRecord>>,
    Json(payload): Json<BlogPayload>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    let (title, url, author, likes) = payload.require_title_and_url()?;

    let mut blog = BlogRecord::new(title, url);
    blog.author = author;
    // a missing like count becomes 0 at creation; only a later replacement
    // can leave the field absent
    blog.likes = Some(likes.unwrap_or(0));
    if let Some(Extension(user)) = user {
        blog.user_id = Some(user.id);
    }

    let created = server.database.blogs().insert(&blog).await?;
    info!(blog_id = created.id, title = %created.title, "Created blog");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replace a blog's fields
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = BlogPayload,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Missing title or url", body = ApiErrorResponse),
        (status = 404, description = "Unknown blog ID", body = ApiErrorResponse),
    ),
    tag = "Blogs"
)]
pub async fn update_blog(
    State(server): State<Server>,
    Path(id): Path<i32>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<BlogResponse>, AppError> {
    let (title, url, author, likes) = payload.require_title_and_url()?;

    // whole-record replacement: author and likes become exactly what was
    // sent, so a payload without likes leaves the stored count absent
    let updated = server
        .database
        .blogs()
        .replace(id, title, author, url, likes)
        .await?;
    info!(blog_id = updated.id, "Replaced blog");

    Ok(Json(updated.into()))
}

/// Delete a blog
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 401, description = "Owned blog and no matching token", body = ApiErrorResponse),
        (status = 404, description = "Unknown blog ID", body = ApiErrorResponse),
    ),
    security((), ("bearer_auth" = [])),
    tag = "Blogs"
)]
pub async fn delete_blog(
    State(server): State<Server>,
    Path(id): Path<i32>,
    user: Option<Extension<UserRecord>>,
) -> Result<StatusCode, AppError> {
    let blogs = server.database.blogs();

    let blog = blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog {} does not exist", id)))?;

    if let Some(owner_id) = blog.user_id {
        match &user {
            Some(Extension(user)) if user.id == owner_id => {}
            Some(_) => {
                return Err(AppError::Unauthorized(
                    "only the owner may delete this blog".to_string(),
                ));
            }
            None => {
                return Err(AppError::Unauthorized(
                    "token required to delete an owned blog".to_string(),
                ));
            }
        }
    }

    match blogs.delete_by_id(id).await {
        Ok(()) | Err(DatabaseError::NotFound) => {}
        Err(other) => return Err(other.into()),
    }
    info!(blog_id = id, "Deleted blog");

    Ok(StatusCode::NO_CONTENT)
}
