use crate::server::Server;
use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bloglist API",
        version = "0.1.0",
        description = "REST API for storing blogs and users, with summary statistics"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::blogs::list_blogs,
        crate::routes::blogs::blog_stats,
        crate::routes::blogs::create_blog,
        crate::routes::blogs::update_blog,
        crate::routes::blogs::delete_blog,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::login::login,
    ),
    components(schemas(
        crate::routes::ApiErrorResponse,
        crate::routes::blogs::BlogResponse,
        crate::routes::blogs::BlogPayload,
        crate::routes::blogs::BlogStatsResponse,
        crate::routes::users::CreateUserRequest,
        crate::routes::users::UserResponse,
        crate::routes::users::UserWithBlogsResponse,
        crate::routes::login::LoginRequest,
        crate::routes::login::LoginResponse,
        crate::stats::FavoriteBlog,
        crate::stats::TopAuthorByBlogs,
        crate::stats::TopAuthorByLikes,
        crate::health::HealthResponse,
        crate::health::HealthStatus,
        crate::health::HealthCheckResult,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Blogs", description = "Blog CRUD and statistics"),
        (name = "Users", description = "Registration and listing"),
        (name = "Login", description = "Token issuance"),
        (name = "Health", description = "Component health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub fn create_docs_routes() -> Router<Server> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
