pub mod blogs;
pub mod docs;
pub mod health;
pub mod login;
pub mod users;

pub use blogs::create_blog_routes;
pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use login::create_login_routes;
pub use users::create_user_routes;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every endpoint on failure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error category
    pub error: String,
    /// Human-readable detail
    pub message: String,
}
