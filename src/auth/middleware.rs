use crate::auth::jwt::JwtService;
use crate::database::DatabaseManager;
use crate::database::entities::UserRecord;
use crate::error::AppError;
use crate::server::Server;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::trace;

/// Resolve an optional bearer token to a [`UserRecord`] request extension.
///
/// A request without an `Authorization` header passes through anonymously;
/// handlers that demand identity check for the extension themselves. A header
/// that is present but malformed, invalid, expired, or pointing at a deleted
/// user is rejected with 401 here.
pub async fn bearer_auth_middleware(
    State(server): State<Server>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(auth_header) = request.headers().get(AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

        let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format".to_string())
        })?;

        let claims = server.jwt_service.validate_token(token)?;

        let user = server
            .database
            .users()
            .find_by_id(claims.sub)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| {
                AppError::Unauthorized("Token subject no longer exists".to_string())
            })?;

        trace!(user_id = user.id, username = %user.username, "Authenticated request");
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}
