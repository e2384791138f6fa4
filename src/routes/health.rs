use crate::{health::HealthResponse, server::Server};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct HealthCheckQuery {
    /// Component to check, or "all"
    #[serde(default)]
    pub check: Option<String>,
}

/// Aggregated component health
#[utoipa::path(
    get,
    path = "/health",
    params(HealthCheckQuery),
    responses(
        (status = 200, description = "Health report", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Json<HealthResponse> {
    Json(
        server
            .health_service
            .check_health(params.check.as_deref())
            .await,
    )
}
