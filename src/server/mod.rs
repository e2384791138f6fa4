use crate::{
    auth::{
        jwt::{JwtService, JwtServiceImpl, parse_algorithm},
        middleware::bearer_auth_middleware,
    },
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    routes::{
        create_blog_routes, create_docs_routes, create_health_routes, create_login_routes,
        create_user_routes,
    },
};
use axum::{Router, extract::DefaultBodyLimit, middleware};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Maximum request body size (1MB); blog payloads are small
const MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub jwt_service: Arc<dyn JwtService>,
    pub database: Arc<dyn DatabaseManager>,
    pub health_service: Arc<HealthService>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let jwt_algorithm = parse_algorithm(&config.jwt.algorithm)?;
        let jwt_service_impl = JwtServiceImpl::new(config.jwt.secret.clone(), jwt_algorithm);
        let jwt_service: Arc<dyn JwtService> = Arc::new(jwt_service_impl.clone());

        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;
        health_service
            .register(jwt_service_impl.health_checker())
            .await;

        Ok(Self {
            config: Arc::new(config),
            jwt_service,
            database,
            health_service,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        // Make sure the schema exists before accepting requests
        self.database.migrate().await.map_err(AppError::Database)?;

        let app = self.create_app();

        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid listen address: {}", e)))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Creates the application router. The bearer middleware wraps every
    /// route: requests without a token pass through anonymously, requests
    /// with one get a resolved user attached.
    pub fn create_app(&self) -> Router {
        Router::new()
            .nest("/api/blogs", create_blog_routes())
            .nest("/api/users", create_user_routes())
            .nest("/api/login", create_login_routes())
            .nest("/health", create_health_routes())
            .merge(create_docs_routes())
            .layer(middleware::from_fn_with_state(
                self.clone(),
                bearer_auth_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
            .with_state(self.clone())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
