//! Database access layer with domain-specific DAOs
//!
//! Each domain (blogs, users) has its own DAO for focused operations. The
//! manager is constructed explicitly from configuration and passed into the
//! server; nothing here is process-global.

use crate::config::Config;
use crate::health::{HealthCheckResult, HealthChecker};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use thiserror::Error;

pub mod dao;
pub mod entities;
pub mod migration;

pub use dao::{BlogsDao, UsersDao};

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Record not found")]
    NotFound,
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database manager trait for dependency injection and testing
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Run database migrations
    async fn migrate(&self) -> DatabaseResult<()>;

    /// Health check for the database connection
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Get blogs DAO
    fn blogs(&self) -> BlogsDao;

    /// Get users DAO
    fn users(&self) -> UsersDao;
}

/// Database connection manager implementation
pub struct DatabaseManagerImpl {
    pub connection: DatabaseConnection,
}

impl DatabaseManagerImpl {
    /// Create database manager from configuration
    pub async fn new_from_config(config: &Config) -> Result<Self, DatabaseError> {
        let mut options = ConnectOptions::new(config.database.url.clone());
        if config.database.url.starts_with("sqlite::memory:") {
            // pooled connections would each open their own in-memory database
            options.max_connections(1);
        }

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseManager for DatabaseManagerImpl {
    async fn migrate(&self) -> DatabaseResult<()> {
        use crate::database::migration::Migrator;
        use sea_orm_migration::MigratorTrait;

        tracing::info!("Running database migrations");

        Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::Migration(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Successfully completed all migrations");
        Ok(())
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    fn blogs(&self) -> BlogsDao {
        BlogsDao::new(self.connection.clone())
    }

    fn users(&self) -> UsersDao {
        UsersDao::new(self.connection.clone())
    }
}

#[async_trait]
impl HealthChecker for DatabaseManagerImpl {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthCheckResult {
        match self.health_check().await {
            Ok(_) => HealthCheckResult::healthy_with_details(serde_json::json!({
                "connection": "ok"
            })),
            Err(err) => HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "error": err.to_string()
                }),
            ),
        }
    }
}
