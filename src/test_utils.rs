//! Shared helpers for unit and integration tests.

use crate::config::Config;
use crate::database::{DatabaseManager, DatabaseManagerImpl};
use crate::server::Server;

/// Configuration pointing at an isolated in-memory database.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.jwt.secret = "test-secret-123".to_string();
    config.logging.level = "warn".to_string();
    config
}

/// A migrated in-memory database manager for DAO-level tests.
pub async fn test_database() -> DatabaseManagerImpl {
    let manager = DatabaseManagerImpl::new_from_config(&test_config())
        .await
        .expect("failed to open in-memory database");
    manager.migrate().await.expect("failed to run migrations");
    manager
}

/// A fully wired server over an in-memory database, migrated and ready for
/// `create_app()`.
pub async fn test_server() -> Server {
    let server = Server::new(test_config())
        .await
        .expect("failed to build test server");
    server
        .database
        .migrate()
        .await
        .expect("failed to run migrations");
    server
}
