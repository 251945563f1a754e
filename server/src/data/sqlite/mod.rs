//! SQLite database service
//!
//! Provides read-only access to a local SQLite file holding the bus listing
//! tables. Connections are opened read-only; nothing here writes to the
//! database.

pub mod error;
pub mod repositories;
mod repository_impl;
#[cfg(test)]
pub mod schema;

pub use error::SqliteError;
pub use repository_impl::SqliteSession;
pub use sqlx::SqlitePool;

use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::log::LevelFilter;

use crate::core::config::SqliteConfig;
use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_MAX_CONNECTIONS};

/// SQLite database service
///
/// Handles database initialization and connection pooling.
/// Should be created once at server startup and shared across all modules.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Initialize the database service
    ///
    /// The database file must already exist; it is never created.
    pub async fn init(config: &SqliteConfig) -> Result<Self, SqliteError> {
        let db_path = &config.path;
        if !db_path.is_file() {
            return Err(SqliteError::Config(format!(
                "SQLite database not found: {}",
                db_path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %db_path.display(), "SqliteService initialized");
        Ok(Self { pool })
    }

    /// Create a SqliteService from an existing pool (primarily for testing)
    #[cfg(test)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out one connection for a render pass
    pub async fn session(&self) -> Result<SqliteSession, SqliteError> {
        let conn = self.pool.acquire().await?;
        Ok(SqliteSession::new(conn))
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SqliteConfig {
            path: dir.path().join("missing.db"),
        };
        let err = SqliteService::init(&config).await.err().unwrap();
        assert!(matches!(err, SqliteError::Config(msg) if msg.contains("missing.db")));
    }

    #[tokio::test]
    async fn test_session_returns_connection_on_drop() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let service = SqliteService::from_pool(pool.clone());

        let session = service.session().await.unwrap();
        assert_eq!(pool.num_idle(), 0);
        drop(session);

        // A second checkout succeeds only if the first one was returned
        let again = tokio::time::timeout(Duration::from_secs(5), service.session()).await;
        assert!(matches!(again, Ok(Ok(_))));
    }
}
