//! Data storage layer
//!
//! Provides read-only database access for the dashboard:
//! - `sqlite` - Embedded backend (default, also used by tests)
//! - `postgres` - Server backend for shared deployments
//! - `filters` - Parameterized query construction
//! - `datasets` - Registry of configured bus listing tables
//! - `types` - Shared data types across both backends
//! - `traits` - Repository trait for multi-database support
//! - `sql` - SQL dialects for multi-database support
//! - `error` - Unified error type for all backends

pub mod datasets;
pub mod error;
pub mod filters;
pub mod postgres;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export backend-specific services
pub use postgres::PostgresService;
pub use sqlite::SqliteService;

pub use datasets::DatasetRegistry;
pub use error::DataError;
pub use traits::BusRepository;

use std::sync::Arc;

use crate::core::config::{DatabaseBackend, DatabaseConfig};

/// Dataset database service enum
///
/// Wraps the underlying backend-specific service (SQLite or PostgreSQL).
/// Services are stored as Arc to enable safe extraction.
pub enum DatasetService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend (for shared deployments)
    Postgres(Arc<PostgresService>),
}

impl DatasetService {
    /// Initialize the service based on configuration
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(&config.sqlite).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Postgres => {
                let service = PostgresService::init(&config.postgres).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Create a SQLite-backed service from an existing pool (for testing)
    #[cfg(test)]
    pub fn from_sqlite_pool(pool: sqlx::SqlitePool) -> Self {
        Self::Sqlite(Arc::new(SqliteService::from_pool(pool)))
    }

    /// Acquire a session holding one pooled connection
    ///
    /// The connection goes back to the pool when the session is dropped.
    pub async fn acquire(&self) -> Result<Box<dyn BusRepository>, DataError> {
        match self {
            Self::Sqlite(s) => Ok(Box::new(s.session().await?)),
            Self::Postgres(p) => Ok(Box::new(p.session().await?)),
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }
}
