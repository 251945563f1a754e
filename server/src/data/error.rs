//! Unified error type for data layer
//!
//! This module provides a unified error type that can represent errors from
//! both database backends (SQLite, PostgreSQL) and from row normalization.

use thiserror::Error;

use crate::utils::time::FormatError;

/// Unified error type for data layer operations
///
/// This error type wraps backend-specific errors while preserving context
/// about which backend generated the error.
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL database error
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A fetched interval cell could not be rendered as a clock string
    #[error("Invalid value in column {column} at row {row}: {source}")]
    Format {
        column: &'static str,
        row: usize,
        #[source]
        source: FormatError,
    },

    /// The requested dataset is not configured
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// A filter selection was paired with a different dataset
    #[error("Selection targets dataset {selection} but the pass renders {dataset}")]
    DatasetMismatch { dataset: String, selection: String },
}

impl DataError {
    /// Create a SQLite error with preserved context
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        Self::Sqlite(e)
    }

    /// Create a PostgreSQL error with preserved context
    pub fn from_postgres(e: sqlx::Error) -> Self {
        Self::Postgres(e)
    }

    /// Create a format error for a cell
    pub fn format(column: &'static str, row: usize, source: FormatError) -> Self {
        Self::Format {
            column,
            row,
            source,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::Config(_)
            | Self::Format { .. }
            | Self::UnknownDataset(_)
            | Self::DatasetMismatch { .. } => "unknown",
        }
    }
}

/// Convert from the SqliteError type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::Config(msg) => Self::Config(msg),
        }
    }
}

/// Convert from the PostgresError type
impl From<crate::data::postgres::PostgresError> for DataError {
    fn from(e: crate::data::postgres::PostgresError) -> Self {
        match e {
            crate::data::postgres::PostgresError::Database(e) => Self::Postgres(e),
            crate::data::postgres::PostgresError::Config(msg) => Self::Config(msg),
        }
    }
}
