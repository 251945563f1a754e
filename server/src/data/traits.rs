//! Repository traits for database backends
//!
//! This module defines the trait that provides a unified interface for bus
//! listing queries across backends. Each backend (SQLite, PostgreSQL)
//! implements it on a session that owns one pooled connection.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{BusRecord, CategoryColumn, Dataset};
use crate::domain::buses::FilterSelection;

// ============================================================================
// Bus Repository Trait
// ============================================================================

/// Read-only queries against a bus listing table
///
/// Implementations hold a single connection for their whole lifetime, so
/// every call on one value runs on the same handle, in order. Dropping the
/// value returns the connection to the pool.
#[async_trait]
pub trait BusRepository: Send {
    /// Distinct non-NULL values of a category column, in store order
    async fn distinct_values(
        &mut self,
        dataset: &Dataset,
        column: CategoryColumn,
    ) -> Result<Vec<String>, DataError>;

    /// Rows matching the selection, with interval columns normalized
    ///
    /// A malformed interval cell fails the whole fetch.
    async fn fetch_filtered(
        &mut self,
        selection: &FilterSelection,
    ) -> Result<Vec<BusRecord>, DataError>;
}
