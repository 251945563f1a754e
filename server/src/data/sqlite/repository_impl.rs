//! BusRepository trait implementation for SQLite
//!
//! A `SqliteSession` owns one pooled connection for the length of a render
//! pass and returns it to the pool on drop.

use async_trait::async_trait;
use sqlx::Sqlite;
use sqlx::pool::PoolConnection;

use crate::data::error::DataError;
use crate::data::traits::BusRepository;
use crate::data::types::{BusRecord, CategoryColumn, Dataset, normalize_rows};
use crate::domain::buses::FilterSelection;

use super::repositories::buses;

/// One checked-out SQLite connection
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

impl SqliteSession {
    pub(super) fn new(conn: PoolConnection<Sqlite>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BusRepository for SqliteSession {
    async fn distinct_values(
        &mut self,
        dataset: &Dataset,
        column: CategoryColumn,
    ) -> Result<Vec<String>, DataError> {
        buses::distinct_values(&mut self.conn, dataset, column)
            .await
            .map_err(Into::into)
    }

    async fn fetch_filtered(
        &mut self,
        selection: &FilterSelection,
    ) -> Result<Vec<BusRecord>, DataError> {
        let rows = buses::fetch_filtered(&mut self.conn, selection).await?;
        tracing::debug!(
            dataset = %selection.dataset().id,
            rows = rows.len(),
            "Fetched bus rows from SQLite"
        );
        normalize_rows(rows)
    }
}
