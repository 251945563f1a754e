//! BusRepository trait implementation for PostgreSQL

use async_trait::async_trait;
use sqlx::Postgres;
use sqlx::pool::PoolConnection;

use crate::data::error::DataError;
use crate::data::traits::BusRepository;
use crate::data::types::{BusRecord, CategoryColumn, Dataset, normalize_rows};
use crate::domain::buses::FilterSelection;

use super::repositories::buses;

/// One checked-out PostgreSQL connection
pub struct PostgresSession {
    conn: PoolConnection<Postgres>,
}

impl PostgresSession {
    pub(super) fn new(conn: PoolConnection<Postgres>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BusRepository for PostgresSession {
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
            "Fetched bus rows from PostgreSQL"
        );
        normalize_rows(rows)
    }
}
