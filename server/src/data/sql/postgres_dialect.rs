//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn cast_interval(&self, col: &str) -> String {
        format!("CAST({} AS INTERVAL)", col)
    }

    fn cast_real(&self, col: &str) -> String {
        format!("CAST({} AS DOUBLE PRECISION)", col)
    }

    fn cast_integer(&self, col: &str) -> String {
        format!("CAST({} AS BIGINT)", col)
    }

    fn round_rating(&self, col: &str) -> String {
        format!("CAST(ROUND(CAST({} AS NUMERIC), 1) AS DOUBLE PRECISION)", col)
    }
}
