//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn cast_interval(&self, col: &str) -> String {
        // SQLite has no interval type, clock text is stored as TEXT
        format!("CAST({} AS TEXT)", col)
    }

    fn cast_real(&self, col: &str) -> String {
        format!("CAST({} AS REAL)", col)
    }

    fn cast_integer(&self, col: &str) -> String {
        format!("CAST({} AS INTEGER)", col)
    }

    fn round_rating(&self, col: &str) -> String {
        format!("ROUND({}, 1)", col)
    }
}
