//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Type casting of interval and numeric columns
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Quote a single identifier, doubling embedded quotes
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Quote a possibly schema-qualified table name (`schema.table`)
    fn quote_table(&self, table: &str) -> String {
        table
            .split('.')
            .map(|part| self.quote_ident(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Cast an interval column to the form the backend decodes
    ///
    /// - SQLite: `CAST(col AS TEXT)` (intervals are stored as text)
    /// - PostgreSQL: `CAST(col AS INTERVAL)`
    fn cast_interval(&self, col: &str) -> String;

    /// Cast a column to a double precision float
    fn cast_real(&self, col: &str) -> String;

    /// Cast a column to a 64-bit integer
    fn cast_integer(&self, col: &str) -> String;

    /// Round a rating column to one decimal place as a double
    ///
    /// Ratings move in 0.1 steps; a `real` column widened to double would
    /// otherwise miss an inclusive upper bound such as 4.3.
    fn round_rating(&self, col: &str) -> String;
}
