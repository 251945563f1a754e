//! SQL abstraction layer for multi-database support
//!
//! Generates the small amount of backend-specific syntax the bus queries need
//! (placeholders, identifier quoting, casts) for SQLite and PostgreSQL.

mod dialect;
mod postgres_dialect;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;
