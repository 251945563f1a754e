//! Bus query construction
//!
//! Translates a `FilterSelection` into parameterized SQL. User-supplied values
//! only ever travel as bound parameters; table and column names come from
//! configuration and the column whitelist and are quoted by the dialect.

mod builder;
mod types;

pub use builder::{build_bus_query, build_distinct_query, columns};
pub use types::{BuiltQuery, Predicate, SqlParams, SqlValue};
