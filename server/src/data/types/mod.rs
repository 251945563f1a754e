//! Shared data types for all database backends
//!
//! Types used by both SQLite and PostgreSQL so the two backends hand the same
//! models to the domain layer.

mod bus;
mod dataset;

pub use bus::{BusRecord, CategoryColumn, RawBusRow, RawInterval, normalize_rows};
pub use dataset::{Dataset, MAX_DATASET_ID_LENGTH, is_valid_dataset_id, is_valid_table_name};
