//! SQLite repositories

pub mod buses;
