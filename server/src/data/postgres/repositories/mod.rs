//! PostgreSQL repositories

pub mod buses;
