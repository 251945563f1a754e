//! API route handlers

pub mod datasets;
pub mod health;
