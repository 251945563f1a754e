//! HTTP API: dataset endpoints, OpenAPI document and the embedded dashboard

pub mod embedded;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

pub use server::ApiServer;
