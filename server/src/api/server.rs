//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::embedded;
use super::middleware::{self, AllowedOrigins};
use super::openapi::openapi_json;
use super::routes::{datasets, health};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Build the full router: API, OpenAPI document and the embedded page
    pub fn router(&self) -> Router {
        let app = &self.app;

        let ui_routes = Router::new().fallback(embedded::serve_assets);

        let dataset_routes = datasets::routes(
            app.database.clone(),
            app.registry.clone(),
            app.config.filters.clone(),
        );

        Router::new()
            .route("/", get(|| async { Redirect::temporary("/ui") }))
            .route("/api/openapi.json", get(openapi_json))
            .nest("/api/v1/health", health::routes(app.database.clone()))
            .nest("/api/v1/datasets", dataset_routes)
            .nest("/ui", ui_routes)
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&self.allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until shutdown is triggered. Returns CoreApp for graceful shutdown.
    pub async fn start(self) -> Result<CoreApp> {
        let router = self.router();
        let app = self.app;

        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);
        let listener = TcpListener::bind(addr).await?;
        tracing::debug!(%addr, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(app.shutdown.wait())
            .await?;

        tracing::debug!("HTTP server stopped");
        Ok(app)
    }
}
