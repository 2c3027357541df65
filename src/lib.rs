//! # mockapi - Mock API Server
//!
//! A mock HTTP server that answers every configured route with randomly
//! generated JSON shaped by a declarative schema, so a frontend can be built
//! against a fake backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mockapi::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let app = mockapi::create_app(&settings)?;
//!
//!     let listener = tokio::net::TcpListener::bind(settings.server.address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: field specs, schemas, presets and route bindings
//! - **Adapters**: value generation, schema mapping and the axum route table
//! - **Config**: settings file, routes directory and CLI overrides

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::MockRouter;
use crate::config::Settings;
use crate::domain::RouteError;
use axum::Router;

/// Creates the Axum application with every configured route registered.
///
/// Fails on the first route that cannot be registered. Settings loaded
/// through [`Settings::new`] have already been validated, so this only
/// happens for hand-built settings.
pub fn create_app(settings: &Settings) -> Result<Router, RouteError> {
    let mut mock_router = MockRouter::new();
    for route in &settings.routes {
        mock_router.register_route(&route.path, &route.config)?;
    }
    Ok(with_cors(mock_router.into_router()))
}

/// Applies the permissive CORS policy: any origin, method and header.
pub fn with_cors(router: Router) -> Router {
    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
