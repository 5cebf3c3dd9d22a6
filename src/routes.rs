//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{identifier}`      - Resolve and redirect (public)
//! - `GET  /{identifier}.json` - Resolve as JSON (public)
//! - `POST /new`               - Register a URL (Basic auth)
//! - `GET  /new`               - Resolve the identifier `new` (public)
//! - `GET  /api/health`        - Health check (public)
//! - anything else             - Redirect to the fallback URL

use crate::api;
use crate::api::handlers::{fallback_handler, resolve_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{identifier}", get(resolve_handler))
        .merge(api::routes::registration_routes(state.clone()))
        .merge(api::routes::api_routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the served application: [`router`] with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
