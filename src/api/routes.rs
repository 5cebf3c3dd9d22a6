//! API route configuration.
//!
//! Registration requires HTTP Basic authentication via
//! [`crate::api::middleware::auth`]. Only the `POST` handler is guarded:
//! `new` is also a valid identifier, so `GET /new` resolves like any other.

use crate::api::handlers::{health_handler, register_handler, resolve_path_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::get,
};

/// Registration routes.
///
/// # Endpoints
///
/// - `POST /new` - Register a URL (first-or-create, Basic auth)
/// - `GET  /new` - Resolve the identifier `new`
pub fn registration_routes(state: AppState) -> Router<AppState> {
    let register = register_handler.layer(middleware::from_fn_with_state(state, auth::layer));

    Router::new().route("/new", get(resolve_path_handler).post(register))
}

/// Operational routes, kept under a two-segment prefix so they never
/// shadow an identifier.
///
/// # Endpoints
///
/// - `GET /api/health` - Health check
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_handler))
}
