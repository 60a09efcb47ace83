//! Top-level router configuration combining page and machine routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`   - Short link redirect
//! - `GET  /health`   - Health check: data file readable, record counts
//! - pages            - See [`crate::web::routes::routes`]
//! - `/static/*`      - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Session** - Cookie resolution for page routes only
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::session;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "static";

/// Builds the router without path normalization.
///
/// Used directly by tests; [`app_router`] wraps it for serving.
pub fn router(state: AppState) -> Router {
    let pages = web::routes::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        session::layer,
    ));

    Router::new()
        .merge(pages)
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
