//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB and cache (public)
//! - `/api/users`, `/api/users/login` - Registration and login (public)
//! - `/api/*`            - Everything else (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on credential endpoints
//! - **Authentication** - Bearer token resolved to a session principal
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public = api::routes::public_routes();
    let protected = api::routes::protected_routes(state.clone());

    let (public, protected) = if behind_proxy {
        (
            public.layer(rate_limit::forwarded_secure_layer()),
            protected.layer(rate_limit::forwarded_layer()),
        )
    } else {
        (
            public.layer(rate_limit::secure_layer()),
            protected.layer(rate_limit::layer()),
        )
    };

    NormalizePathLayer::trim_trailing_slash().layer(compose(state, public, protected))
}

/// Router without rate limiting, for callers that have no peer address
/// such as in-process test servers.
pub fn router(state: AppState) -> Router {
    let protected = api::routes::protected_routes(state.clone());
    compose(state, api::routes::public_routes(), protected)
}

fn compose(state: AppState, public: Router<AppState>, protected: Router<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", public.merge(protected))
        .with_state(state)
        .layer(tracing::layer())
}
