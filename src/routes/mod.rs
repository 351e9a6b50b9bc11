//! HTTP routes for hookgate
//!
//! Operational endpoints are served locally; every other method and path
//! goes through the forwarding pipeline.

pub mod forward;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{basic_auth::basic_auth_middleware, whitelist::whitelist_middleware},
    AppState,
};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Operational endpoints - never forwarded, no gating
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    // Everything else lands on the forwarding pipeline.
    // Middleware is applied in reverse order (last applied runs first)
    // So: basic auth runs first, then the whitelist check
    let forward_routes = Router::new()
        .fallback(forward::forward_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            whitelist_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(forward_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
