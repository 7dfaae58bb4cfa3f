//! HTTP routing configuration
//!
//! Routes and their middleware chains:
//!
//! - POST /mr/merge               - accept/merge the session's MR
//! - GET  /mr/mergeability_checks - list merge gates
//! - GET  /info                   - resolved session info
//! - GET  /health                 - liveness
//!
//! Routes are registered with `any(...)` and a per-route method guard so a
//! disallowed method yields the structured 405 envelope the plugin
//! understands, not the framework default.

use std::time::Duration;

use axum::{
    extract::Request,
    http::Method,
    middleware::{self, Next},
    routing::{any, get},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers, middleware as api_middleware, models::request::AcceptMergeRequestRequest, AppState,
};

const MERGE_METHODS: &[Method] = &[Method::POST];
const READ_METHODS: &[Method] = &[Method::GET];

/// Create the complete router with all routes and middleware configured.
///
/// Per-route layers run outermost-last-added: the method guard rejects
/// before the payload decode runs, and the decode runs before the handler.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http();
    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    Router::new()
        .route(
            "/mr/merge",
            any(handlers::accept_merge_request)
                .layer(middleware::from_fn(
                    api_middleware::decode_payload::<AcceptMergeRequestRequest>,
                ))
                .layer(middleware::from_fn(|request: Request, next: Next| {
                    api_middleware::require_methods(MERGE_METHODS, request, next)
                })),
        )
        .route(
            "/mr/mergeability_checks",
            any(handlers::mergeability_checks).layer(middleware::from_fn(
                |request: Request, next: Next| {
                    api_middleware::require_methods(READ_METHODS, request, next)
                },
            )),
        )
        .route(
            "/info",
            any(handlers::project_info).layer(middleware::from_fn(
                |request: Request, next: Next| {
                    api_middleware::require_methods(READ_METHODS, request, next)
                },
            )),
        )
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(api_middleware::trace_requests))
        .layer(timeout_layer)
        .layer(trace_layer)
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
