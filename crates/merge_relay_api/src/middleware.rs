//! Request middleware
//!
//! The pipeline every command request passes through, outermost first:
//! method validation, then payload decoding, then the terminal handler.
//! Each stage either calls the wrapped handler exactly once or
//! short-circuits with the error envelope; no stage writes to the response
//! and then calls through.
//!
//! The session context itself reaches handlers through axum `State` - a
//! statically typed accessor, not a keyed lookup - so there is no separate
//! context-injection stage to get wrong.

use axum::{
    body::Body,
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::errors::ApiError;

/// Decoded payloads larger than this are rejected outright.
const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Rejects requests whose method is not in `allowed`.
///
/// Allowed sets are per-route configuration, wired up in
/// [`crate::routes::create_router`]. A rejected request never reaches the
/// wrapped handler.
pub async fn require_methods(
    allowed: &'static [Method],
    request: Request,
    next: Next,
) -> Response {
    if allowed.contains(request.method()) {
        next.run(request).await
    } else {
        ApiError::method_not_allowed(allowed).into_response()
    }
}

/// Decodes the request body into `T` and attaches it as a request
/// extension for the terminal handler.
///
/// The handler retrieves the payload with `Extension<T>` - typed, no raw
/// body re-read, at most one decode per request. Decode failure
/// short-circuits with a 400 envelope carrying the serde error verbatim.
pub async fn decode_payload<T>(request: Request, next: Next) -> Response
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let (mut parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_PAYLOAD_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => return ApiError::payload_decode(err).into_response(),
    };

    let payload: T = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(err) => return ApiError::payload_decode(err).into_response(),
    };

    parts.extensions.insert(payload);
    next.run(Request::from_parts(parts, Body::empty())).await
}

/// Request tracing middleware.
///
/// Adds request ID and logging context for observability.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4();

    info!(
        %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "request started"
    );

    let response = next.run(request).await;

    info!(
        %request_id,
        status = %response.status(),
        "request completed"
    );

    response
}

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;
