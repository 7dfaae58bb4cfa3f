//! Error handling and HTTP error conversion
//!
//! Every failure in the server is converted at the HTTP boundary into the
//! same envelope: a stable numeric status, a short human message, and a
//! details string carrying the underlying cause verbatim. The details are
//! what let the plugin distinguish "could not reach GitLab" from "GitLab
//! rejected the request" from "malformed local repository state".

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error envelope for all API errors.
///
/// Exactly one envelope is written per failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Numeric HTTP status, repeated in the body for the plugin's benefit.
    pub status: u16,

    /// Short human-readable message.
    pub message: String,

    /// The underlying cause, verbatim.
    pub details: String,
}

/// A failure ready to be written as the error envelope.
///
/// Handlers and middleware return this; the [`IntoResponse`] impl is the
/// single place a response body is produced for errors.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: impl ToString) -> Self {
        Self {
            status,
            message: message.into(),
            details: details.to_string(),
        }
    }

    /// A request arrived with a method the route does not serve.
    ///
    /// The message enumerates the allowed methods joined with "or".
    pub fn method_not_allowed(allowed: &[Method]) -> Self {
        let expected = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("Expected {expected}"),
            "Invalid request type",
        )
    }

    /// The request body could not be decoded into the expected payload.
    pub fn payload_decode(err: impl ToString) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Could not parse JSON payload",
            err,
        )
    }

    /// A remote operation failed; `err` becomes the details verbatim.
    pub fn remote(message: impl Into<String>, err: impl ToString) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, err)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// A handled failure on a specific endpoint, used when the remote answered
/// but its answer has to be treated as an error. Carries the request path.
#[derive(Debug, Error)]
#[error("An error occurred on the {0} endpoint")]
pub struct EndpointError(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_error(&self);

        let body = ErrorResponse {
            status: self.status.as_u16(),
            message: self.message,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError) {
    match error.status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
            tracing::error!(
                status = error.status.as_u16(),
                message = %error.message,
                details = %error.details,
                "request failed"
            );
        }
        StatusCode::BAD_REQUEST | StatusCode::METHOD_NOT_ALLOWED => {
            tracing::warn!(
                status = error.status.as_u16(),
                message = %error.message,
                "request rejected"
            );
        }
        _ => {
            tracing::info!(status = error.status.as_u16(), message = %error.message, "request failed");
        }
    }
}
