//! MergeRelay REST API
//!
//! This crate provides the HTTP surface of MergeRelay: the command server
//! an editor plugin talks to for merge-request operations against GitLab.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - The middleware chain (method validation, payload decoding, request
//!   tracing)
//! - Handler services, one per command, each over a narrow remote-client
//!   capability
//! - Error mapping from domain failures to the response envelope
//! - Routing and server configuration
//!
//! The dependency flows HTTP API -> core/client crates, never the reverse.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types for convenience
pub use errors::{ApiError, ErrorResponse};
pub use server::{ApiConfig, ApiServer};

use std::sync::Arc;

use gitlab_client::{GraphqlRunner, MergeRequestAccepter};
use merge_relay_core::RepositoryIdentity;

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// The GitLab-side coordinates of the session: which project and which
/// merge request every command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectInfo {
    pub project_id: u64,
    pub merge_request_iid: u64,
}

/// Everything a handler needs to know about the session.
///
/// Built once at server start and read-only afterwards; handlers borrow it
/// through [`AppState`] and never mutate it. Re-resolving the repository
/// identity requires restarting the server.
#[derive(Debug)]
pub struct RequestContext {
    pub project: ProjectInfo,
    pub git: RepositoryIdentity,
}

/// Application state shared across handlers.
///
/// Each handler consumes exactly one of the client capabilities; holding
/// them as separate trait objects keeps handlers substitutable with
/// single-method fakes in tests.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<RequestContext>,
    pub merge_client: Arc<dyn MergeRequestAccepter>,
    pub graphql: Arc<dyn GraphqlRunner>,
}

impl AppState {
    /// Create new application state from the resolved session context and
    /// the remote-client capabilities.
    pub fn new(
        context: RequestContext,
        merge_client: Arc<dyn MergeRequestAccepter>,
        graphql: Arc<dyn GraphqlRunner>,
    ) -> Self {
        Self {
            context: Arc::new(context),
            merge_client,
            graphql,
        }
    }
}
