//! HTTP response type definitions
//!
//! Success envelopes for the plugin protocol. Field names are part of the
//! wire contract with the editor plugin and stay snake_case.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// The bare success envelope: a message and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// A single mergeability gate as reported by GitLab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeabilityCheck {
    /// Stable identifier of the gate (e.g. `broken_status`, `discussions_not_resolved`).
    pub identifier: String,
    /// Gate status as reported (`SUCCESS`, `FAILED`, `CHECKING`, ...).
    pub status: String,
}

/// Response for `GET /mr/mergeability_checks`.
///
/// The checks are returned in remote order, with no implied priority;
/// an empty list means the project has no gates configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeabilityChecksResponse {
    pub message: String,
    pub mergeability_checks: Vec<MergeabilityCheck>,
}

/// Response for `GET /info`: what the server resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub message: String,
    pub project_path: String,
    pub branch: String,
    pub project_id: u64,
    pub merge_request_iid: u64,
}

/// Response for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
