//! HTTP request type definitions
//!
//! One payload struct per mutating command. Every field carries
//! `#[serde(default)]` semantics so the plugin can omit fields it does not
//! care about and get the zero-value behavior.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Payload for `POST /mr/merge`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptMergeRequestRequest {
    /// Merge as soon as all checks pass instead of immediately.
    pub auto_merge: bool,

    /// Delete the source branch after merging.
    pub delete_branch: bool,

    /// Commit message for the squash commit. Empty means "let GitLab pick";
    /// it is then omitted from the remote call entirely.
    pub squash_message: String,

    /// Squash the source branch commits into a single commit.
    pub squash: bool,
}
