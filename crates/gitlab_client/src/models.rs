//! Wire types for the GitLab REST and GraphQL APIs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Options for accepting a merge request via the REST API.
///
/// Fields set to `None` are omitted from the request body entirely, leaving
/// the remote's default behavior intact. Use `Default::default()` and set
/// the fields the caller cares about.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct AcceptMergeRequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_remove_source_branch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_commit_message: Option<String>,
}

/// The subset of a GitLab merge request the server consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,

    #[serde(default)]
    pub title: String,

    /// Lifecycle state as reported by GitLab (`opened`, `merged`, ...).
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub web_url: String,
}

/// A GraphQL query plus its variables, ready to post to `/api/graphql`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlQuery {
    pub query: String,
    pub variables: Value,
}

/// A remote answer with its transport status preserved.
///
/// GitLab can produce a non-error response the caller still has to treat as
/// a failure (redirects, rejections). Keeping the status next to the
/// decoded body lets callers apply their own policy; `body` is `None` when
/// the status made decoding meaningless.
#[derive(Debug, Clone)]
pub struct RemoteResponse<T> {
    pub status: u16,
    pub body: Option<T>,
}

impl<T> RemoteResponse<T> {
    /// Whether the remote status is in the 2xx success class.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
