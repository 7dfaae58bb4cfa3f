//! Error types for GitLab client operations.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while calling the GitLab REST or GraphQL APIs.
///
/// Transport-level failures (connection refused, TLS, timeouts imposed by
/// the caller) are distinct from GitLab answering with something the client
/// cannot use, so handlers can tell "could not reach the remote" apart from
/// "the remote rejected the request".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request never produced a usable response.
    #[error("request to GitLab failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// GitLab responded, but the body could not be decoded into the
    /// expected shape.
    #[error("failed to deserialize GitLab response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GraphQL endpoint reported query-level errors. Carries the
    /// concatenated error messages from the response.
    #[error("GitLab GraphQL query failed: {0}")]
    Graphql(String),

    /// GitLab answered with a status the operation cannot interpret.
    #[error("GitLab returned an unexpected response: HTTP {status}")]
    UnexpectedResponse { status: u16 },
}
