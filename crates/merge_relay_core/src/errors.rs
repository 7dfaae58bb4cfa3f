//! Error types for repository identity resolution.
//!
//! Two layers: [`GitError`] describes a single failed git invocation with
//! its full command context, and [`Error`] is the resolution taxonomy that
//! tells callers which step of identity resolution went wrong.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// A failed invocation of the system `git` binary.
///
/// The full argument list is preserved in every variant so that a failure
/// can be diagnosed from the error message alone.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` process could not be spawned at all (binary missing,
    /// permission denied, ...).
    #[error("failed to run `git {args}`: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    /// `git` ran but exited with a non-zero status. Stderr is carried
    /// verbatim.
    #[error("`git {args}` exited with {status}: {stderr}")]
    Exited {
        args: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Errors produced while resolving the repository identity.
///
/// Each variant corresponds to one step of [`crate::extract_git_info`] or
/// [`crate::latest_remote_commit`]; the underlying git failure is kept as
/// the error source and rendered into the message verbatim.
#[derive(Debug, Error)]
pub enum Error {
    /// `git fetch` against the configured remote failed.
    #[error("could not get latest information from remote: {0}")]
    RefreshFailed(#[source] GitError),

    /// The remote URL for the configured remote could not be read.
    #[error("could not get project remote URL: {0}")]
    RemoteUrlUnavailable(#[source] GitError),

    /// The remote URL did not match any supported URL shape. Carries the
    /// offending URL for diagnostics.
    #[error("invalid git URL format: {url}")]
    InvalidGitUrlFormat { url: String },

    /// The currently checked-out branch could not be determined.
    #[error("failed to get current branch: {0}")]
    BranchUnavailable(#[source] GitError),

    /// The tip commit of `<remote>/<branch>` could not be looked up.
    #[error("failed to look up latest commit on {remote}/{branch}: {source}")]
    CommitUnavailable {
        remote: String,
        branch: String,
        #[source]
        source: GitError,
    },
}
