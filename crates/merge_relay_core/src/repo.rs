//! The git collaborator.
//!
//! Concrete implementations of the effectful operations the identity
//! resolver consumes, backed by the system `git` binary. Shelling out -
//! rather than linking a git library - means the server transparently
//! reuses whatever authentication the user's own git setup provides
//! (ssh agent, credential helpers), which an editor-local tool must do.

use std::process::Command;

use tracing::debug;

use crate::errors::{Error, GitError};
use crate::git::{self, RepositoryIdentity};

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;

/// Handle on the repository in the server's working directory.
///
/// Holds the name of the remote all operations target. Constructed from
/// [`crate::ConnectionSettings`]; there is no global configuration.
#[derive(Debug, Clone)]
pub struct GitRepository {
    remote: String,
}

impl GitRepository {
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
        }
    }

    /// The remote name all operations on this handle target.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Pulls down the latest state from the configured remote.
    pub fn fetch_remote(&self) -> Result<(), GitError> {
        run_git(&["fetch", self.remote.as_str()]).map(|_| ())
    }

    /// The push/fetch URL of the configured remote, trimmed.
    pub fn remote_url(&self) -> Result<String, GitError> {
        run_git(&["remote", "get-url", self.remote.as_str()]).map(|out| out.trim().to_string())
    }

    /// The currently checked-out branch name, trimmed.
    pub fn current_branch(&self) -> Result<String, GitError> {
        run_git(&["rev-parse", "--abbrev-ref", "HEAD"]).map(|out| out.trim().to_string())
    }

    /// Raw tip-commit lookup for `<remote>/<branch>`. Output is returned
    /// untrimmed; [`git::latest_remote_commit`] owns the trimming.
    pub fn log_remote_tip(&self, remote: &str, branch: &str) -> Result<String, GitError> {
        let tracking_ref = format!("{remote}/{branch}");
        run_git(&["log", "-1", "--format=%H", tracking_ref.as_str()])
    }

    /// Resolves the repository identity by wiring this collaborator's
    /// operations into [`git::extract_git_info`].
    pub fn resolve(&self) -> Result<RepositoryIdentity, Error> {
        git::extract_git_info(
            || self.fetch_remote(),
            || self.remote_url(),
            || self.current_branch(),
        )
    }

    /// The tip commit of the resolved branch on the configured remote.
    pub fn latest_remote_commit(&self, identity: &RepositoryIdentity) -> Result<String, Error> {
        git::latest_remote_commit(identity, &self.remote, |remote, branch| {
            self.log_remote_tip(remote, branch)
        })
    }
}

/// Runs `git` with the given arguments and returns its stdout.
///
/// Every failure keeps the full argument list; a non-zero exit also keeps
/// stderr verbatim.
fn run_git(args: &[&str]) -> Result<String, GitError> {
    debug!(args = %args.join(" "), "running git");

    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|source| GitError::Spawn {
            args: args.join(" "),
            source,
        })?;

    if !output.status.success() {
        return Err(GitError::Exited {
            args: args.join(" "),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
