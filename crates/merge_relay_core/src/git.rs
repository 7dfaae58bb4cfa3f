//! Repository identity resolution.
//!
//! Derives the canonical (namespace, project, branch) tuple for the checkout
//! the server was launched in. The three git effects involved - refreshing
//! remote state, reading the remote URL and reading the current branch - are
//! injected as closures, so the parsing logic itself never touches git and
//! is fully testable in isolation. [`crate::repo::GitRepository`] supplies
//! the real implementations.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{Error, GitError};

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;

/// Matches the three remote URL shapes GitLab hands out:
///
/// ```text
/// https://gitlab.com/namespace/project.git
/// ssh://git@gitlab.com/namespace/project.git
/// git@gitlab.com:namespace/project.git
/// ```
///
/// with an optional port, an optional trailing `.git`, and namespaces that
/// may contain any number of subgroup segments. Exactly two captures: the
/// namespace (everything before the final path segment) and the project
/// name (the final segment).
static REMOTE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://|ssh://|git@)[^/:]+(?::\d+)?[/:](.*)/([^/]+?)(?:\.git)?$")
        .expect("remote URL pattern is valid")
});

/// The identity of the repository the server is running in.
///
/// Constructed once at startup by [`extract_git_info`] and immutable for
/// the lifetime of the process; a fresh resolution requires restarting the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    /// The raw remote URL the identity was derived from.
    pub remote_url: String,
    /// Namespace, possibly with subgroup segments (`group/subgroup`).
    pub namespace: String,
    /// The final path segment of the remote URL, with `.git` stripped.
    pub project_name: String,
    /// The branch checked out at resolution time.
    pub branch_name: String,
}

impl RepositoryIdentity {
    /// The GitLab project full path, which is not necessarily the same as
    /// the project name. This is the canonical identifier the remote API
    /// expects for namespaced routes.
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.namespace, self.project_name)
    }
}

/// Resolves the identity of the current repository.
///
/// Runs the three injected effects in strict order - refresh, remote URL,
/// current branch - and parses the URL in between. Each failure maps to its
/// own [`Error`] variant so callers can tell a fetch problem from a
/// malformed remote. No partially populated identity is ever returned.
pub fn extract_git_info<R, U, B>(
    refresh: R,
    remote_url: U,
    current_branch: B,
) -> Result<RepositoryIdentity, Error>
where
    R: FnOnce() -> Result<(), GitError>,
    U: FnOnce() -> Result<String, GitError>,
    B: FnOnce() -> Result<String, GitError>,
{
    refresh().map_err(Error::RefreshFailed)?;

    let url = remote_url().map_err(Error::RemoteUrlUnavailable)?;

    let (namespace, project_name) = parse_remote_url(&url)?;

    let branch_name = current_branch().map_err(Error::BranchUnavailable)?;

    Ok(RepositoryIdentity {
        remote_url: url,
        namespace,
        project_name,
        branch_name,
    })
}

/// Splits a remote URL into (namespace, project name).
///
/// A URL that does not match [`REMOTE_URL_PATTERN`], or that matches with
/// an empty namespace or project segment, is rejected wholesale.
fn parse_remote_url(url: &str) -> Result<(String, String), Error> {
    let invalid = || Error::InvalidGitUrlFormat {
        url: url.to_string(),
    };

    let captures = REMOTE_URL_PATTERN.captures(url).ok_or_else(invalid)?;
    let (Some(namespace), Some(project_name)) = (captures.get(1), captures.get(2)) else {
        return Err(invalid());
    };

    let namespace = namespace.as_str();
    let project_name = project_name.as_str();
    if namespace.is_empty() || project_name.is_empty() {
        return Err(invalid());
    }

    Ok((namespace.to_string(), project_name.to_string()))
}

/// Looks up the tip commit of `<remote>/<branch>` for the resolved identity.
///
/// The actual log invocation is injected; its raw output is trimmed of
/// surrounding whitespace. Failures carry the remote and branch that were
/// queried so the exact command context survives into the error message.
pub fn latest_remote_commit<L>(
    identity: &RepositoryIdentity,
    remote: &str,
    run_log: L,
) -> Result<String, Error>
where
    L: FnOnce(&str, &str) -> Result<String, GitError>,
{
    let raw = run_log(remote, &identity.branch_name).map_err(|source| Error::CommitUnavailable {
        remote: remote.to_string(),
        branch: identity.branch_name.clone(),
        source,
    })?;

    Ok(raw.trim().to_string())
}
