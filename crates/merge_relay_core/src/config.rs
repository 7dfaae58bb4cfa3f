//! Connection configuration.
//!
//! Everything the server needs to talk to GitLab and to the local
//! repository, carried explicitly. The editor plugin provides these values
//! through the environment when it launches the server.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default GitLab instance when `GITLAB_URL` is not set.
const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Default git remote when `GIT_REMOTE` is not set.
const DEFAULT_REMOTE: &str = "origin";

/// Errors building [`ConnectionSettings`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Settings for one server process: which remote to read locally, which
/// GitLab instance to call, and which project/MR the session is about.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Name of the git remote identity resolution runs against.
    pub remote: String,
    /// Base URL of the GitLab instance.
    pub gitlab_url: Url,
    /// Pre-authenticated API token. Never logged.
    pub token: SecretString,
    /// Numeric id of the GitLab project.
    pub project_id: u64,
    /// The iid of the merge request this session operates on.
    pub merge_request_iid: u64,
}

impl ConnectionSettings {
    /// Builds settings from the process environment.
    ///
    /// Required: `GITLAB_TOKEN`, `GITLAB_PROJECT_ID`, `MERGE_REQUEST_IID`.
    /// Optional: `GITLAB_URL` (default `https://gitlab.com`), `GIT_REMOTE`
    /// (default `origin`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds settings through an injected variable lookup. Seam for tests;
    /// [`Self::from_env`] is this over `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("GITLAB_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingVar("GITLAB_TOKEN"))?;

        let gitlab_url = lookup("GITLAB_URL").unwrap_or_else(|| DEFAULT_GITLAB_URL.to_string());
        let gitlab_url = Url::parse(&gitlab_url).map_err(|err| ConfigError::InvalidVar {
            var: "GITLAB_URL",
            reason: err.to_string(),
        })?;

        Ok(Self {
            remote: lookup("GIT_REMOTE").unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            gitlab_url,
            token: SecretString::from(token),
            project_id: required_u64(&lookup, "GITLAB_PROJECT_ID")?,
            merge_request_iid: required_u64(&lookup, "MERGE_REQUEST_IID")?,
        })
    }
}

fn required_u64<F>(lookup: &F, var: &'static str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .ok_or(ConfigError::MissingVar(var))?
        .parse()
        .map_err(|err: std::num::ParseIntError| ConfigError::InvalidVar {
            var,
            reason: err.to_string(),
        })
}
