//! MergeRelay server binary
//!
//! Launched by the editor plugin inside a repository checkout. Resolves the
//! repository identity, builds the GitLab client from the environment the
//! plugin provides, and serves the command API until shut down.
//!
//! # Environment Variables
//!
//! - `GITLAB_TOKEN`: pre-authenticated API token (required)
//! - `GITLAB_PROJECT_ID`: numeric project id (required)
//! - `MERGE_REQUEST_IID`: merge request iid for this session (required)
//! - `GITLAB_URL`: GitLab instance base URL (default: https://gitlab.com)
//! - `GIT_REMOTE`: git remote to resolve against (default: origin)
//! - `API_HOST`: host to bind to (default: 127.0.0.1)
//! - `API_PORT`: port to listen on (default: 8080)
//! - `RUST_LOG`: log filter (default: info)

use std::{env, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gitlab_client::GitLabClient;
use merge_relay_api::{ApiConfig, ApiServer, AppState, ProjectInfo, RequestContext, DEFAULT_PORT};
use merge_relay_core::{ConnectionSettings, GitRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = ConnectionSettings::from_env().context("loading connection settings")?;

    let repository = GitRepository::new(settings.remote.clone());
    let git_info = repository
        .resolve()
        .context("resolving repository identity")?;
    info!(
        project_path = %git_info.project_path(),
        branch = %git_info.branch_name,
        "resolved repository identity"
    );

    match repository.latest_remote_commit(&git_info) {
        Ok(commit) => info!(%commit, "tip of the remote branch"),
        Err(err) => warn!(error = %err, "could not determine the remote tip commit"),
    }

    let client = Arc::new(GitLabClient::new(
        settings.gitlab_url.clone(),
        settings.token.clone(),
    ));
    let context = RequestContext {
        project: ProjectInfo {
            project_id: settings.project_id,
            merge_request_iid: settings.merge_request_iid,
        },
        git: git_info,
    };
    let state = AppState::new(context, client.clone(), client);

    let config = ApiConfig {
        host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        port: env::var("API_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT),
    };

    ApiServer::new(config, state).serve().await
}
