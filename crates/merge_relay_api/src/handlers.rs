//! HTTP request handlers
//!
//! One handler per command. Each handler:
//! 1. Takes the decoded payload from the request extension (mutating
//!    commands) and the session context from state
//! 2. Calls exactly one narrow remote-client capability
//! 3. Translates the result into the success or error envelope
//!
//! Handlers hold no state across calls; every request is independent.

use axum::{extract::State, http::Uri, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use gitlab_client::{AcceptMergeRequestOptions, GraphqlQuery, GraphqlRunner, MergeRequestAccepter};

use crate::{
    errors::{ApiError, EndpointError},
    models::{
        request::AcceptMergeRequestRequest,
        response::{
            HealthResponse, InfoResponse, MergeabilityCheck, MergeabilityChecksResponse,
            SuccessResponse,
        },
    },
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

const MERGEABILITY_CHECKS_QUERY: &str = "
query GetMergeabilityChecks($projectPath: ID!, $iid: String!) {
	project(fullPath: $projectPath) {
		mergeRequest(iid: $iid) {
			mergeabilityChecks {
				identifier
				status
			}
		}
	}
}
";

/// POST /mr/merge
///
/// Accepts the session's merge request, either immediately or - with
/// `auto_merge` - once all checks pass. The squash message is forwarded
/// only when non-empty so that an absent message leaves GitLab's default
/// squash-commit behavior intact.
pub async fn accept_merge_request(
    State(state): State<AppState>,
    uri: Uri,
    Extension(payload): Extension<AcceptMergeRequestRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let options = AcceptMergeRequestOptions {
        auto_merge: Some(payload.auto_merge),
        squash: Some(payload.squash),
        should_remove_source_branch: Some(payload.delete_branch),
        squash_commit_message: (!payload.squash_message.is_empty())
            .then(|| payload.squash_message.clone()),
    };

    let response = state
        .merge_client
        .accept_merge_request(
            state.context.project.project_id,
            state.context.project.merge_request_iid,
            &options,
        )
        .await
        .map_err(|err| ApiError::remote("Could not merge MR", err))?;

    // GitLab answered, but not with a success: a handled failure, reported
    // through the same envelope as a transport error yet with the endpoint
    // as the details so the two stay distinguishable.
    if response.status >= 300 {
        return Err(ApiError::remote(
            "Could not merge MR",
            EndpointError(uri.path().to_string()),
        ));
    }

    // Chosen solely by the flag; the remote's asynchronous outcome is never
    // inspected here.
    let message = if payload.auto_merge {
        "MR set to be merged when all checks pass"
    } else {
        "MR merged successfully"
    };

    info!(auto_merge = payload.auto_merge, "merge request accepted");

    Ok(Json(SuccessResponse {
        message: message.to_string(),
    }))
}

/// GET /mr/mergeability_checks
///
/// Returns the merge gates GitLab reports for the session's merge request,
/// in remote order, empty list included.
pub async fn mergeability_checks(
    State(state): State<AppState>,
) -> Result<Json<MergeabilityChecksResponse>, ApiError> {
    let checks = fetch_mergeability_checks(&state)
        .await
        .map_err(|err| ApiError::remote("Could not get mergeability checks", err))?;

    Ok(Json(MergeabilityChecksResponse {
        message: "Mergeability checks retrieved".to_string(),
        mergeability_checks: checks,
    }))
}

/// GET /info
///
/// What the server resolved at startup, so the plugin can confirm it is
/// talking to the right project and branch.
pub async fn project_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let context = &state.context;
    Json(InfoResponse {
        message: "Project info retrieved".to_string(),
        project_path: context.git.project_path(),
        branch: context.git.branch_name.clone(),
        project_id: context.project.project_id,
        merge_request_iid: context.project.merge_request_iid,
    })
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Failures while fetching mergeability checks, all rendered with the same
/// stable prefix the plugin matches on.
#[derive(Debug, Error)]
enum FetchChecksError {
    #[error("failed to fetch mergeability checks: {0}")]
    Query(#[from] gitlab_client::Error),

    #[error("failed to fetch mergeability checks: {0}")]
    Decode(#[from] serde_json::Error),
}

async fn fetch_mergeability_checks(
    state: &AppState,
) -> Result<Vec<MergeabilityCheck>, FetchChecksError> {
    let body = state
        .graphql
        .run(GraphqlQuery {
            query: MERGEABILITY_CHECKS_QUERY.to_string(),
            variables: json!({
                "projectPath": state.context.git.project_path(),
                "iid": state.context.project.merge_request_iid.to_string(),
            }),
        })
        .await?;

    let response: ChecksQueryResponse = serde_json::from_value(body)?;

    Ok(response
        .data
        .and_then(|data| data.project)
        .and_then(|project| project.merge_request)
        .and_then(|merge_request| merge_request.mergeability_checks)
        .unwrap_or_default())
}

// Mirror of the GraphQL response nesting. Every level is optional: a
// missing project or merge request decodes to an empty check list rather
// than an error.
#[derive(Debug, Deserialize)]
struct ChecksQueryResponse {
    data: Option<ChecksData>,
}

#[derive(Debug, Deserialize)]
struct ChecksData {
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    #[serde(rename = "mergeRequest")]
    merge_request: Option<MergeRequestNode>,
}

#[derive(Debug, Deserialize)]
struct MergeRequestNode {
    #[serde(rename = "mergeabilityChecks")]
    mergeability_checks: Option<Vec<MergeabilityCheck>>,
}
