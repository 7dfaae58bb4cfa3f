//! Shared fakes and fixtures for this crate's tests.
//!
//! Each fake implements exactly one remote capability, mirroring how the
//! handlers consume them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use gitlab_client::{
    AcceptMergeRequestOptions, Error, GraphqlQuery, GraphqlRunner, MergeRequest,
    MergeRequestAccepter, RemoteResponse,
};
use merge_relay_core::RepositoryIdentity;

use crate::{AppState, ProjectInfo, RequestContext};

pub(crate) const TEST_PROJECT_ID: u64 = 42;
pub(crate) const TEST_MR_IID: u64 = 7;

/// What [`FakeMergeClient`] does when called.
pub(crate) enum AcceptOutcome {
    /// Remote answers 200 with a merged MR body.
    Merged,
    /// Remote produces a response with this non-success status.
    Declined(u16),
    /// The call never produces a response.
    TransportError,
}

/// A fake remote that implements only `MergeRequestAccepter` and records
/// what it was called with.
pub(crate) struct FakeMergeClient {
    outcome: AcceptOutcome,
    pub seen: Mutex<Option<(u64, u64, AcceptMergeRequestOptions)>>,
}

impl FakeMergeClient {
    pub fn new(outcome: AcceptOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            seen: Mutex::new(None),
        })
    }
}

#[async_trait]
impl MergeRequestAccepter for FakeMergeClient {
    async fn accept_merge_request(
        &self,
        project_id: u64,
        iid: u64,
        options: &AcceptMergeRequestOptions,
    ) -> Result<RemoteResponse<MergeRequest>, Error> {
        *self.seen.lock().unwrap() = Some((project_id, iid, options.clone()));

        match self.outcome {
            AcceptOutcome::Merged => Ok(RemoteResponse {
                status: 200,
                body: Some(sample_merge_request()),
            }),
            AcceptOutcome::Declined(status) => Ok(RemoteResponse { status, body: None }),
            AcceptOutcome::TransportError => Err(transport_error()),
        }
    }
}

/// What [`FakeGraphqlClient`] does when called.
pub(crate) enum GraphqlOutcome {
    Body(Value),
    Failure(String),
}

/// A fake remote that implements only `GraphqlRunner`.
pub(crate) struct FakeGraphqlClient {
    outcome: GraphqlOutcome,
    pub seen: Mutex<Option<GraphqlQuery>>,
}

impl FakeGraphqlClient {
    pub fn new(outcome: GraphqlOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            seen: Mutex::new(None),
        })
    }
}

#[async_trait]
impl GraphqlRunner for FakeGraphqlClient {
    async fn run(&self, query: GraphqlQuery) -> Result<Value, Error> {
        *self.seen.lock().unwrap() = Some(query);

        match &self.outcome {
            GraphqlOutcome::Body(body) => Ok(body.clone()),
            GraphqlOutcome::Failure(message) => Err(Error::Graphql(message.clone())),
        }
    }
}

/// The deterministic remote failure used across tests.
pub(crate) fn transport_error() -> Error {
    Error::UnexpectedResponse { status: 503 }
}

pub(crate) fn sample_merge_request() -> MergeRequest {
    MergeRequest {
        id: 100,
        iid: TEST_MR_IID,
        title: "Add feature".to_string(),
        state: "merged".to_string(),
        web_url: "https://gitlab.com/namespace/dummy-test-repo/-/merge_requests/7".to_string(),
    }
}

pub(crate) fn test_identity() -> RepositoryIdentity {
    RepositoryIdentity {
        remote_url: "https://gitlab.com/namespace/dummy-test-repo.git".to_string(),
        namespace: "namespace".to_string(),
        project_name: "dummy-test-repo".to_string(),
        branch_name: "feature-branch".to_string(),
    }
}

pub(crate) fn test_state(
    merge_client: Arc<dyn MergeRequestAccepter>,
    graphql: Arc<dyn GraphqlRunner>,
) -> AppState {
    AppState::new(
        RequestContext {
            project: ProjectInfo {
                project_id: TEST_PROJECT_ID,
                merge_request_iid: TEST_MR_IID,
            },
            git: test_identity(),
        },
        merge_client,
        graphql,
    )
}

/// A GraphQL response body carrying the given (identifier, status) checks.
pub(crate) fn graphql_checks_body(checks: &[(&str, &str)]) -> Value {
    let entries: Vec<Value> = checks
        .iter()
        .map(|(identifier, status)| json!({ "identifier": identifier, "status": status }))
        .collect();
    json!({
        "data": {
            "project": {
                "mergeRequest": {
                    "mergeabilityChecks": entries
                }
            }
        }
    })
}

/// Reads a response body to completion and parses it as JSON.
pub(crate) async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body is readable");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
