//! Crate for interacting with the GitLab REST and GraphQL APIs.
//!
//! This crate provides the remote-client capability the MergeRelay server
//! consumes: narrow, one-concern traits ([`MergeRequestAccepter`],
//! [`GraphqlRunner`]) plus a thin [`GitLabClient`] implementing both over
//! HTTP with a pre-authenticated token. Handlers depend on exactly the
//! trait they need, so tests substitute a fake implementing a single
//! method without constructing the full client surface.
//!
//! The client deliberately carries no retry, rate-limit, or timeout policy;
//! deadlines and retries belong to the caller.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{AcceptMergeRequestOptions, GraphqlQuery, MergeRequest, RemoteResponse};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Capability to accept (merge) a merge request.
///
/// One method on purpose: the accept-merge handler is parameterized over
/// this trait alone.
#[async_trait]
pub trait MergeRequestAccepter: Send + Sync {
    /// Accepts merge request `iid` of project `project_id` with the given
    /// options.
    ///
    /// A transport failure is an `Err`; a response GitLab produced - even a
    /// rejecting one - is an `Ok` whose [`RemoteResponse::status`] the
    /// caller inspects.
    async fn accept_merge_request(
        &self,
        project_id: u64,
        iid: u64,
        options: &AcceptMergeRequestOptions,
    ) -> Result<RemoteResponse<MergeRequest>, Error>;
}

/// Capability to run a GraphQL query against the instance-wide endpoint.
///
/// Returns the raw response body; unmarshalling into a typed shape stays
/// with the caller so this trait remains object-safe.
#[async_trait]
pub trait GraphqlRunner: Send + Sync {
    async fn run(&self, query: GraphqlQuery) -> Result<Value, Error>;
}

/// A client for the GitLab API, authenticated with a personal or project
/// access token supplied by the launching plugin.
#[derive(Debug)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl GitLabClient {
    /// Creates a client for the instance at `base_url`.
    ///
    /// The token is sent as `PRIVATE-TOKEN` on every request and is never
    /// logged.
    pub fn new(base_url: Url, token: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Joins an API path onto the instance base URL.
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl MergeRequestAccepter for GitLabClient {
    #[instrument(skip(self, options), fields(project_id = project_id, iid = iid))]
    async fn accept_merge_request(
        &self,
        project_id: u64,
        iid: u64,
        options: &AcceptMergeRequestOptions,
    ) -> Result<RemoteResponse<MergeRequest>, Error> {
        let url = self.api_url(&format!(
            "api/v4/projects/{project_id}/merge_requests/{iid}/merge"
        ));
        debug!(url = %url, "accepting merge request");

        let response = self
            .http
            .put(url)
            .header("PRIVATE-TOKEN", self.token.expose_secret())
            .json(options)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "GitLab declined the merge request");
            return Ok(RemoteResponse {
                status: status.as_u16(),
                body: None,
            });
        }

        let body = response.text().await?;
        let merge_request: MergeRequest = serde_json::from_str(&body)?;

        Ok(RemoteResponse {
            status: status.as_u16(),
            body: Some(merge_request),
        })
    }
}

#[async_trait]
impl GraphqlRunner for GitLabClient {
    #[instrument(skip(self, query))]
    async fn run(&self, query: GraphqlQuery) -> Result<Value, Error> {
        let url = self.api_url("api/graphql");
        debug!(url = %url, "posting GraphQL query");

        let response = self
            .http
            .post(url)
            .header("PRIVATE-TOKEN", self.token.expose_secret())
            .json(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedResponse {
                status: status.as_u16(),
            });
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;

        if let Some(messages) = graphql_error_messages(&body) {
            return Err(Error::Graphql(messages));
        }

        Ok(body)
    }
}

/// Collects the `errors[].message` entries of a GraphQL response body, if
/// any.
fn graphql_error_messages(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    let joined = errors
        .iter()
        .map(|err| {
            err.get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown GraphQL error")
        })
        .collect::<Vec<_>>()
        .join("; ");
    Some(joined)
}
