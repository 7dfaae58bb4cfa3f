//! Tests for server module

use super::*;
use axum::{body::Body, http::Request};
use tower::ServiceExt;

use crate::test_support::*;

#[test]
fn test_default_config_binds_loopback() {
    let config = ApiConfig::default();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, DEFAULT_PORT);
}

#[tokio::test]
async fn test_server_router_serves_health() {
    let server = ApiServer::new(
        ApiConfig::default(),
        test_state(
            FakeMergeClient::new(AcceptOutcome::Merged),
            FakeGraphqlClient::new(GraphqlOutcome::Body(graphql_checks_body(&[]))),
        ),
    );

    let response = server
        .router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
