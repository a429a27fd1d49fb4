// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the remote environment client using wiremock.
//!
//! Covers:
//! - Envelope decoding (single, list, error)
//! - Header assembly (x-api-key, Content-Type)
//! - Replace semantics (initial: one PUT; current: cleared PUT, then real PUT)
//! - Merge-then-write composition and its failure modes

use std::collections::BTreeMap;

use postman_env::client::{PostmanClient, UpdateTarget};
use postman_env::environment::Environment;
use postman_env::environment::strategy::MergeStrategy;
use postman_env::error::ClientError;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UID: &str = "1-abc-123";

fn client_for(server: &MockServer) -> PostmanClient {
    PostmanClient::new("test-key")
        .base_url(server.uri())
        .for_environment(UID)
}

fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn environment_body(name: &str, pairs: &[(&str, &str)]) -> Value {
    json!({
        "environment": {
            "name": name,
            "values": pairs
                .iter()
                .map(|(k, v)| json!({"key": k, "value": v}))
                .collect::<Vec<_>>(),
        }
    })
}

// =============================================================================
// get_environment tests
// =============================================================================

#[tokio::test]
async fn test_get_environment_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .and(header("x-api-key", "test-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environment": {
                "uid": UID,
                "name": "dev",
                "values": [
                    {"key": "B", "value": "2"},
                    {"key": "A", "value": "1"}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let environment = client_for(&mock_server).get_environment().await.unwrap();

    assert_eq!(environment.name, "dev");
    assert_eq!(environment.uid.as_deref(), Some(UID));
    // Wire array form decodes to map form, order-independent.
    assert_eq!(environment.values, values(&[("A", "1"), ("B", "2")]));
}

#[tokio::test]
async fn test_get_environment_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "name": "AuthenticationError",
                "message": "Invalid API Key. Every request requires a valid API Key to be sent."
            }
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_environment().await;

    match result.unwrap_err() {
        ClientError::Api(boxed) => {
            assert_eq!(boxed.name, "AuthenticationError");
            assert!(boxed.message.starts_with("Invalid API Key"));
        }
        other => panic!("Expected ClientError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_environment_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_environment().await;
    assert!(matches!(result.unwrap_err(), ClientError::Decode(_)));
}

#[tokio::test]
async fn test_get_environment_malformed_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_environment().await;
    // A non-success body that is not an error envelope is a decode failure,
    // not a successful Environment and not a fabricated ApiError.
    assert!(matches!(result.unwrap_err(), ClientError::Decode(_)));
}

// =============================================================================
// replace (initial) tests
// =============================================================================

#[tokio::test]
async fn test_replace_initial_values_puts_wire_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .and(header("x-api-key", "test-key"))
        .and(body_json(environment_body("dev", &[("A", "1")])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let env = Environment::new("dev", values(&[("A", "1")]));
    client_for(&mock_server)
        .replace_initial_values(&env)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_replace_initial_values_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "name": "instanceNotFoundError",
                "message": "The specified environment does not exist."
            }
        })))
        .mount(&mock_server)
        .await;

    let env = Environment::new("dev", values(&[("A", "1")]));
    let result = client_for(&mock_server).replace_initial_values(&env).await;

    match result.unwrap_err() {
        ClientError::Api(boxed) => assert_eq!(boxed.name, "instanceNotFoundError"),
        other => panic!("Expected ClientError::Api, got {other:?}"),
    }
}

// =============================================================================
// replace (current) tests - delete-then-recreate workaround
// =============================================================================

#[tokio::test]
async fn test_replace_current_values_issues_two_writes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let env = Environment::new("dev", values(&[("A", "1"), ("B", "2")]));
    client_for(&mock_server)
        .replace_current_values(&env)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let puts: Vec<_> = requests.iter().filter(|r| r.method.as_str() == "PUT").collect();
    assert_eq!(puts.len(), 2);

    // First write clears the values, name unchanged.
    let first: Value = serde_json::from_slice(&puts[0].body).unwrap();
    assert_eq!(first, environment_body("dev", &[]));

    // Second write carries the real environment.
    let second: Value = serde_json::from_slice(&puts[1].body).unwrap();
    assert_eq!(second, environment_body("dev", &[("A", "1"), ("B", "2")]));
}

#[tokio::test]
async fn test_replace_current_values_stops_after_first_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"name": "forbiddenError", "message": "not yours"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let env = Environment::new("dev", values(&[("A", "1")]));
    let result = client_for(&mock_server).replace_current_values(&env).await;

    assert!(matches!(result.unwrap_err(), ClientError::Api(_)));
    // The second write never ran; the mock's expect(1) verifies on drop.
}

// =============================================================================
// update_by_replacing dispatch
// =============================================================================

#[tokio::test]
async fn test_update_by_replacing_initial_is_one_write() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let env = Environment::new("dev", values(&[("A", "1")]));
    client_for(&mock_server)
        .update_by_replacing(&env, UpdateTarget::Initial)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_by_replacing_current_is_two_writes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let env = Environment::new("dev", values(&[("A", "1")]));
    client_for(&mock_server)
        .update_by_replacing(&env, UpdateTarget::Current)
        .await
        .unwrap();
}

// =============================================================================
// update_by_merging tests
// =============================================================================

#[tokio::test]
async fn test_update_by_merging_writes_merged_result() {
    let mock_server = MockServer::start().await;

    // Remote currently holds A=1, B=2.
    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environment": {
                "name": "dev",
                "values": [
                    {"key": "A", "value": "1"},
                    {"key": "B", "value": "2"}
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Local B=9, C=3 merged with use-new: B collides and the local value
    // wins, producing A=1, B=9, C=3 - which is what gets written back.
    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .and(body_json(environment_body(
            "dev",
            &[("A", "1"), ("B", "9"), ("C", "3")],
        )))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let local = Environment::new("dev", values(&[("B", "9"), ("C", "3")]));
    client_for(&mock_server)
        .update_by_merging(&local, &MergeStrategy::UseNew, UpdateTarget::Initial)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_by_merging_keep_current_preserves_remote_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environment": {
                "name": "dev",
                "values": [{"key": "B", "value": "2"}]
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/environments/{UID}")))
        .and(body_json(environment_body("dev", &[("B", "2"), ("C", "3")])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let local = Environment::new("dev", values(&[("B", "9"), ("C", "3")]));
    client_for(&mock_server)
        .update_by_merging(&local, &MergeStrategy::KeepCurrent, UpdateTarget::Initial)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_by_merging_resolver_failure_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environment": {
                "name": "dev",
                "values": [{"key": "A", "value": "1"}]
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let strategy = MergeStrategy::resolver(|_, _| Err("conflict is unresolvable".into()));
    let local = Environment::new("dev", values(&[("A", "2")]));
    let result = client_for(&mock_server)
        .update_by_merging(&local, &strategy, UpdateTarget::Initial)
        .await;

    assert!(matches!(result.unwrap_err(), ClientError::Merge(_)));
}

#[tokio::test]
async fn test_update_by_merging_fetch_failure_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/environments/{UID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"name": "instanceNotFoundError", "message": "gone"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let local = Environment::new("dev", values(&[("A", "2")]));
    let result = client_for(&mock_server)
        .update_by_merging(&local, &MergeStrategy::UseNew, UpdateTarget::Current)
        .await;

    assert!(matches!(result.unwrap_err(), ClientError::Api(_)));
}

// =============================================================================
// list / uid-addressed update tests
// =============================================================================

#[tokio::test]
async fn test_list_environments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/environments"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environments": [
                {"uid": "1-abc", "name": "dev"},
                {"uid": "2-def", "name": "staging"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = PostmanClient::new("test-key").base_url(mock_server.uri());
    let environments = client.list_environments().await.unwrap();

    assert_eq!(environments.len(), 2);
    assert_eq!(environments[0].uid.as_deref(), Some("1-abc"));
    assert_eq!(environments[0].name, "dev");
    // List entries carry no values.
    assert!(environments[0].values.is_empty());
    assert_eq!(environments[1].name, "staging");
}

#[tokio::test]
async fn test_update_addresses_by_environment_uid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/environments/2-def"))
        .and(body_json(environment_body("staging", &[("A", "1")])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let env = Environment::new("staging", values(&[("A", "1")])).with_uid("2-def");
    let client = PostmanClient::new("test-key").base_url(mock_server.uri());
    client.update(&env).await.unwrap();
}

#[tokio::test]
async fn test_update_without_uid_fails() {
    let client = PostmanClient::new("test-key");
    let env = Environment::new("local-only", BTreeMap::new());

    match client.update(&env).await.unwrap_err() {
        ClientError::MissingUid(message) => assert!(message.contains("has no uid")),
        other => panic!("Expected ClientError::MissingUid, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unbound_get_fails_without_network() {
    let client = PostmanClient::new("test-key");
    let result = client.get_environment().await;
    assert!(matches!(result.unwrap_err(), ClientError::MissingUid(_)));
}
