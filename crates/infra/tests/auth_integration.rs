//! End-to-end token flows over the reqwest transport
//!
//! **Coverage:**
//! - Application token grant, caching and bearer propagation
//! - Bootstrap on `connect` and its opt-out
//! - Error envelopes surfaced as `EasemobError::Api`
//! - User token grants (password and inherit)

#[path = "support.rs"]
mod support;

use easemob_infra::{build_client, connect, EasemobError};
use serde_json::json;
use support::{app_path, client_for, config_for, error_envelope, init_tracing, TEST_TOKEN};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_body(token: &str) -> serde_json::Value {
    json!({ "access_token": token, "expires_in": 7200, "application": "8be024f0-e978-11e8-b697" })
}

#[tokio::test]
async fn app_token_is_fetched_anonymously_and_reused() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(app_path("token")))
        .and(body_json(json!({
            "grant_type": "client_credentials",
            "client_id": "YXA6client",
            "client_secret": "YXA6secret",
            "ttl": 3600,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("YWMt-fresh")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(app_path("users/alice")))
        .and(header("authorization", "Bearer YWMt-fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entities": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(config_for(&server)).unwrap();
    let token = client.auth().get_app_token(3600).await.unwrap();
    assert_eq!(token.access_token, "YWMt-fresh");
    assert_eq!(client.app_token().as_deref(), Some("YWMt-fresh"));

    client.users().get_user("alice").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn connect_bootstraps_when_enabled() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(app_path("token")))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("YWMt-boot")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.bootstrap_app_token = true;

    let client = connect(config).await.unwrap();
    assert_eq!(client.app_token().as_deref(), Some("YWMt-boot"));
}

#[tokio::test]
async fn connect_without_bootstrap_makes_no_request() {
    init_tracing();
    let server = MockServer::start().await;

    let client = connect(config_for(&server)).await.unwrap();

    assert!(client.app_token().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn bootstrap_failure_fails_connect() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(app_path("token")))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope("invalid_client", "invalid client credentials")),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.bootstrap_app_token = true;

    match connect(config).await {
        Err(EasemobError::Api { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body.error, "invalid_client");
            assert_eq!(body.error_description, "invalid client credentials");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn password_grant_issues_user_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(app_path("token")))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(body_json(json!({
            "grant_type": "password",
            "username": "alice",
            "password": "s3cret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "YWMt-user",
            "expires_in": 5184000,
            "user": {
                "uuid": "0ffe2d80-ed76-11e8-8d66-279e3e1c214b",
                "type": "user",
                "created": 1542795196504_i64,
                "modified": 1542795196504_i64,
                "username": "alice",
                "activated": true
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = client.auth().get_user_token("alice", Some("s3cret"), false, -1).await.unwrap();

    assert_eq!(token.access_token, "YWMt-user");
    assert_eq!(token.user.username, "alice");
    assert!(token.user.activated);
}

#[tokio::test]
async fn inherit_grant_can_create_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(app_path("token")))
        .and(body_json(json!({
            "grant_type": "inherit",
            "username": "bob",
            "autoCreateUser": true,
            "ttl": 600,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "YWMt-bob",
            "expires_in": 600,
            "user": { "username": "bob", "activated": true }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = client.auth().get_user_token("bob", None, true, 600).await.unwrap();

    assert_eq!(token.access_token, "YWMt-bob");
    assert_eq!(token.expires_in, 600);
}

#[tokio::test]
async fn dynamic_token_needs_no_server() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let token = client.auth().create_user_token("alice", 600).unwrap();

    assert!(!token.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
