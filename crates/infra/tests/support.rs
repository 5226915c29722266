//! Shared helpers for the infra integration tests.
//!
//! Each test owns a wiremock server; the client built here talks plain HTTP
//! to it under the `/demo-org/chat` application prefix.

#![allow(dead_code)]

use std::sync::OnceLock;

use easemob_infra::{build_client, ClientConfig, EasemobClient};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP_PREFIX: &str = "/demo-org/chat";
pub const TEST_TOKEN: &str = "YWMt-integration-token";

static TRACING: OnceLock<()> = OnceLock::new();

/// Route client logs through the test harness writer once per binary.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("easemob_core=debug,easemob_infra=debug"))
            .with_test_writer()
            .try_init();
    });
}

/// Configuration pointing at the mock server.
pub fn config_for(server: &MockServer) -> ClientConfig {
    let host = server.uri().trim_start_matches("http://").to_string();
    let mut config = ClientConfig::new(host, "demo-org", "chat", "YXA6client", "YXA6secret");
    config.scheme = "http".to_string();
    config.request_timeout_secs = 2;
    config.retry_count = 0;
    config
}

/// Client against the mock server with a preset application token.
pub fn client_for(server: &MockServer) -> EasemobClient {
    init_tracing();
    let client = build_client(config_for(server)).expect("client should build");
    client.set_app_token(TEST_TOKEN);
    client
}

/// Full request path under the application prefix.
pub fn app_path(suffix: &str) -> String {
    format!("{APP_PREFIX}/{suffix}")
}

/// Mount a 200 JSON response for `verb` on `suffix`.
pub async fn mount_json(server: &MockServer, verb: &str, suffix: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(app_path(suffix)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Standard `{timestamp, duration, data}` envelope.
pub fn data_envelope(data: Value) -> Value {
    json!({ "timestamp": 1_700_000_000_000_i64, "duration": 3, "data": data })
}

/// Error envelope as returned on non-200 statuses.
pub fn error_envelope(error: &str, description: &str) -> Value {
    json!({
        "error": error,
        "exception": "EasemobException",
        "timestamp": 1_700_000_000_000_i64,
        "duration": 0,
        "error_description": description,
    })
}
