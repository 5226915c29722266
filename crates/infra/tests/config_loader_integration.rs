//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! turning it into a working client.

use std::io::Write;

use easemob_infra::{build_client, config, EasemobError};
use tempfile::NamedTempFile;

fn write_config(content: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "host": "a1.easemob.com",
            "org_name": "1112220101",
            "app_name": "demo",
            "client_id": "YXA6json",
            "client_secret": "YXA6json-secret",
            "request_timeout_secs": 15,
            "retry_count": 2,
            "debug": true
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("json config should load");

    assert_eq!(config.host, "a1.easemob.com");
    assert_eq!(config.app_key(), "1112220101#demo");
    assert_eq!(config.request_timeout_secs, 15);
    assert_eq!(config.retry_count, 2);
    assert!(config.debug);
    assert_eq!(config.scheme, "https", "scheme should fall back to its default");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
host = "a41.easemob.com"
org_name = "org"
app_name = "app"
client_id = "YXA6toml"
client_secret = "YXA6toml-secret"
bootstrap_app_token = true
app_token_ttl = 3600
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("toml config should load");

    assert_eq!(config.base_url(), "https://a41.easemob.com/org/app");
    assert!(config.bootstrap_app_token);
    assert_eq!(config.app_token_ttl, 3600);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_builds_client() {
    let path = write_config(
        r#"{
            "host": "a1.easemob.com",
            "org_name": "org",
            "app_name": "app",
            "client_id": "id",
            "client_secret": "secret"
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config should load");
    let client = build_client(config).expect("client should build without I/O");

    assert!(client.app_token().is_none());
    assert_eq!(client.config().base_url(), "https://a1.easemob.com/org/app");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_with_missing_credentials() {
    let path = write_config(r#"{ "host": "a1.easemob.com", "org_name": "org" }"#, "json");

    let result = config::load_from_file(Some(path.clone()));

    match result {
        Err(EasemobError::Config(msg)) => {
            assert!(msg.contains("app_name"), "unexpected message: {msg}");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/easemob.json".into()));

    match result {
        Err(EasemobError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "this is": "not valid" "#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(EasemobError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}
