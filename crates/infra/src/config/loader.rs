//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `EASEMOB_HOST`: REST host, e.g. `a1.easemob.com`
//! - `EASEMOB_ORG_NAME`, `EASEMOB_APP_NAME`: application identifiers
//! - `EASEMOB_CLIENT_ID`, `EASEMOB_CLIENT_SECRET`: application credentials
//!
//! Optional:
//! - `EASEMOB_SCHEME`: `https` (default) or `http`
//! - `EASEMOB_REQUEST_TIMEOUT_SECS`: per-attempt timeout
//! - `EASEMOB_RETRY_COUNT`: retries after a transport failure
//! - `EASEMOB_DEBUG`: log request and response bodies (true/false)
//! - `EASEMOB_BOOTSTRAP_APP_TOKEN`: fetch the app token while connecting
//! - `EASEMOB_APP_TOKEN_TTL`: ttl of the bootstrap token
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./easemob.json` or `./easemob.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories

use std::path::{Path, PathBuf};
use std::str::FromStr;

use easemob_domain::{ClientConfig, EasemobError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["easemob.json", "easemob.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `EasemobError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `EasemobError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(
        env_var("EASEMOB_HOST")?,
        env_var("EASEMOB_ORG_NAME")?,
        env_var("EASEMOB_APP_NAME")?,
        env_var("EASEMOB_CLIENT_ID")?,
        env_var("EASEMOB_CLIENT_SECRET")?,
    );

    if let Ok(scheme) = std::env::var("EASEMOB_SCHEME") {
        config.scheme = scheme;
    }
    if let Some(timeout) = env_parse("EASEMOB_REQUEST_TIMEOUT_SECS")? {
        config.request_timeout_secs = timeout;
    }
    if let Some(retries) = env_parse("EASEMOB_RETRY_COUNT")? {
        config.retry_count = retries;
    }
    if let Some(ttl) = env_parse("EASEMOB_APP_TOKEN_TTL")? {
        config.app_token_ttl = ttl;
    }
    config.debug = env_bool("EASEMOB_DEBUG", config.debug);
    config.bootstrap_app_token = env_bool("EASEMOB_BOOTSTRAP_APP_TOKEN", config.bootstrap_app_token);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `EasemobError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EasemobError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EasemobError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EasemobError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EasemobError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EasemobError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(EasemobError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Returns the first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(3)
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
///
/// # Errors
/// Returns `EasemobError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        EasemobError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| EasemobError::Config(format!("Invalid {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
