//! Client configuration
//!
//! Constructed once at startup. Only the cached application token (held by
//! the core crate) changes afterwards.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS_PER_HOST, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_COUNT, DEFAULT_SCHEME, DEFAULT_USER_AGENT, MAX_RETRY_COUNT, TTL_SERVER_DEFAULT,
};
use crate::errors::{EasemobError, Result};

/// Connection and credential settings for one application
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// `https` in production, `http` against local test servers
    pub scheme: String,
    pub host: String,
    pub org_name: String,
    pub app_name: String,
    pub client_id: String,
    pub client_secret: String,
    pub request_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_connections_per_host: usize,
    /// Extra attempts after a transport failure
    pub retry_count: usize,
    pub user_agent: String,
    /// Log full request and response bodies
    pub debug: bool,
    /// Fetch an application token while connecting
    pub bootstrap_app_token: bool,
    /// ttl used by the bootstrap token request
    pub app_token_ttl: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: String::new(),
            org_name: String::new(),
            app_name: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            max_connections_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
            retry_count: DEFAULT_RETRY_COUNT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            debug: false,
            bootstrap_app_token: false,
            app_token_ttl: TTL_SERVER_DEFAULT,
        }
    }
}

impl ClientConfig {
    /// Configuration with the required fields set and defaults elsewhere
    pub fn new(
        host: impl Into<String>,
        org_name: impl Into<String>,
        app_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            org_name: org_name.into(),
            app_name: app_name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    /// `org#app`, the identifier embedded in dynamic user tokens
    pub fn app_key(&self) -> String {
        format!("{}#{}", self.org_name, self.app_name)
    }

    /// `{scheme}://{host}/{org}/{app}`
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}/{}/{}",
            self.scheme,
            self.host.trim_end_matches('/'),
            self.org_name.trim_matches('/'),
            self.app_name.trim_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Reject configurations that cannot produce a working client
    ///
    /// # Errors
    /// Returns `EasemobError::Config` naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("scheme", &self.scheme),
            ("host", &self.host),
            ("org_name", &self.org_name),
            ("app_name", &self.app_name),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EasemobError::Config(format!("`{field}` must not be empty")));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(EasemobError::Config("`request_timeout_secs` must be positive".into()));
        }

        if self.retry_count > MAX_RETRY_COUNT {
            return Err(EasemobError::Config(format!(
                "`retry_count` must be at most {MAX_RETRY_COUNT}"
            )));
        }

        Ok(())
    }
}

// Manual Debug so the client secret never lands in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("org_name", &self.org_name)
            .field("app_name", &self.app_name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_connections_per_host", &self.max_connections_per_host)
            .field("retry_count", &self.retry_count)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .field("bootstrap_app_token", &self.bootstrap_app_token)
            .field("app_token_ttl", &self.app_token_ttl)
            .finish()
    }
}
