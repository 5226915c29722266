//! Token grants against the `token` endpoint

use std::sync::Arc;

use easemob_domain::{
    AppTokenRequest, AppTokenResponse, ClientConfig, GrantType, Result, UserTokenRequest,
    UserTokenResponse,
};
use tracing::{debug, info, instrument};

use super::dynamic_token::{self, Clock, DynamicTokenParams, SystemClock};
use super::token_cache::AppTokenCache;
use crate::transport::{ApiExecutor, ApiRequest};
use crate::validation::ensure_not_empty;

const TOKEN_PATH: &str = "token";

/// `ttl < 0` leaves the field out so the console setting applies
fn ttl_field(ttl: i64) -> Option<i64> {
    (ttl >= 0).then_some(ttl)
}

/// Application token lifecycle and user token issuance
#[derive(Clone)]
pub struct AuthService {
    executor: ApiExecutor,
    config: Arc<ClientConfig>,
    tokens: AppTokenCache,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(executor: ApiExecutor, config: Arc<ClientConfig>, tokens: AppTokenCache) -> Self {
        Self { executor, config, tokens, clock: Arc::new(SystemClock) }
    }

    /// Replace the time source used for dynamic tokens
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Request an application token and make it the active one
    ///
    /// `ttl < 0` uses the console default, `ttl == 0` never expires. The unit
    /// is milliseconds on the VIP5 cluster and seconds elsewhere.
    #[instrument(skip(self))]
    pub async fn get_app_token(&self, ttl: i64) -> Result<AppTokenResponse> {
        let body = AppTokenRequest {
            grant_type: GrantType::ClientCredentials,
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            ttl: ttl_field(ttl),
        };
        let request = ApiRequest::post(TOKEN_PATH).json(&body)?.anonymous();

        let response: AppTokenResponse = self.executor.execute(request).await?;
        self.tokens.set(response.access_token.clone());

        info!(expires_in = response.expires_in, "application token refreshed");
        Ok(response)
    }

    /// Use a token managed elsewhere; no request is made
    pub fn set_app_token(&self, token: impl Into<String>) {
        self.tokens.set(token);
        debug!("application token overridden");
    }

    pub fn app_token(&self) -> Option<String> {
        self.tokens.get()
    }

    pub fn clear_app_token(&self) {
        self.tokens.clear();
    }

    /// Request a user token
    ///
    /// A non-empty `password` selects the password grant. Otherwise the
    /// `inherit` grant is used, relying on the application token, and
    /// `auto_create_user` asks the server to register unknown users.
    #[instrument(skip(self, password))]
    pub async fn get_user_token(
        &self,
        username: &str,
        password: Option<&str>,
        auto_create_user: bool,
        ttl: i64,
    ) -> Result<UserTokenResponse> {
        ensure_not_empty("username", username)?;

        let password = password.filter(|password| !password.is_empty());
        let body = match password {
            Some(password) => UserTokenRequest {
                grant_type: GrantType::Password,
                username,
                password: Some(password),
                auto_create_user: None,
                ttl: ttl_field(ttl),
            },
            None => UserTokenRequest {
                grant_type: GrantType::Inherit,
                username,
                password: None,
                auto_create_user: auto_create_user.then_some(true),
                ttl: ttl_field(ttl),
            },
        };

        let request = ApiRequest::post(TOKEN_PATH).json(&body)?;
        let response: UserTokenResponse = self.executor.execute(request).await?;
        debug!(grant = %body.grant_type, "user token issued");
        Ok(response)
    }

    /// Build a stateless user token locally
    ///
    /// A non-positive ttl is a caller bug. It comes back as an error rather
    /// than a panic; do not retry it, fix the call site.
    ///
    /// # Errors
    /// `InvalidInput` for an empty username or `ttl_seconds <= 0`.
    #[instrument(skip(self))]
    pub fn create_user_token(&self, username: &str, ttl_seconds: i64) -> Result<String> {
        ensure_not_empty("username", username)?;

        let app_key = self.config.app_key();
        let params = DynamicTokenParams {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            app_key: &app_key,
            username,
            ttl_seconds,
        };
        dynamic_token::build(&params, self.clock.unix_seconds())
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("app_key", &self.config.app_key())
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine;
    use serde_json::json;

    use crate::testing::{client_with, FixedClock, RecordingTransport};

    #[tokio::test]
    async fn app_token_request_is_anonymous_and_cached() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(
            200,
            json!({"access_token": "YWMt-app", "expires_in": 5_184_000, "application": "app-uuid"}),
        );
        let client = client_with(transport.clone());
        client.set_app_token("stale");

        let token = client.auth().get_app_token(-1).await.unwrap();

        assert_eq!(token.access_token, "YWMt-app");
        assert_eq!(token.application, "app-uuid");
        assert_eq!(client.app_token().as_deref(), Some("YWMt-app"));

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "token");
        assert_eq!(request.bearer, None);
        assert_eq!(
            request.json_body().unwrap(),
            &json!({
                "grant_type": "client_credentials",
                "client_id": "YXA6client",
                "client_secret": "YXA6secret"
            })
        );
    }

    #[tokio::test]
    async fn app_token_ttl_zero_is_sent() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(200, json!({"access_token": "t", "expires_in": 0}));
        let client = client_with(transport.clone());

        client.auth().get_app_token(0).await.unwrap();

        assert_eq!(transport.last_request().unwrap().json_body().unwrap()["ttl"], 0);
    }

    #[tokio::test]
    async fn failed_app_token_request_keeps_previous_token() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(
            401,
            json!({"error": "invalid_client", "error_description": "client authentication failed"}),
        );
        let client = client_with(transport.clone());
        client.set_app_token("previous");

        let err = client.auth().get_app_token(-1).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(client.app_token().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn password_grant_wins_over_auto_create() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(
            200,
            json!({"access_token": "YWMt-user", "expires_in": 3600, "user": {"username": "alice", "activated": true}}),
        );
        let client = client_with(transport.clone());

        let token = client.auth().get_user_token("alice", Some("pw"), true, 3600).await.unwrap();

        assert_eq!(token.user.username, "alice");
        let body = transport.last_request().unwrap().json_body().cloned().unwrap();
        assert_eq!(
            body,
            json!({"grant_type": "password", "username": "alice", "password": "pw", "ttl": 3600})
        );
    }

    #[tokio::test]
    async fn inherit_grant_carries_app_token_and_auto_create_flag() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(200, json!({"access_token": "YWMt-user", "expires_in": 3600}));
        let client = client_with(transport.clone());
        client.set_app_token("YWMt-app");

        client.auth().get_user_token("alice", Some(""), true, -1).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.bearer.as_deref(), Some("YWMt-app"));
        assert_eq!(
            request.json_body().unwrap(),
            &json!({"grant_type": "inherit", "username": "alice", "autoCreateUser": true})
        );
    }

    #[tokio::test]
    async fn inherit_grant_without_auto_create_omits_flag() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(200, json!({"access_token": "t"}));
        let client = client_with(transport.clone());

        client.auth().get_user_token("alice", None, false, -1).await.unwrap();

        let body = transport.last_request().unwrap().json_body().cloned().unwrap();
        assert_eq!(body, json!({"grant_type": "inherit", "username": "alice"}));
    }

    #[tokio::test]
    async fn invalid_grant_surfaces_description() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(
            400,
            json!({
                "error": "invalid_grant",
                "exception": "UnauthorizedException",
                "timestamp": 1_700_000_000_000_i64,
                "duration": 0,
                "error_description": "bad credentials"
            }),
        );
        let client = client_with(transport.clone());

        let err = client.auth().get_user_token("alice", Some("wrong"), false, -1).await.unwrap_err();

        assert_eq!(err.to_string(), "bad credentials");
        assert_eq!(err.api_error().unwrap().error, "invalid_grant");
    }

    #[tokio::test]
    async fn empty_username_is_rejected_locally() {
        let transport = RecordingTransport::new();
        let client = client_with(transport.clone());

        let err = client.auth().get_user_token("", Some("pw"), false, -1).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn frozen_clock_gives_identical_tokens() {
        let transport = RecordingTransport::new();
        let client = client_with(transport.clone())
            .with_clock(std::sync::Arc::new(FixedClock(1_700_000_000)));

        let first = client.auth().create_user_token("alice", 600).unwrap();
        let second = client.auth().create_user_token("alice", 600).unwrap();
        assert_eq!(first, second);

        let decoded = String::from_utf8(URL_SAFE.decode(&first).unwrap()).unwrap();
        let payload: serde_json::Value =
            serde_json::from_str(decoded.strip_prefix("dt-").unwrap()).unwrap();
        assert_eq!(payload["appkey"], "demo-org#chat");
        assert_eq!(payload["curTime"], 1_700_000_000);
        assert_eq!(payload.as_object().unwrap().len(), 5);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn non_positive_ttl_never_yields_a_token() {
        let client = client_with(RecordingTransport::new());
        assert!(client.auth().create_user_token("alice", 0).unwrap_err().is_validation());
        assert!(client.auth().create_user_token("alice", -1).unwrap_err().is_validation());
    }
}
