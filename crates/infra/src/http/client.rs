use std::time::Duration;

use async_trait::async_trait;
use easemob_core::transport::{ApiRequest, HttpMethod, RawResponse, RequestBody, Transport};
use easemob_domain::constants::{
    DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS_PER_HOST, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_COUNT, DEFAULT_USER_AGENT,
};
use easemob_domain::{ClientConfig, EasemobError, TransportError, TransportErrorKind};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use tracing::debug;
use url::Url;

use crate::errors::InfraError;

/// Join the application base URL and a path suffix with exactly one `/`
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// HTTP client with built-in retry and timeout support.
///
/// Only transport failures (timeouts, refused connections, failed sends) are
/// retried. Any received response, including error statuses, is returned as
/// is.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    max_attempts: usize,
    base_backoff: Duration,
    log_bodies: bool,
}

impl HttpClient {
    /// Start building a new HTTP client for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> HttpClientBuilder {
        HttpClientBuilder::new(base_url)
    }

    /// Client configured from the application settings.
    ///
    /// # Errors
    /// `EasemobError::Config` for an unusable base URL, `Transport` if the
    /// underlying client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, EasemobError> {
        Self::builder(config.base_url())
            .timeout(config.request_timeout())
            .idle_timeout(config.idle_timeout())
            .max_idle_per_host(config.max_connections_per_host)
            .max_attempts(config.retry_count.saturating_add(1))
            .user_agent(config.user_agent.clone())
            .log_bodies(config.debug)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn prepare(&self, request: &ApiRequest) -> RequestBuilder {
        let url = join_url(&self.base_url, &request.path);
        let mut builder = self.client.request(to_method(request.method), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// Execute the provided request builder with retry semantics.
    async fn send_with_retry(&self, builder: RequestBuilder) -> Result<RawResponse, TransportError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                TransportError::new(
                    TransportErrorKind::Builder,
                    "request body cannot be cloned; buffer the body to enable retries",
                )
            })?;

            let request =
                cloned_builder.build().map_err(|err| TransportError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    let body = response
                        .bytes()
                        .await
                        .map_err(|err| TransportError::from(InfraError::from(err)))?;

                    if self.log_bodies {
                        debug!(%url, body = %String::from_utf8_lossy(&body), "response body");
                    }

                    return Ok(RawResponse::new(status.as_u16(), body.to_vec()));
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    let error = TransportError::from(InfraError::from(err));
                    if attempt + 1 < attempts && error.kind.is_transient() {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(error);
                }
            }
        }

        Err(TransportError::new(
            TransportErrorKind::Other,
            "http client exhausted retries without producing a result",
        ))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        if self.log_bodies {
            match &request.body {
                RequestBody::Empty => {}
                RequestBody::Json(value) => debug!(path = %request.path, body = %value, "request body"),
                RequestBody::Form(fields) => debug!(path = %request.path, body = ?fields, "request form"),
            }
        }

        let builder = self.prepare(&request);
        self.send_with_retry(builder).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("max_attempts", &self.max_attempts)
            .field("base_backoff", &self.base_backoff)
            .field("log_bodies", &self.log_bodies)
            .finish()
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    idle_timeout: Duration,
    max_idle_per_host: usize,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: String,
    log_bodies: bool,
}

impl HttpClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            max_idle_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
            max_attempts: DEFAULT_RETRY_COUNT + 1,
            base_backoff: Duration::from_millis(200),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_bodies: false,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long an unused pooled connection is kept.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Upper bound of pooled connections kept per host.
    pub fn max_idle_per_host(mut self, connections: usize) -> Self {
        self.max_idle_per_host = connections;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Log request and response bodies at debug level.
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    pub fn build(self) -> Result<HttpClient, EasemobError> {
        let parsed = Url::parse(&self.base_url).map_err(|err| {
            EasemobError::Config(format!("invalid base URL `{}`: {err}", self.base_url))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(EasemobError::Config(format!(
                "base URL `{}` cannot carry a path",
                self.base_url
            )));
        }

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .pool_idle_timeout(self.idle_timeout)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(InfraError::from)?;

        Ok(HttpClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            max_attempts: self.max_attempts,
            base_backoff: self.base_backoff,
            log_bodies: self.log_bodies,
        })
    }
}
