//! Request execution shared by every operation module

use std::sync::Arc;

use easemob_domain::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::decoder::decode;
use super::ports::{ApiRequest, Transport};
use crate::auth::AppTokenCache;

/// Attaches the cached application token, sends, and decodes
#[derive(Clone)]
pub struct ApiExecutor {
    transport: Arc<dyn Transport>,
    tokens: AppTokenCache,
}

impl ApiExecutor {
    pub fn new(transport: Arc<dyn Transport>, tokens: AppTokenCache) -> Self {
        Self { transport, tokens }
    }

    /// Run one request/response round trip
    ///
    /// # Errors
    /// Transport failures, application error envelopes and decode failures
    /// are returned as-is.
    pub async fn execute<R: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<R> {
        if !request.is_anonymous() {
            request.bearer = self.tokens.get();
        }

        let method = request.method;
        let path = request.path.clone();

        let raw = self.transport.send(request).await?;
        debug!(%method, path = %path, status = raw.status, "received API response");

        decode(&raw)
    }
}

impl std::fmt::Debug for ApiExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiExecutor").field("has_app_token", &self.tokens.is_set()).finish()
    }
}
