//! Client facade over every operation module

use std::sync::Arc;

use easemob_domain::{AppTokenResponse, ClientConfig, Result};
use tracing::info;

use crate::auth::{AppTokenCache, AuthService, Clock};
use crate::metadata::MetadataService;
use crate::push::PushService;
use crate::push_label::PushLabelService;
use crate::transport::{ApiExecutor, Transport};
use crate::user::UserService;

/// Entry point of the REST client
///
/// Cheap to clone; clones share the transport and the application token.
#[derive(Debug, Clone)]
pub struct EasemobClient {
    config: Arc<ClientConfig>,
    auth: AuthService,
    users: UserService,
    metadata: MetadataService,
    push_labels: PushLabelService,
    push: PushService,
}

impl EasemobClient {
    /// Wire a client over `transport`; performs no I/O
    ///
    /// # Errors
    /// `EasemobError::Config` when a required setting is missing.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let config = Arc::new(config);
        let tokens = AppTokenCache::new();
        let executor = ApiExecutor::new(transport, tokens.clone());

        Ok(Self {
            auth: AuthService::new(executor.clone(), Arc::clone(&config), tokens),
            users: UserService::new(executor.clone()),
            metadata: MetadataService::new(executor.clone()),
            push_labels: PushLabelService::new(executor.clone()),
            push: PushService::new(executor),
            config,
        })
    }

    /// Replace the time source used for dynamic user tokens
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.auth = self.auth.with_clock(clock);
        self
    }

    /// Fetch the application token when `bootstrap_app_token` is enabled
    pub async fn bootstrap(&self) -> Result<Option<AppTokenResponse>> {
        if !self.config.bootstrap_app_token {
            return Ok(None);
        }

        let token = self.auth.get_app_token(self.config.app_token_ttl).await?;
        info!(app_key = %self.config.app_key(), "application token bootstrapped");
        Ok(Some(token))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn metadata(&self) -> &MetadataService {
        &self.metadata
    }

    pub fn push_labels(&self) -> &PushLabelService {
        &self.push_labels
    }

    pub fn push(&self) -> &PushService {
        &self.push
    }

    /// Currently cached application token
    pub fn app_token(&self) -> Option<String> {
        self.auth.app_token()
    }

    /// Use an application token managed outside this process
    pub fn set_app_token(&self, token: impl Into<String>) {
        self.auth.set_app_token(token);
    }
}
