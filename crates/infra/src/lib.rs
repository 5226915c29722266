//! # Easemob Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed [`HttpClient`] transport
//! - reqwest error conversions
//! - Configuration loading from environment and files
//! - Constructors wiring a ready [`EasemobClient`]
//!
//! ## Architecture
//! - Implements traits defined in `easemob-core`
//! - Contains all "impure" code (network, filesystem, environment)

use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod http;

pub use easemob_core::EasemobClient;
pub use easemob_domain::{ClientConfig, EasemobError, Result};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};

/// Build a client over the reqwest transport without any network I/O
///
/// # Errors
/// `EasemobError::Config` for incomplete settings or an unusable base URL.
pub fn build_client(config: ClientConfig) -> Result<EasemobClient> {
    config.validate()?;
    let transport = HttpClient::from_config(&config)?;
    EasemobClient::new(config, Arc::new(transport))
}

/// Build a client and, when `bootstrap_app_token` is set, fetch the
/// application token before returning
///
/// # Errors
/// Configuration errors, or any failure of the bootstrap token request.
pub async fn connect(config: ClientConfig) -> Result<EasemobClient> {
    let client = build_client(config)?;
    client.bootstrap().await?;
    tracing::info!(base_url = %client.config().base_url(), "Easemob client ready");
    Ok(client)
}
