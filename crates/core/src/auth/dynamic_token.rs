//! Stateless (`dt-`) user tokens
//!
//! Built locally, verified by the server from the signature:
//!
//! ```text
//! signature = hex(sha256(client_id ‖ app_key ‖ username ‖ cur_time ‖ ttl ‖ client_secret))
//! token     = base64url_padded("dt-" ‖ json{appkey, curTime, signature, ttl, userId})
//! ```

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use easemob_domain::constants::DYNAMIC_TOKEN_PREFIX;
use easemob_domain::{DynamicTokenPayload, EasemobError, Result};
use sha2::{Digest, Sha256};

/// Source of the current unix time in seconds
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Inputs of a dynamic token
#[derive(Debug, Clone, Copy)]
pub struct DynamicTokenParams<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub app_key: &'a str,
    pub username: &'a str,
    pub ttl_seconds: i64,
}

/// Lowercase hex SHA-256 over the concatenated fields
pub fn sign(params: &DynamicTokenParams<'_>, cur_time: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(params.client_id.as_bytes());
    hasher.update(params.app_key.as_bytes());
    hasher.update(params.username.as_bytes());
    hasher.update(cur_time.to_string().as_bytes());
    hasher.update(params.ttl_seconds.to_string().as_bytes());
    hasher.update(params.client_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build the token for `cur_time`
///
/// # Errors
/// `EasemobError::InvalidInput` when `ttl_seconds <= 0`; no token is built.
pub fn build(params: &DynamicTokenParams<'_>, cur_time: i64) -> Result<String> {
    if params.ttl_seconds <= 0 {
        return Err(EasemobError::invalid_input(format!(
            "`ttl` must be greater than 0, got {}",
            params.ttl_seconds
        )));
    }

    let payload = DynamicTokenPayload {
        appkey: params.app_key.to_string(),
        cur_time,
        signature: sign(params, cur_time),
        ttl: params.ttl_seconds,
        user_id: params.username.to_string(),
    };

    let json = serde_json::to_string(&payload)?;
    let mut raw = String::with_capacity(DYNAMIC_TOKEN_PREFIX.len() + json.len());
    raw.push_str(DYNAMIC_TOKEN_PREFIX);
    raw.push_str(&json);

    Ok(URL_SAFE.encode(raw.as_bytes()))
}
