//! Token request and response shapes

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// OAuth-style grant used against the `token` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    ClientCredentials,
    Password,
    /// Trusted exchange relying on the application token
    Inherit,
}

impl_domain_status_conversions!(GrantType {
    ClientCredentials => "client_credentials",
    Password => "password",
    Inherit => "inherit",
});

/// Body of an application token request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppTokenRequest<'a> {
    pub grant_type: GrantType,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

/// Body of a user token request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTokenRequest<'a> {
    pub grant_type: GrantType,
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(rename = "autoCreateUser", skip_serializing_if = "Option::is_none")]
    pub auto_create_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

/// Application token grant result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTokenResponse {
    pub access_token: String,
    /// Seconds on most clusters, milliseconds on the VIP5 cluster
    #[serde(default)]
    pub expires_in: i64,
    /// Owning application uuid
    #[serde(default)]
    pub application: String,
}

/// User token grant result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub user: super::UserEntity,
}

/// Fields of a stateless (`dt-`) user token, in wire order
///
/// Keys are emitted in lexicographic order because the remote verifier
/// recomputes the payload that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicTokenPayload {
    pub appkey: String,
    #[serde(rename = "curTime")]
    pub cur_time: i64,
    pub signature: String,
    pub ttl: i64,
    #[serde(rename = "userId")]
    pub user_id: String,
}
