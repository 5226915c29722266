//! Push notification payloads, strategies and results

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Delivery routing for a push, sent as its integer code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PushStrategy {
    /// Vendor channel first, platform channel on failure
    #[default]
    ThirdPartyFirst,
    /// Platform channel only
    PlatformOnly,
    /// Vendor channel only
    ThirdPartyOnly,
    /// Platform channel for online users, vendor channel for offline users
    OnlinePlatformElseThirdParty,
    /// Platform channel, online users only
    OnlineOnly,
}

impl PushStrategy {
    pub const fn code(self) -> i32 {
        match self {
            Self::ThirdPartyFirst => 0,
            Self::PlatformOnly => 1,
            Self::ThirdPartyOnly => 2,
            Self::OnlinePlatformElseThirdParty => 3,
            Self::OnlineOnly => 4,
        }
    }
}

impl TryFrom<i32> for PushStrategy {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::ThirdPartyFirst),
            1 => Ok(Self::PlatformOnly),
            2 => Ok(Self::ThirdPartyOnly),
            3 => Ok(Self::OnlinePlatformElseThirdParty),
            4 => Ok(Self::OnlineOnly),
            other => Err(format!("Invalid PushStrategy: {other}")),
        }
    }
}

impl Serialize for PushStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for PushStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// Free-form push message body
///
/// Keys keep their insertion order on the wire.
///
/// ```rust
/// use easemob_domain::PushMessage;
///
/// let message = PushMessage::new()
///     .set("title", "Release")
///     .set("content", "v2 is out")
///     .set_nested("ext", |ext| ext.set("channel", "news"));
///
/// assert_eq!(
///     serde_json::to_string(&message).unwrap(),
///     r#"{"title":"Release","content":"v2 is out","ext":{"channel":"news"}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushMessage(Map<String, Value>);

impl PushMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a nested object built by `build`
    pub fn set_nested(mut self, key: impl Into<String>, build: impl FnOnce(Self) -> Self) -> Self {
        let nested = build(Self::new());
        self.0.insert(key.into(), Value::Object(nested.0));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for PushMessage {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Body shared by every push endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PushRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<&'a [String]>,
    #[serde(rename = "pushMessage")]
    pub push_message: &'a PushMessage,
    pub strategy: PushStrategy,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

/// Vendor-level detail of a synchronous push
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncPushDetail {
    pub expire_tokens: Vec<String>,
    pub send_result: bool,
    pub request_id: String,
    pub fail_tokens: Vec<String>,
    pub msg_code: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncPushData {
    pub code: i64,
    pub message: String,
    pub data: SyncPushDetail,
}

/// One delivery attempt of a synchronous push
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPushResult {
    #[serde(default)]
    pub push_status: String,
    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SyncPushData>,
}

/// Per-target outcome of an asynchronous push
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncPushResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub push_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Task created by a label push
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPushResult {
    #[serde(default)]
    pub task_id: i64,
}
