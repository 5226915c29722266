//! Response envelopes
//!
//! Every endpoint answers with exactly one envelope family:
//!
//! - [`UserResponse`]: user-domain envelope with `entities` and request
//!   metadata (`action`, `path`, `uri`, ...)
//! - [`DataResponse`] / [`PagedResponse`]: generic envelope carrying `data`,
//!   plus a `cursor` for list endpoints
//!
//! Failures use [`ApiErrorBody`].

use serde::{Deserialize, Serialize};

/// User-domain envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse<T> {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub count: i64,
    /// Absent on acknowledgements such as password changes
    #[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
    pub entities: T,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub application_name: String,
    /// Cursor returned by paged user listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Generic envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub duration: i64,
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Swap the payload while keeping envelope metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataResponse<U> {
        DataResponse { timestamp: self.timestamp, duration: self.duration, data: f(self.data) }
    }
}

/// Generic envelope for list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub duration: i64,
    /// Resume token for the next page; empty or absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub data: T,
}

impl<T> PagedResponse<T> {
    /// Cursor for the next page, if the server returned a non-empty one
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// Error envelope returned with any non-200 status
///
/// Missing fields default to empty values so that partial envelopes still
/// surface as application errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    /// Machine-readable error code, e.g. `invalid_grant`
    pub error: String,
    /// Server-side exception class
    pub exception: String,
    pub timestamp: i64,
    /// Server processing time in milliseconds
    pub duration: i64,
    pub error_description: String,
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error_description)
    }
}
