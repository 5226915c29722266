//! Push targeting labels

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named server-side group of usernames
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PushLabel {
    pub name: String,
    pub description: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Number of users attached to the label
    pub count: i64,
}

/// Membership record of a user inside a label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushLabelUser {
    pub username: String,
    /// Epoch milliseconds when the user was attached
    pub created: i64,
}

/// Outcome of attaching or detaching users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelUsersResult {
    pub success: Vec<String>,
    /// Failed username -> reason
    pub fail: BTreeMap<String, String>,
}
