//! User entities, presence and metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Registered IM user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserEntity {
    pub uuid: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Epoch milliseconds
    pub created: i64,
    /// Epoch milliseconds
    pub modified: i64,
    pub username: String,
    pub activated: bool,
}

/// User registration payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nickname: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into(), nickname: String::new() }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }
}

/// Presence of one user, flattened from `{username: status}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserOnlineStatus {
    pub username: String,
    /// `online` or `offline`
    pub status: String,
}

/// Device currently logged in for a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOnlineDevice {
    /// Resource id, usable with the single-device disconnect call
    pub res: String,
    pub device_uuid: String,
    pub device_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectResult {
    #[serde(default)]
    pub result: bool,
}

/// Custom attributes of one user, flattened from `{username: {k: v}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub username: String,
    pub metadata: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_omits_empty_optional_fields() {
        let user = NewUser::new("alice", "");
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"username":"alice"}"#);

        let user = NewUser::new("bob", "pw").with_nickname("Bobby");
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"username":"bob","password":"pw","nickname":"Bobby"}"#
        );
    }

    #[test]
    fn user_entity_reads_type_field() {
        let entity: UserEntity = serde_json::from_str(
            r#"{"uuid":"u-1","type":"user","created":1,"modified":2,"username":"alice","activated":true}"#,
        )
        .unwrap();
        assert_eq!(entity.entity_type, "user");
        assert!(entity.activated);
    }
}
