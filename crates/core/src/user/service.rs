//! User registration, lookup, activation and presence

use std::collections::BTreeMap;

use easemob_domain::constants::{MAX_ADD_USERS, MAX_STATUS_QUERY_USERS};
use easemob_domain::{
    DataResponse, DisconnectResult, NewUser, Result, UserEntity, UserOnlineDevice,
    UserOnlineStatus, UserResponse,
};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::transport::{ApiExecutor, ApiRequest};
use crate::validation::{ensure_count, ensure_not_empty, path_segment};

const USERS_PATH: &str = "users";

fn user_path(username: &str, suffix: &str) -> Result<String> {
    ensure_not_empty("username", username)?;
    let mut path = format!("{USERS_PATH}/{}", path_segment(username));
    if !suffix.is_empty() {
        path.push('/');
        path.push_str(suffix);
    }
    Ok(path)
}

fn flatten_status(entries: impl IntoIterator<Item = (String, String)>) -> Vec<UserOnlineStatus> {
    entries.into_iter().map(|(username, status)| UserOnlineStatus { username, status }).collect()
}

/// User management operations
#[derive(Debug, Clone)]
pub struct UserService {
    executor: ApiExecutor,
}

impl UserService {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    /// Register 1 to 60 users
    ///
    /// A single user is sent as an object, several as an array.
    #[instrument(skip(self, users), fields(count = users.len()))]
    pub async fn add_users(&self, users: &[NewUser]) -> Result<UserResponse<Vec<UserEntity>>> {
        ensure_count("users", users.len(), MAX_ADD_USERS)?;
        for user in users {
            ensure_not_empty("username", &user.username)?;
        }

        let request = match users {
            [single] => ApiRequest::post(USERS_PATH).json(single)?,
            many => ApiRequest::post(USERS_PATH).json(many)?,
        };
        let response: UserResponse<Vec<UserEntity>> = self.executor.execute(request).await?;
        debug!(created = response.entities.len(), "users registered");
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> Result<UserResponse<Vec<UserEntity>>> {
        let request = ApiRequest::delete(user_path(username, "")?);
        self.executor.execute(request).await
    }

    /// Delete a page of users, oldest first
    #[instrument(skip(self))]
    pub async fn delete_users(
        &self,
        limit: i32,
        cursor: Option<&str>,
    ) -> Result<UserResponse<Vec<UserEntity>>> {
        let request = ApiRequest::delete(USERS_PATH).page(limit, cursor);
        self.executor.execute(request).await
    }

    #[instrument(skip(self, new_password))]
    pub async fn change_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<UserResponse<Value>> {
        ensure_not_empty("new_password", new_password)?;
        let request = ApiRequest::put(user_path(username, "password")?)
            .json(&json!({ "newpassword": new_password }))?;
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Result<UserResponse<Vec<UserEntity>>> {
        let request = ApiRequest::get(user_path(username, "")?);
        self.executor.execute(request).await
    }

    /// List a page of users
    #[instrument(skip(self))]
    pub async fn get_users(
        &self,
        limit: i32,
        cursor: Option<&str>,
    ) -> Result<UserResponse<Vec<UserEntity>>> {
        let request = ApiRequest::get(USERS_PATH).page(limit, cursor);
        self.executor.execute(request).await
    }

    /// Ban a user and kick every session
    #[instrument(skip(self))]
    pub async fn deactivate_user(&self, username: &str) -> Result<UserResponse<Vec<UserEntity>>> {
        let request = ApiRequest::post(user_path(username, "deactivate")?);
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn activate_user(&self, username: &str) -> Result<UserResponse<Vec<UserEntity>>> {
        let request = ApiRequest::post(user_path(username, "activate")?);
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_online_status(&self, username: &str) -> Result<DataResponse<UserOnlineStatus>> {
        let request = ApiRequest::get(user_path(username, "status")?);
        let response: DataResponse<BTreeMap<String, String>> =
            self.executor.execute(request).await?;

        Ok(response.map(|data| flatten_status(data).pop().unwrap_or_default()))
    }

    /// Presence of 1 to 100 users
    ///
    /// Result order follows the server's answer and is not guaranteed.
    #[instrument(skip(self, usernames), fields(count = usernames.len()))]
    pub async fn batch_get_online_status(
        &self,
        usernames: &[String],
    ) -> Result<DataResponse<Vec<UserOnlineStatus>>> {
        ensure_count("usernames", usernames.len(), MAX_STATUS_QUERY_USERS)?;

        let request =
            ApiRequest::post("users/batch/status").json(&json!({ "usernames": usernames }))?;
        let response: DataResponse<Vec<BTreeMap<String, String>>> =
            self.executor.execute(request).await?;

        Ok(response.map(|data| flatten_status(data.into_iter().flatten())))
    }

    #[instrument(skip(self))]
    pub async fn get_online_devices(
        &self,
        username: &str,
    ) -> Result<DataResponse<Vec<UserOnlineDevice>>> {
        let request = ApiRequest::get(user_path(username, "resources")?);
        self.executor.execute(request).await
    }

    /// Force every session of a user offline
    #[instrument(skip(self))]
    pub async fn disconnect_user(&self, username: &str) -> Result<DataResponse<DisconnectResult>> {
        let request = ApiRequest::get(user_path(username, "disconnect")?);
        self.executor.execute(request).await
    }

    /// Force one device offline; `resource_id` comes from [`Self::get_online_devices`]
    #[instrument(skip(self))]
    pub async fn disconnect_device(
        &self,
        username: &str,
        resource_id: &str,
    ) -> Result<DataResponse<DisconnectResult>> {
        ensure_not_empty("resource_id", resource_id)?;
        let suffix = format!("disconnect/{}", path_segment(resource_id));
        let request = ApiRequest::delete(user_path(username, &suffix)?);
        self.executor.execute(request).await
    }
}
