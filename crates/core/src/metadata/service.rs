//! Custom per-user attributes

use std::collections::BTreeMap;

use easemob_domain::{DataResponse, Result, UserMetadata};
use serde_json::json;
use tracing::{debug, instrument};

use crate::transport::{ApiExecutor, ApiRequest};
use crate::validation::{ensure_not_empty, ensure_some, path_segment};

const METADATA_PATH: &str = "metadata/user";

fn metadata_path(username: &str) -> Result<String> {
    ensure_not_empty("username", username)?;
    Ok(format!("{METADATA_PATH}/{}", path_segment(username)))
}

/// User metadata operations
#[derive(Debug, Clone)]
pub struct MetadataService {
    executor: ApiExecutor,
}

impl MetadataService {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    /// Set attributes of a user; sent form-encoded
    #[instrument(skip(self, metadata), fields(fields = metadata.len()))]
    pub async fn set_user_metadata(
        &self,
        username: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<DataResponse<BTreeMap<String, String>>> {
        let request = ApiRequest::put(metadata_path(username)?).form(metadata);
        self.executor.execute(request).await
    }

    /// Remove every attribute of a user
    #[instrument(skip(self))]
    pub async fn delete_user_metadata(&self, username: &str) -> Result<DataResponse<bool>> {
        let request = ApiRequest::delete(metadata_path(username)?);
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_metadata(
        &self,
        username: &str,
    ) -> Result<DataResponse<BTreeMap<String, String>>> {
        let request = ApiRequest::get(metadata_path(username)?);
        self.executor.execute(request).await
    }

    /// Attributes of several users
    ///
    /// An empty `properties` asks for every attribute. The number of targets
    /// is left to the server. Result order is not guaranteed.
    #[instrument(skip(self, targets, properties), fields(targets = targets.len()))]
    pub async fn batch_get_user_metadata(
        &self,
        targets: &[String],
        properties: &[String],
    ) -> Result<DataResponse<Vec<UserMetadata>>> {
        ensure_some("targets", targets.len())?;

        let request = ApiRequest::post(format!("{METADATA_PATH}/get"))
            .json(&json!({ "targets": targets, "properties": properties }))?;
        let response: DataResponse<BTreeMap<String, BTreeMap<String, String>>> =
            self.executor.execute(request).await?;

        debug!(users = response.data.len(), "metadata fetched");
        Ok(response.map(|data| {
            data.into_iter()
                .map(|(username, metadata)| UserMetadata { username, metadata })
                .collect()
        }))
    }

    /// Total size in bytes of all user attributes in the application
    #[instrument(skip(self))]
    pub async fn get_metadata_capacity(&self) -> Result<DataResponse<i64>> {
        let request = ApiRequest::get(format!("{METADATA_PATH}/capacity"));
        self.executor.execute(request).await
    }
}
