//! Push label management and membership

use easemob_domain::constants::MAX_LABEL_USERS;
use easemob_domain::{
    DataResponse, LabelUsersResult, PagedResponse, PushLabel, PushLabelUser, Result,
};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::transport::{ApiExecutor, ApiRequest};
use crate::validation::{ensure_count, ensure_not_empty, path_segment};

const LABEL_PATH: &str = "push/label";

fn label_path(name: &str) -> Result<String> {
    ensure_not_empty("label", name)?;
    Ok(format!("{LABEL_PATH}/{}", path_segment(name)))
}

/// Push label operations
#[derive(Debug, Clone)]
pub struct PushLabelService {
    executor: ApiExecutor,
}

impl PushLabelService {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    /// Create a label; an empty description is left out
    #[instrument(skip(self))]
    pub async fn create_label(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<DataResponse<PushLabel>> {
        ensure_not_empty("label", name)?;

        let mut body = Map::new();
        body.insert("name".into(), Value::from(name));
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            body.insert("description".into(), Value::from(description));
        }

        let request = ApiRequest::post(LABEL_PATH).json(&body)?;
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_label(&self, name: &str) -> Result<DataResponse<String>> {
        let request = ApiRequest::delete(label_path(name)?);
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_label(&self, name: &str) -> Result<DataResponse<PushLabel>> {
        let request = ApiRequest::get(label_path(name)?);
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_labels(
        &self,
        limit: i32,
        cursor: Option<&str>,
    ) -> Result<PagedResponse<Vec<PushLabel>>> {
        let request = ApiRequest::get(LABEL_PATH).page(limit, cursor);
        self.executor.execute(request).await
    }

    /// Attach 1 to 100 users to a label
    #[instrument(skip(self, usernames), fields(count = usernames.len()))]
    pub async fn add_label_users(
        &self,
        name: &str,
        usernames: &[String],
    ) -> Result<DataResponse<LabelUsersResult>> {
        ensure_count("usernames", usernames.len(), MAX_LABEL_USERS)?;
        let request = ApiRequest::post(format!("{}/user", label_path(name)?))
            .json(&json!({ "usernames": usernames }))?;

        let response: DataResponse<LabelUsersResult> = self.executor.execute(request).await?;
        debug!(
            succeeded = response.data.success.len(),
            failed = response.data.fail.len(),
            "label users attached"
        );
        Ok(response)
    }

    /// Detach 1 to 100 users from a label
    #[instrument(skip(self, usernames), fields(count = usernames.len()))]
    pub async fn remove_label_users(
        &self,
        name: &str,
        usernames: &[String],
    ) -> Result<DataResponse<LabelUsersResult>> {
        ensure_count("usernames", usernames.len(), MAX_LABEL_USERS)?;
        let request = ApiRequest::delete(format!("{}/user", label_path(name)?))
            .json(&json!({ "usernames": usernames }))?;
        self.executor.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_label_user(
        &self,
        name: &str,
        username: &str,
    ) -> Result<DataResponse<PushLabelUser>> {
        ensure_not_empty("username", username)?;
        let path = format!("{}/user/{}", label_path(name)?, path_segment(username));
        self.executor.execute(ApiRequest::get(path)).await
    }

    #[instrument(skip(self))]
    pub async fn list_label_users(
        &self,
        name: &str,
        limit: i32,
        cursor: Option<&str>,
    ) -> Result<PagedResponse<Vec<PushLabelUser>>> {
        let request = ApiRequest::get(format!("{}/user", label_path(name)?)).page(limit, cursor);
        self.executor.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::{client_with, RecordingTransport};
    use crate::transport::HttpMethod;

    fn label_json() -> serde_json::Value {
        json!({"data": {"name": "vip", "description": "paying", "createdAt": 1_700_000_000_000_i64, "count": 2}})
    }

    #[tokio::test]
    async fn create_label_omits_empty_description() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(200, label_json());
        transport.enqueue_json(200, label_json());
        let client = client_with(transport.clone());

        let label = client.push_labels().create_label("vip", Some("")).await.unwrap();
        assert_eq!(label.data.created_at, 1_700_000_000_000);
        client.push_labels().create_label("vip", Some("paying")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].path, "push/label");
        assert_eq!(requests[0].json_body().unwrap(), &json!({"name": "vip"}));
        assert_eq!(
            requests[1].json_body().unwrap(),
            &json!({"name": "vip", "description": "paying"})
        );
    }

    #[tokio::test]
    async fn label_listings_clamp_limit() {
        for (limit, expected) in [(0, "10"), (-1, "10"), (5, "5"), (101, "100")] {
            let transport = RecordingTransport::new();
            transport.enqueue_json(200, json!({"cursor": "next", "data": []}));
            transport.enqueue_json(200, json!({"data": []}));
            let client = client_with(transport.clone());

            let page = client.push_labels().list_labels(limit, None).await.unwrap();
            assert_eq!(page.next_cursor(), Some("next"));
            client.push_labels().list_label_users("vip", limit, Some("c1")).await.unwrap();

            let requests = transport.requests();
            assert_eq!(requests[0].query_value("limit"), Some(expected));
            assert_eq!(requests[0].query_value("cursor"), Some(""));
            assert_eq!(requests[1].path, "push/label/vip/user");
            assert_eq!(requests[1].query_value("limit"), Some(expected));
            assert_eq!(requests[1].query_value("cursor"), Some("c1"));
        }
    }

    #[tokio::test]
    async fn member_changes_use_post_and_delete_with_body() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(200, json!({"data": {"success": ["alice"], "fail": {}}}));
        transport.enqueue_json(
            200,
            json!({"data": {"success": [], "fail": {"bob": "user not in label"}}}),
        );
        let client = client_with(transport.clone());

        let added = client.push_labels().add_label_users("vip", &["alice".into()]).await.unwrap();
        assert_eq!(added.data.success, ["alice"]);
        let removed =
            client.push_labels().remove_label_users("vip", &["bob".into()]).await.unwrap();
        assert_eq!(removed.data.fail["bob"], "user not in label");

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].path, "push/label/vip/user");
        assert_eq!(requests[1].json_body().unwrap(), &json!({"usernames": ["bob"]}));
    }

    #[tokio::test]
    async fn member_batches_are_bounded() {
        let transport = RecordingTransport::new();
        let client = client_with(transport.clone());
        let too_many: Vec<_> = (0..101).map(|i| format!("user{i}")).collect();

        assert!(client.push_labels().add_label_users("vip", &[]).await.unwrap_err().is_validation());
        assert!(client
            .push_labels()
            .add_label_users("vip", &too_many)
            .await
            .unwrap_err()
            .is_validation());
        assert!(client.push_labels().remove_label_users("vip", &[]).await.unwrap_err().is_validation());
        assert!(client
            .push_labels()
            .remove_label_users("vip", &too_many)
            .await
            .unwrap_err()
            .is_validation());

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn single_label_and_member_lookups() {
        let transport = RecordingTransport::new();
        transport.enqueue_json(200, label_json());
        transport.enqueue_json(200, json!({"data": {"username": "alice", "created": 5}}));
        transport.enqueue_json(200, json!({"data": "success"}));
        let client = client_with(transport.clone());

        assert_eq!(client.push_labels().get_label("vip").await.unwrap().data.count, 2);
        let member = client.push_labels().get_label_user("vip", "alice").await.unwrap();
        assert_eq!(member.data.created, 5);
        assert_eq!(client.push_labels().delete_label("vip").await.unwrap().data, "success");

        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["push/label/vip", "push/label/vip/user/alice", "push/label/vip"]);
    }
}
