//! Push notification delivery

use chrono::NaiveDateTime;
use easemob_domain::constants::{MAX_PUSH_LABELS, MAX_PUSH_TARGETS, PUSH_START_DATE_FORMAT};
use easemob_domain::{
    AsyncPushResult, DataResponse, LabelPushResult, PushMessage, PushRequest, PushStrategy,
    Result, SyncPushResult,
};
use tracing::{info, instrument};

use crate::transport::{ApiExecutor, ApiRequest};
use crate::validation::{ensure_count, ensure_not_empty, path_segment};

/// Zone-less wall time in the deployment's expected zone
fn format_start_date(start_at: Option<NaiveDateTime>) -> Option<String> {
    start_at.map(|at| at.format(PUSH_START_DATE_FORMAT).to_string())
}

/// Push notification operations
#[derive(Debug, Clone)]
pub struct PushService {
    executor: ApiExecutor,
}

impl PushService {
    pub fn new(executor: ApiExecutor) -> Self {
        Self { executor }
    }

    /// Push to one user and wait for the vendor's answer
    #[instrument(skip(self, message))]
    pub async fn sync_push(
        &self,
        target: &str,
        message: &PushMessage,
        strategy: PushStrategy,
    ) -> Result<DataResponse<Vec<SyncPushResult>>> {
        ensure_not_empty("target", target)?;
        let body = PushRequest { targets: None, push_message: message, strategy, start_date: None };
        let request =
            ApiRequest::post(format!("push/sync/{}", path_segment(target))).json(&body)?;
        self.executor.execute(request).await
    }

    /// Queue a push to one user
    #[instrument(skip(self, message))]
    pub async fn async_push(
        &self,
        target: &str,
        message: &PushMessage,
        strategy: PushStrategy,
    ) -> Result<DataResponse<Vec<AsyncPushResult>>> {
        ensure_not_empty("target", target)?;
        let body = PushRequest { targets: None, push_message: message, strategy, start_date: None };
        let request =
            ApiRequest::post(format!("push/async/{}", path_segment(target))).json(&body)?;
        self.executor.execute(request).await
    }

    /// Queue a push to 1 to 100 users
    #[instrument(skip(self, targets, message), fields(count = targets.len()))]
    pub async fn batch_async_push(
        &self,
        targets: &[String],
        message: &PushMessage,
        strategy: PushStrategy,
    ) -> Result<DataResponse<Vec<AsyncPushResult>>> {
        ensure_count("targets", targets.len(), MAX_PUSH_TARGETS)?;
        let body = PushRequest {
            targets: Some(targets),
            push_message: message,
            strategy,
            start_date: None,
        };
        let request = ApiRequest::post("push/single").json(&body)?;
        self.executor.execute(request).await
    }

    /// Push to every member of 1 to 5 labels, optionally scheduled
    #[instrument(skip(self, message))]
    pub async fn label_push(
        &self,
        labels: &[String],
        message: &PushMessage,
        strategy: PushStrategy,
        start_at: Option<NaiveDateTime>,
    ) -> Result<DataResponse<LabelPushResult>> {
        ensure_count("labels", labels.len(), MAX_PUSH_LABELS)?;
        let body = PushRequest {
            targets: Some(labels),
            push_message: message,
            strategy,
            start_date: format_start_date(start_at),
        };
        let request = ApiRequest::post("push/list/label").json(&body)?;

        let response: DataResponse<LabelPushResult> = self.executor.execute(request).await?;
        info!(task_id = response.data.task_id, "label push task created");
        Ok(response)
    }

    /// Push to every user of the application, optionally scheduled
    ///
    /// Returns the id of the created task.
    #[instrument(skip(self, message))]
    pub async fn broadcast_push(
        &self,
        message: &PushMessage,
        strategy: PushStrategy,
        start_at: Option<NaiveDateTime>,
    ) -> Result<DataResponse<i64>> {
        let body = PushRequest {
            targets: None,
            push_message: message,
            strategy,
            start_date: format_start_date(start_at),
        };
        let request = ApiRequest::post("push/task").json(&body)?;

        let response: DataResponse<i64> = self.executor.execute(request).await?;
        info!(task_id = response.data, "broadcast push task created");
        Ok(response)
    }
}
