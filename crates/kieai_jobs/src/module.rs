//! The typed submit/fetch/verify-callback handle for one model route.

use crate::task::{Task, TaskRecord};
use crate::wait::{self, WaitOptions};
use kieai_core::{SdkError, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::marker::PhantomData;
use std::sync::Arc;

/// Path of the shared task-creation endpoint.
pub const CREATE_TASK_PATH: &str = "/api/v1/jobs/createTask";

/// Path of the shared task-query endpoint.
pub const RECORD_INFO_PATH: &str = "/api/v1/jobs/recordInfo";

/// Response of a successful task submission.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTask {
    /// Server-assigned task identifier.
    pub task_id: String,
}

/// Typed handle for one model route of the shared jobs endpoints.
///
/// `I` is the capability-defined input shape and `R` the decoded result
/// payload. The model route is injected by the capability that constructs
/// the handle, never by the caller. Handles hold no task state — every
/// operation is an independent round trip.
pub struct JobsModule<I, R> {
    transport: Arc<dyn Transport>,
    model: String,
    _marker: PhantomData<fn(I) -> R>,
}

impl<I, R> Clone for JobsModule<I, R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            model: self.model.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I, R> core::fmt::Debug for JobsModule<I, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JobsModule")
            .field("model", &self.model)
            .finish()
    }
}

impl<I, R> JobsModule<I, R>
where
    I: Serialize,
    R: DeserializeOwned,
{
    /// Creates a handle bound to a model route.
    pub fn new(transport: Arc<dyn Transport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            _marker: PhantomData,
        }
    }

    /// Returns the model route this handle submits to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submits a generation request and returns the created task id.
    ///
    /// The serialized input must be a JSON object. One outbound request; no
    /// local state is retained.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for unusable input, or any transport error.
    pub async fn create_task(
        &self,
        input: &I,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        let input = serde_json::to_value(input)
            .map_err(|err| SdkError::validation_field("input", format!("input is not serializable: {err}")))?;
        if !input.is_object() {
            return Err(SdkError::validation_field(
                "input",
                "input must serialize to a JSON object",
            ));
        }

        let mut body = json!({ "model": self.model, "input": input });
        if let Some(url) = callback_url {
            body["callBackUrl"] = Value::String(url.to_string());
        }

        let data = self.transport.post(CREATE_TASK_PATH, body).await?;
        let created: CreatedTask = serde_json::from_value(data).map_err(|err| SdkError::Unknown {
            message: format!("malformed createTask response: {err}"),
            source: Some(Box::new(err)),
        })?;
        tracing::debug!(model = %self.model, task_id = %created.task_id, "task created");
        Ok(created)
    }

    /// Fetches a fresh task snapshot.
    ///
    /// `param` and `resultJson` are decoded leniently (see
    /// [`decode`](crate::decode)); a malformed field degrades rather than
    /// failing the fetch.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for an empty id, or any transport error.
    pub async fn get_task(&self, task_id: &str) -> Result<Task<R>, SdkError> {
        if task_id.is_empty() {
            return Err(SdkError::validation_field("taskId", "taskId is required"));
        }
        let data = self
            .transport
            .get(RECORD_INFO_PATH, &[("taskId", task_id.to_string())])
            .await?;
        let record: TaskRecord = serde_json::from_value(data).map_err(|err| SdkError::Unknown {
            message: format!("malformed recordInfo response: {err}"),
            source: Some(Box::new(err)),
        })?;
        Ok(Task::from_record(record))
    }

    /// Validates an inbound webhook payload and re-fetches the task.
    ///
    /// Callbacks arrive over an unauthenticated path, so the body is only a
    /// signal that the task reached a terminal state — it is never taken as
    /// the state itself. The payload must carry `data.taskId`; the returned
    /// snapshot is fetched fresh from the query endpoint.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] when the payload carries no usable task id.
    pub async fn verify_callback(&self, payload: &Value) -> Result<Task<R>, SdkError> {
        let task_id = payload
            .get("data")
            .and_then(|data| data.get("taskId"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SdkError::validation_field("data.taskId", "callback payload carries no task id")
            })?;
        self.get_task(task_id).await
    }

    /// Polls the task until it reaches a terminal state.
    ///
    /// # Errors
    ///
    /// [`SdkError::TaskFailed`] when the task fails remotely,
    /// [`SdkError::Timeout`] when `options.max_wait` elapses first.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        options: &WaitOptions,
    ) -> Result<R, SdkError> {
        self.wait_for_completion_with(task_id, options, |_| {}).await
    }

    /// Like [`wait_for_completion`](Self::wait_for_completion), invoking
    /// `on_progress` once per poll with the latest snapshot.
    pub async fn wait_for_completion_with(
        &self,
        task_id: &str,
        options: &WaitOptions,
        on_progress: impl FnMut(&Task<R>),
    ) -> Result<R, SdkError> {
        if task_id.is_empty() {
            return Err(SdkError::validation_field("taskId", "taskId is required"));
        }
        wait::poll_until_terminal(task_id, options, || self.get_task(task_id), on_progress).await
    }
}
