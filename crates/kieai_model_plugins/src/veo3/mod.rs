//! Veo3 video generation.
//!
//! Veo3 runs on its own route family instead of the generic jobs
//! endpoints, reports its own state strings, and posts callbacks with the
//! task id at the top level of the payload.

mod plugin;
mod types;

pub use plugin::Veo3Plugin;
pub use types::{
    Veo3AspectRatio, Veo3GenerateOptions, Veo3Quality, Veo3State, Veo3Task, Veo3Video1080p,
    Veo3VideoInfo,
};

use kieai_core::{SdkError, Transport};
use kieai_jobs::{CreatedTask, WaitOptions, poll_until_terminal};
use serde_json::Value;
use std::sync::Arc;

/// Registry name of the Veo3 plugin.
pub const NAME: &str = "veo3";

const GENERATE_PATH: &str = "/api/v1/veo/generate";
const RECORD_INFO_PATH: &str = "/api/v1/veo/record-info";
const HD_VIDEO_PATH: &str = "/api/v1/veo/get-1080p-video";

/// Runtime API of the Veo3 plugin.
pub struct Veo3Api {
    transport: Arc<dyn Transport>,
}

impl Veo3Api {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Submits a generation request (the unified entry point).
    ///
    /// Prefer [`text_to_video`](Self::text_to_video) and
    /// [`image_to_video`](Self::image_to_video), which validate the
    /// option combination first.
    pub async fn generate(&self, options: &Veo3GenerateOptions) -> Result<CreatedTask, SdkError> {
        let body = serde_json::to_value(options).map_err(|err| {
            SdkError::validation_field("options", format!("options are not serializable: {err}"))
        })?;
        let data = self.transport.post(GENERATE_PATH, body).await?;
        serde_json::from_value(data).map_err(|err| SdkError::Unknown {
            message: format!("malformed generate response: {err}"),
            source: Some(Box::new(err)),
        })
    }

    /// Submits a text-to-video task.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for rejected options, or any transport
    /// error.
    pub async fn text_to_video(
        &self,
        options: &Veo3GenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.generate(options).await
    }

    /// Submits an image-to-video task; at least one input image is
    /// required.
    pub async fn image_to_video(
        &self,
        options: &Veo3GenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        if options
            .image_urls
            .as_ref()
            .is_none_or(|urls| urls.is_empty())
        {
            return Err(SdkError::validation_field(
                "imageUrls",
                "imageUrls is required for image-to-video",
            ));
        }
        self.generate(options).await
    }

    /// Fetches a task snapshot.
    pub async fn get_task(&self, task_id: &str) -> Result<Veo3Task, SdkError> {
        if task_id.is_empty() {
            return Err(SdkError::validation_field("taskId", "taskId is required"));
        }
        let data = self
            .transport
            .get(RECORD_INFO_PATH, &[("taskId", task_id.to_string())])
            .await?;
        serde_json::from_value(data).map_err(|err| SdkError::Unknown {
            message: format!("malformed record-info response: {err}"),
            source: Some(Box::new(err)),
        })
    }

    /// Fetches the 1080p rendition of a finished 16:9 task.
    ///
    /// The rendition renders after the base video succeeds, so this call
    /// can fail until the follow-up completes; retry after a short delay.
    pub async fn get_1080p_video(&self, task_id: &str) -> Result<Veo3Video1080p, SdkError> {
        if task_id.is_empty() {
            return Err(SdkError::validation_field("taskId", "taskId is required"));
        }
        let data = self
            .transport
            .get(HD_VIDEO_PATH, &[("taskId", task_id.to_string())])
            .await?;
        serde_json::from_value(data).map_err(|err| SdkError::Unknown {
            message: format!("malformed get-1080p-video response: {err}"),
            source: Some(Box::new(err)),
        })
    }

    /// Validates an inbound callback and re-fetches the task.
    ///
    /// Veo3 posts the task id at the top level of the callback payload.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] when the payload carries no usable task id.
    pub async fn verify_callback(&self, payload: &Value) -> Result<Veo3Task, SdkError> {
        let task_id = payload
            .get("taskId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SdkError::validation_field("taskId", "callback payload carries no task id")
            })?;
        self.get_task(task_id).await
    }

    /// Polls a task until terminal. Video generation is slow; pass
    /// [`WaitOptions::video`] unless a tighter bound is wanted.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        options: &WaitOptions,
    ) -> Result<Veo3VideoInfo, SdkError> {
        poll_until_terminal(task_id, options, || self.get_task(task_id), |_| {}).await
    }
}

impl core::fmt::Debug for Veo3Api {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Veo3Api").finish()
    }
}
