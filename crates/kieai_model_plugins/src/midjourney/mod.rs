//! Midjourney image and video tasks.
//!
//! The oldest capability surface: its own route family, the numeric
//! `successFlag` status encoding, and callbacks carrying the task id at
//! the top level of the payload.

mod plugin;
mod types;

pub use plugin::MidjourneyPlugin;
pub use types::{
    MidjourneyGenerateOptions, MidjourneyMotion, MidjourneyResult, MidjourneyResultUrl,
    MidjourneySpeed, MidjourneyTask, MidjourneyTaskType,
};

use crate::validate;
use kieai_core::{SdkError, Transport};
use kieai_jobs::{CreatedTask, WaitOptions, poll_until_terminal};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Registry name of the Midjourney plugin.
pub const NAME: &str = "midjourney";

const GENERATE_PATH: &str = "/api/v1/mj/generate";
const VIDEO_EXTEND_PATH: &str = "/api/v1/mj/video-extend";
const UPSCALE_PATH: &str = "/api/v1/mj/upscale";
const VARY_PATH: &str = "/api/v1/mj/vary";
const TASK_DETAILS_PATH: &str = "/api/v1/mj/task-details";

/// Runtime API of the Midjourney plugin.
pub struct MidjourneyApi {
    transport: Arc<dyn Transport>,
}

impl MidjourneyApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn submit(&self, path: &str, body: Map<String, Value>) -> Result<CreatedTask, SdkError> {
        let data = self.transport.post(path, Value::Object(body)).await?;
        serde_json::from_value(data).map_err(|err| SdkError::Unknown {
            message: format!("malformed generate response: {err}"),
            source: Some(Box::new(err)),
        })
    }

    fn body_from(
        task_type: MidjourneyTaskType,
        options: &MidjourneyGenerateOptions,
    ) -> Result<Map<String, Value>, SdkError> {
        let mut body = match serde_json::to_value(options) {
            Ok(Value::Object(map)) => map,
            _ => {
                return Err(SdkError::validation_field(
                    "options",
                    "options must serialize to a JSON object",
                ));
            }
        };
        body.insert("taskType".into(), json!(task_type));
        Ok(body)
    }

    /// Submits a text-to-image task.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for rejected arguments, or any transport
    /// error.
    pub async fn text_to_image(
        &self,
        prompt: &str,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("prompt", prompt)?;
        let mut body = Self::body_from(MidjourneyTaskType::TextToImage, options)?;
        body.insert("prompt".into(), json!(prompt));
        self.submit(GENERATE_PATH, body).await
    }

    /// Submits an image-to-image task.
    pub async fn image_to_image(
        &self,
        prompt: &str,
        file_urls: &[String],
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("prompt", prompt)?;
        if file_urls.is_empty() {
            return Err(SdkError::validation_field(
                "fileUrls",
                "fileUrls is required for image to image generation",
            ));
        }
        let mut body = Self::body_from(MidjourneyTaskType::ImageToImage, options)?;
        body.insert("prompt".into(), json!(prompt));
        body.insert("fileUrls".into(), json!(file_urls));
        self.submit(GENERATE_PATH, body).await
    }

    /// Submits a style-reference task.
    pub async fn style_reference(
        &self,
        prompt: &str,
        file_urls: &[String],
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("prompt", prompt)?;
        if file_urls.is_empty() {
            return Err(SdkError::validation_field(
                "fileUrls",
                "fileUrls is required for style reference generation",
            ));
        }
        let mut body = Self::body_from(MidjourneyTaskType::StyleReference, options)?;
        body.insert("prompt".into(), json!(prompt));
        body.insert("fileUrls".into(), json!(file_urls));
        self.submit(GENERATE_PATH, body).await
    }

    /// Submits an omni-reference task. `ow` weights the reference, 1 to
    /// 1000.
    pub async fn omni_reference(
        &self,
        prompt: &str,
        file_urls: &[String],
        ow: u32,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("prompt", prompt)?;
        if file_urls.is_empty() {
            return Err(SdkError::validation_field(
                "fileUrls",
                "fileUrls is required for omni reference generation",
            ));
        }
        if !(1..=1000).contains(&ow) {
            return Err(SdkError::validation_field(
                "ow",
                "ow parameter must be between 1 and 1000",
            ));
        }
        let mut body = Self::body_from(MidjourneyTaskType::OmniReference, options)?;
        body.insert("prompt".into(), json!(prompt));
        body.insert("fileUrls".into(), json!(file_urls));
        body.insert("ow".into(), json!(ow));
        self.submit(GENERATE_PATH, body).await
    }

    /// Submits an image-to-video task from exactly one source image.
    pub async fn video(
        &self,
        prompt: &str,
        file_url: &str,
        motion: MidjourneyMotion,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        self.video_task(MidjourneyTaskType::Video, prompt, file_url, motion, options)
            .await
    }

    /// Submits an HD image-to-video task from exactly one source image.
    pub async fn video_hd(
        &self,
        prompt: &str,
        file_url: &str,
        motion: MidjourneyMotion,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        self.video_task(MidjourneyTaskType::VideoHd, prompt, file_url, motion, options)
            .await
    }

    async fn video_task(
        &self,
        task_type: MidjourneyTaskType,
        prompt: &str,
        file_url: &str,
        motion: MidjourneyMotion,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("prompt", prompt)?;
        validate::require_non_empty("fileUrl", file_url)?;
        let mut body = Self::body_from(task_type, options)?;
        body.insert("prompt".into(), json!(prompt));
        body.insert("fileUrls".into(), json!([file_url]));
        body.insert("motion".into(), json!(motion));
        self.submit(GENERATE_PATH, body).await
    }

    /// Extends a finished video with a fresh prompt.
    pub async fn extend_video_manual(
        &self,
        task_id: &str,
        index: u32,
        prompt: &str,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("taskId", task_id)?;
        validate::require_non_empty("prompt", prompt)?;
        let mut body = Self::body_from(MidjourneyTaskType::VideoExtendManual, options)?;
        body.insert("taskId".into(), json!(task_id));
        body.insert("index".into(), json!(index));
        body.insert("prompt".into(), json!(prompt));
        self.submit(VIDEO_EXTEND_PATH, body).await
    }

    /// Extends a finished video, letting the model continue on its own.
    pub async fn extend_video_auto(
        &self,
        task_id: &str,
        index: u32,
        options: &MidjourneyGenerateOptions,
    ) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("taskId", task_id)?;
        let mut body = Self::body_from(MidjourneyTaskType::VideoExtendAuto, options)?;
        body.insert("taskId".into(), json!(task_id));
        body.insert("index".into(), json!(index));
        self.submit(VIDEO_EXTEND_PATH, body).await
    }

    /// Upscales one image of a finished grid task. `image_index` is 1 to 4.
    pub async fn upscale(&self, task_id: &str, image_index: u32) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("taskId", task_id)?;
        Self::check_image_index(image_index)?;
        let mut body = Map::new();
        body.insert("taskId".into(), json!(task_id));
        body.insert("imageIndex".into(), json!(image_index));
        self.submit(UPSCALE_PATH, body).await
    }

    /// Requests a variation of one image of a finished grid task.
    /// `image_index` is 1 to 4.
    pub async fn vary(&self, task_id: &str, image_index: u32) -> Result<CreatedTask, SdkError> {
        validate::require_non_empty("taskId", task_id)?;
        Self::check_image_index(image_index)?;
        let mut body = Map::new();
        body.insert("taskId".into(), json!(task_id));
        body.insert("imageIndex".into(), json!(image_index));
        self.submit(VARY_PATH, body).await
    }

    fn check_image_index(image_index: u32) -> Result<(), SdkError> {
        if !(1..=4).contains(&image_index) {
            return Err(SdkError::validation_field(
                "imageIndex",
                "imageIndex must be between 1 and 4",
            ));
        }
        Ok(())
    }

    /// Fetches a task snapshot.
    pub async fn get_task(&self, task_id: &str) -> Result<MidjourneyTask, SdkError> {
        if task_id.is_empty() {
            return Err(SdkError::validation_field("taskId", "taskId is required"));
        }
        let data = self
            .transport
            .get(TASK_DETAILS_PATH, &[("taskId", task_id.to_string())])
            .await?;
        // task-details nests the record one level deeper than the other
        // endpoints.
        let record = match data.get("data") {
            Some(inner) => inner.clone(),
            None => data,
        };
        serde_json::from_value(record).map_err(|err| SdkError::Unknown {
            message: format!("malformed task-details response: {err}"),
            source: Some(Box::new(err)),
        })
    }

    /// Validates an inbound callback and re-fetches the task.
    ///
    /// Midjourney posts the task id at the top level of the callback
    /// payload.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] when the payload carries no usable task id.
    pub async fn verify_callback(&self, payload: &Value) -> Result<MidjourneyTask, SdkError> {
        let task_id = payload
            .get("taskId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SdkError::validation_field("taskId", "callback payload carries no task id")
            })?;
        self.get_task(task_id).await
    }

    /// Polls a task until terminal. Image generation is quick; pass
    /// [`WaitOptions::image`] unless a looser bound is wanted.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        options: &WaitOptions,
    ) -> Result<MidjourneyResult, SdkError> {
        poll_until_terminal(task_id, options, || self.get_task(task_id), |_| {}).await
    }
}

impl core::fmt::Debug for MidjourneyApi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MidjourneyApi").finish()
    }
}
