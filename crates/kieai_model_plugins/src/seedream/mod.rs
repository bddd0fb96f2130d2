//! Seedream V4 image generation and editing.
//!
//! Two model variants over the generic jobs endpoints. Unlike Kling,
//! callback dispatch here is always strict: an unknown model discriminator
//! rejects the payload.

mod plugin;
mod types;

pub use plugin::SeedreamPlugin;
pub use types::{EditOptions, ImageResult, ImageSize, TextToImageOptions};

use kieai_core::{SdkError, Transport};
use kieai_jobs::{CreatedTask, JobsModule, Task, WaitOptions, poll_until_terminal};
use serde_json::Value;
use std::sync::Arc;

/// Registry name of the Seedream V4 plugin.
pub const NAME: &str = "seedream-v4";

/// The two Seedream V4 model routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedreamModel {
    /// Text-to-image.
    TextToImage,
    /// Image editing.
    Edit,
}

impl SeedreamModel {
    /// Returns the wire route key.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::TextToImage => "bytedance/seedream-v4-text-to-image",
            Self::Edit => "bytedance/seedream-v4-edit",
        }
    }

    /// Parses a wire route key.
    #[must_use]
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "bytedance/seedream-v4-text-to-image" => Some(Self::TextToImage),
            "bytedance/seedream-v4-edit" => Some(Self::Edit),
            _ => None,
        }
    }
}

/// Runtime API of the Seedream V4 plugin.
pub struct SeedreamApi {
    t2i: JobsModule<TextToImageOptions, ImageResult>,
    editor: JobsModule<EditOptions, ImageResult>,
}

impl SeedreamApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            t2i: JobsModule::new(Arc::clone(&transport), SeedreamModel::TextToImage.route()),
            editor: JobsModule::new(transport, SeedreamModel::Edit.route()),
        }
    }

    /// Submits a text-to-image task.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for rejected options, or any transport
    /// error.
    pub async fn text_to_image(
        &self,
        options: &TextToImageOptions,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.t2i.create_task(options, callback_url).await
    }

    /// Submits an edit task.
    pub async fn edit(
        &self,
        options: &EditOptions,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.editor.create_task(options, callback_url).await
    }

    /// Fetches a task snapshot.
    pub async fn get_task(&self, task_id: &str) -> Result<Task<ImageResult>, SdkError> {
        self.t2i.get_task(task_id).await
    }

    /// Validates an inbound callback and re-fetches the task.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for a missing task id or an unknown
    /// `data.model` discriminator.
    pub async fn verify_callback(&self, payload: &Value) -> Result<Task<ImageResult>, SdkError> {
        let discriminator = payload
            .get("data")
            .and_then(|data| data.get("model"))
            .and_then(Value::as_str);

        match discriminator.and_then(SeedreamModel::from_route) {
            Some(SeedreamModel::TextToImage) => self.t2i.verify_callback(payload).await,
            Some(SeedreamModel::Edit) => self.editor.verify_callback(payload).await,
            None => Err(SdkError::validation_field(
                "data.model",
                format!(
                    "unknown model discriminator {:?}",
                    discriminator.unwrap_or("<missing>")
                ),
            )),
        }
    }

    /// Polls a task until terminal. Image generation is quick; pass
    /// [`WaitOptions::image`] unless a looser bound is wanted.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        options: &WaitOptions,
    ) -> Result<ImageResult, SdkError> {
        poll_until_terminal(task_id, options, || self.get_task(task_id), |_| {}).await
    }
}

impl core::fmt::Debug for SeedreamApi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeedreamApi").finish()
    }
}
