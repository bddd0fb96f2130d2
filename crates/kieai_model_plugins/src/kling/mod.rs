//! Kling V2.1 video generation.
//!
//! Four model variants share the generic jobs endpoints and one callback
//! endpoint. Inbound callbacks carry a model discriminator in the payload
//! envelope; dispatch matches it against the closed [`KlingModel`]
//! enumeration, and unknown discriminators are handled per the configured
//! [`CallbackFallback`].

mod plugin;
mod types;

pub use plugin::KlingPlugin;
pub use types::{
    AspectRatio, MasterImageToVideoOptions, MasterTextToVideoOptions, ProImageToVideoOptions,
    StandardImageToVideoOptions, VideoDuration, VideoResult,
};

use kieai_core::{SdkError, Transport};
use kieai_jobs::{CreatedTask, JobsModule, Task, WaitOptions, poll_until_terminal};
use serde_json::Value;
use std::sync::Arc;

/// Registry name of the Kling V2.1 plugin.
pub const NAME: &str = "kling-v2-1";

/// The four Kling V2.1 model routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KlingModel {
    /// Master text-to-video.
    MasterTextToVideo,
    /// Master image-to-video.
    MasterImageToVideo,
    /// Standard image-to-video.
    Standard,
    /// Pro image-to-video.
    Pro,
}

impl KlingModel {
    /// Returns the wire route key.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::MasterTextToVideo => "kling/v2-1-master-text-to-video",
            Self::MasterImageToVideo => "kling/v2-1-master-image-to-video",
            Self::Standard => "kling/v2-1-standard",
            Self::Pro => "kling/v2-1-pro",
        }
    }

    /// Parses a wire route key.
    #[must_use]
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "kling/v2-1-master-text-to-video" => Some(Self::MasterTextToVideo),
            "kling/v2-1-master-image-to-video" => Some(Self::MasterImageToVideo),
            "kling/v2-1-standard" => Some(Self::Standard),
            "kling/v2-1-pro" => Some(Self::Pro),
            _ => None,
        }
    }
}

/// Policy for callback payloads whose model discriminator is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallbackFallback {
    /// Reject the payload with a validation error (default).
    #[default]
    Strict,
    /// Route the payload to the given variant.
    Variant(KlingModel),
}

/// Runtime API of the Kling V2.1 plugin.
pub struct KlingApi {
    master_t2v: JobsModule<MasterTextToVideoOptions, VideoResult>,
    master_i2v: JobsModule<MasterImageToVideoOptions, VideoResult>,
    standard: JobsModule<StandardImageToVideoOptions, VideoResult>,
    pro: JobsModule<ProImageToVideoOptions, VideoResult>,
    fallback: CallbackFallback,
}

impl KlingApi {
    pub(crate) fn new(transport: Arc<dyn Transport>, fallback: CallbackFallback) -> Self {
        Self {
            master_t2v: JobsModule::new(
                Arc::clone(&transport),
                KlingModel::MasterTextToVideo.route(),
            ),
            master_i2v: JobsModule::new(
                Arc::clone(&transport),
                KlingModel::MasterImageToVideo.route(),
            ),
            standard: JobsModule::new(Arc::clone(&transport), KlingModel::Standard.route()),
            pro: JobsModule::new(transport, KlingModel::Pro.route()),
            fallback,
        }
    }

    /// Submits a Master text-to-video task.
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for rejected options, or any transport
    /// error.
    pub async fn master_text_to_video(
        &self,
        options: &MasterTextToVideoOptions,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.master_t2v.create_task(options, callback_url).await
    }

    /// Submits a Master image-to-video task.
    pub async fn master_image_to_video(
        &self,
        options: &MasterImageToVideoOptions,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.master_i2v.create_task(options, callback_url).await
    }

    /// Submits a Standard image-to-video task.
    pub async fn standard_image_to_video(
        &self,
        options: &StandardImageToVideoOptions,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.standard.create_task(options, callback_url).await
    }

    /// Submits a Pro image-to-video task.
    pub async fn pro_image_to_video(
        &self,
        options: &ProImageToVideoOptions,
        callback_url: Option<&str>,
    ) -> Result<CreatedTask, SdkError> {
        options.validate()?;
        self.pro.create_task(options, callback_url).await
    }

    /// Fetches a task snapshot.
    ///
    /// The four variants share the query endpoint, so any handle serves.
    pub async fn get_task(&self, task_id: &str) -> Result<Task<VideoResult>, SdkError> {
        self.master_t2v.get_task(task_id).await
    }

    /// Validates an inbound callback and re-fetches the task.
    ///
    /// The payload's `data.model` discriminator picks the variant; a
    /// discriminator outside [`KlingModel`] follows the configured
    /// [`CallbackFallback`].
    ///
    /// # Errors
    ///
    /// [`SdkError::Validation`] for a missing task id or, under
    /// [`CallbackFallback::Strict`], an unknown discriminator.
    pub async fn verify_callback(&self, payload: &Value) -> Result<Task<VideoResult>, SdkError> {
        let discriminator = payload
            .get("data")
            .and_then(|data| data.get("model"))
            .and_then(Value::as_str);

        let model = match discriminator.and_then(KlingModel::from_route) {
            Some(model) => model,
            None => match self.fallback {
                CallbackFallback::Variant(model) => {
                    tracing::debug!(
                        discriminator,
                        fallback = model.route(),
                        "unknown callback model, routing to fallback variant"
                    );
                    model
                }
                CallbackFallback::Strict => {
                    return Err(SdkError::validation_field(
                        "data.model",
                        format!(
                            "unknown model discriminator {:?}",
                            discriminator.unwrap_or("<missing>")
                        ),
                    ));
                }
            },
        };

        match model {
            KlingModel::MasterTextToVideo => self.master_t2v.verify_callback(payload).await,
            KlingModel::MasterImageToVideo => self.master_i2v.verify_callback(payload).await,
            KlingModel::Standard => self.standard.verify_callback(payload).await,
            KlingModel::Pro => self.pro.verify_callback(payload).await,
        }
    }

    /// Polls a task until terminal. Video generation is slow; pass
    /// [`WaitOptions::video`] unless a tighter bound is wanted.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        options: &WaitOptions,
    ) -> Result<VideoResult, SdkError> {
        poll_until_terminal(task_id, options, || self.get_task(task_id), |_| {}).await
    }
}

impl core::fmt::Debug for KlingApi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KlingApi")
            .field("fallback", &self.fallback)
            .finish()
    }
}
