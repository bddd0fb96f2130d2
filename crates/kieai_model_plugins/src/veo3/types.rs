//! Veo3 request and result shapes.

use crate::validate;
use kieai_core::SdkError;
use kieai_jobs::{IntoOutcome, TaskFailure, TaskOutcome};
use serde::{Deserialize, Serialize};

/// Veo3's own lifecycle state strings.
///
/// A different spelling of the same three-way story the jobs routes tell;
/// [`Veo3Task::into_outcome`] normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Veo3State {
    /// Accepted, not yet queued.
    Wait,
    /// Queued for a worker.
    Queueing,
    /// Generation in progress.
    Generating,
    /// Terminal success.
    Success,
    /// Terminal failure.
    Fail,
}

/// Aspect ratios supported by Veo3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Veo3AspectRatio {
    /// 16:9 — the only ratio eligible for the 1080p rendition.
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    /// 9:16.
    #[serde(rename = "9:16")]
    Vertical,
    /// 1:1.
    #[serde(rename = "1:1")]
    Square,
    /// 4:3.
    #[serde(rename = "4:3")]
    Classic,
    /// 3:4.
    #[serde(rename = "3:4")]
    Portrait,
}

/// Output quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Veo3Quality {
    /// 720p, compatible with every duration.
    #[default]
    #[serde(rename = "720p")]
    Hd,
    /// 1080p, 5-second videos only.
    #[serde(rename = "1080p")]
    FullHd,
}

/// Options for the unified generate endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Veo3GenerateOptions {
    /// Text prompt describing the video.
    pub prompt: String,
    /// Input image URLs (image-to-video only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    /// Duration in seconds: 5 or 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u8>,
    /// Output quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Veo3Quality>,
    /// Aspect ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<Veo3AspectRatio>,
    /// Watermark text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_mark: Option<String>,
    /// Callback URL for terminal-state notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_back_url: Option<String>,
}

impl Veo3GenerateOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate::require_non_empty("prompt", &self.prompt)?;
        if let Some(duration) = self.duration
            && !matches!(duration, 5 | 10)
        {
            return Err(SdkError::validation_field(
                "duration",
                "duration must be 5 or 10 seconds",
            ));
        }
        if self.quality == Some(Veo3Quality::FullHd) && self.duration == Some(10) {
            return Err(SdkError::validation_field(
                "quality",
                "1080p quality only supports 5 second videos",
            ));
        }
        Ok(())
    }
}

/// Video delivered on success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Veo3VideoInfo {
    /// Video identifier.
    #[serde(default)]
    pub video_id: Option<String>,
    /// URL of the generated video.
    pub video_url: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Task snapshot from the record-info endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Veo3Task {
    /// Server-assigned task identifier.
    pub task_id: String,
    /// Current lifecycle state.
    pub state: Veo3State,
    /// Generation timestamp, as formatted by the server.
    #[serde(default)]
    pub generate_time: Option<String>,
    /// Video info, present on success.
    #[serde(default)]
    pub video_info: Option<Veo3VideoInfo>,
    /// Whether the result has expired (`1`) or not (`0`).
    #[serde(default)]
    pub expire_flag: Option<u8>,
    /// Fail message, present on failure.
    #[serde(default)]
    pub fail_msg: Option<String>,
}

impl IntoOutcome for Veo3Task {
    type Output = Veo3VideoInfo;

    fn into_outcome(self) -> Result<TaskOutcome<Veo3VideoInfo>, SdkError> {
        match self.state {
            Veo3State::Success => match self.video_info {
                Some(info) => Ok(TaskOutcome::Succeeded(info)),
                None => Err(SdkError::validation(format!(
                    "task '{}' succeeded but carries no video info",
                    self.task_id
                ))),
            },
            Veo3State::Fail => Ok(TaskOutcome::Failed(TaskFailure {
                code: None,
                message: self.fail_msg,
            })),
            Veo3State::Wait | Veo3State::Queueing | Veo3State::Generating => {
                Ok(TaskOutcome::Pending)
            }
        }
    }
}

/// The 1080p rendition of a finished 16:9 task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Veo3Video1080p {
    /// URL of the 1080p video, once the follow-up render completes.
    #[serde(default)]
    pub result_url: Option<String>,
}
