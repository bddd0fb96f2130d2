//! Midjourney request and result shapes.

use kieai_core::SdkError;
use kieai_jobs::{GenerationFlag, IntoOutcome, TaskFailure, TaskOutcome, decode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Task types of the generate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MidjourneyTaskType {
    /// Text-to-image.
    #[serde(rename = "mj_txt2img")]
    TextToImage,
    /// Image-to-image.
    #[serde(rename = "mj_img2img")]
    ImageToImage,
    /// Style reference.
    #[serde(rename = "mj_style_reference")]
    StyleReference,
    /// Omni reference.
    #[serde(rename = "mj_omni_reference")]
    OmniReference,
    /// Image-to-video.
    #[serde(rename = "mj_video")]
    Video,
    /// Image-to-video in HD.
    #[serde(rename = "mj_video_hd")]
    VideoHd,
    /// Manual video extension.
    #[serde(rename = "mj_video_extend_manual")]
    VideoExtendManual,
    /// Automatic video extension.
    #[serde(rename = "mj_video_extend_auto")]
    VideoExtendAuto,
}

/// Generation speed tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MidjourneySpeed {
    /// Slow tier.
    Relaxed,
    /// Standard tier.
    Fast,
    /// Premium tier.
    Turbo,
}

/// Camera motion strength for video tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MidjourneyMotion {
    /// Strong motion.
    #[default]
    High,
    /// Subtle motion.
    Low,
}

/// Optional tuning shared by the generate operations.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MidjourneyGenerateOptions {
    /// Generation speed tier. Ignored by the video and omni task types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<MidjourneySpeed>,
    /// Output aspect ratio, e.g. `"1:1"` or `"16:9"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// Model version tag, e.g. `"7"` or `"niji6"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Result variety, in steps of 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<u32>,
    /// Stylization strength, 0 to 1000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylization: Option<u32>,
    /// Weirdness, 0 to 3000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weirdness: Option<u32>,
    /// Watermark identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
    /// Translate non-English prompts automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_translation: Option<bool>,
    /// Callback URL for terminal-state notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_back_url: Option<String>,
}

/// One generated asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidjourneyResultUrl {
    /// URL of the asset.
    pub result_url: String,
}

/// Result payload of a finished task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidjourneyResult {
    /// The generated assets (four for a grid task).
    pub result_urls: Vec<MidjourneyResultUrl>,
}

/// Task snapshot from the task-details endpoint.
///
/// Midjourney predates the string state machine: `successFlag` carries the
/// numeric encoding, `resultInfoJson` arrives already decoded, and the
/// timestamps are formatted strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidjourneyTask {
    /// Server-assigned task identifier.
    pub task_id: String,
    /// Task type submitted.
    #[serde(default)]
    pub task_type: Option<MidjourneyTaskType>,
    /// JSON-encoded request parameters.
    #[serde(default)]
    pub param_json: Option<String>,
    /// Numeric status flag.
    pub success_flag: GenerationFlag,
    /// Result payload, present on success.
    #[serde(default)]
    pub result_info_json: Option<MidjourneyResult>,
    /// Error code, present on failure.
    #[serde(default)]
    pub error_code: Option<i64>,
    /// Error message, present on failure.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Completion timestamp, as formatted by the server.
    #[serde(default)]
    pub complete_time: Option<String>,
    /// Creation timestamp, as formatted by the server.
    #[serde(default)]
    pub create_time: Option<String>,
}

impl MidjourneyTask {
    /// Decodes the request parameters, degrading to an empty map per the
    /// lenient-decode contract.
    #[must_use]
    pub fn param(&self) -> Map<String, Value> {
        self.param_json
            .as_deref()
            .map(decode::object_or_empty)
            .unwrap_or_default()
    }
}

impl IntoOutcome for MidjourneyTask {
    type Output = MidjourneyResult;

    fn into_outcome(self) -> Result<TaskOutcome<MidjourneyResult>, SdkError> {
        match self.success_flag {
            GenerationFlag::Generating => Ok(TaskOutcome::Pending),
            GenerationFlag::Success => match self.result_info_json {
                Some(result) => Ok(TaskOutcome::Succeeded(result)),
                None => Err(SdkError::validation(format!(
                    "task '{}' succeeded but carries no result info",
                    self.task_id
                ))),
            },
            flag => Ok(TaskOutcome::Failed(TaskFailure {
                // Prefer the server's error code; fall back to the status
                // flag so the two failure modes stay distinguishable.
                code: Some(
                    self.error_code
                        .map_or_else(|| flag.code().to_string(), |code| code.to_string()),
                ),
                message: self.error_message,
            })),
        }
    }
}
