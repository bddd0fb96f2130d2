//! Kling V2.1 request and result shapes.

use crate::validate;
use kieai_core::SdkError;
use serde::{Deserialize, Serialize};

const MAX_PROMPT_LEN: usize = 5000;
const MAX_NEGATIVE_PROMPT_LEN: usize = 500;

/// Video duration in seconds (string-encoded on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum VideoDuration {
    /// Five seconds.
    #[default]
    #[serde(rename = "5")]
    Five,
    /// Ten seconds.
    #[serde(rename = "10")]
    Ten,
}

/// Aspect ratio of the generated frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    /// 16:9.
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    /// 9:16.
    #[serde(rename = "9:16")]
    Vertical,
    /// 1:1.
    #[serde(rename = "1:1")]
    Square,
}

/// Options for the Master text-to-video model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasterTextToVideoOptions {
    /// Text prompt describing the video. At most 5000 characters.
    pub prompt: String,
    /// Duration of the generated video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<VideoDuration>,
    /// Aspect ratio of the generated frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    /// Elements to avoid. At most 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Prompt adherence, 0 to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
}

impl MasterTextToVideoOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate_common(&self.prompt, self.negative_prompt.as_deref(), self.cfg_scale)
    }
}

/// Options for the Master image-to-video model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasterImageToVideoOptions {
    /// Text prompt describing the video. At most 5000 characters.
    pub prompt: String,
    /// URL of the first-frame image (jpeg/png/webp, at most 10 MB).
    pub image_url: String,
    /// Duration of the generated video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<VideoDuration>,
    /// Elements to avoid. At most 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Prompt adherence, 0 to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
}

impl MasterImageToVideoOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate::require_non_empty("image_url", &self.image_url)?;
        validate_common(&self.prompt, self.negative_prompt.as_deref(), self.cfg_scale)
    }
}

/// Options for the Standard image-to-video model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardImageToVideoOptions {
    /// Text prompt describing the video. At most 5000 characters.
    pub prompt: String,
    /// URL of the first-frame image (jpeg/png/webp, at most 10 MB).
    pub image_url: String,
    /// Duration of the generated video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<VideoDuration>,
    /// Elements to avoid. At most 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Prompt adherence, 0 to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
}

impl StandardImageToVideoOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate::require_non_empty("image_url", &self.image_url)?;
        validate_common(&self.prompt, self.negative_prompt.as_deref(), self.cfg_scale)
    }
}

/// Options for the Pro image-to-video model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProImageToVideoOptions {
    /// Text prompt describing the video. At most 5000 characters.
    pub prompt: String,
    /// URL of the first-frame image (jpeg/png/webp, at most 10 MB).
    pub image_url: String,
    /// URL of the last-frame image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_image_url: Option<String>,
    /// Duration of the generated video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<VideoDuration>,
    /// Elements to avoid. At most 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Prompt adherence, 0 to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
}

impl ProImageToVideoOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate::require_non_empty("image_url", &self.image_url)?;
        validate_common(&self.prompt, self.negative_prompt.as_deref(), self.cfg_scale)
    }
}

fn validate_common(
    prompt: &str,
    negative_prompt: Option<&str>,
    cfg_scale: Option<f64>,
) -> Result<(), SdkError> {
    validate::require_non_empty("prompt", prompt)?;
    validate::max_len("prompt", prompt, MAX_PROMPT_LEN)?;
    if let Some(negative) = negative_prompt {
        validate::max_len("negative_prompt", negative, MAX_NEGATIVE_PROMPT_LEN)?;
    }
    if let Some(cfg) = cfg_scale {
        validate::in_range("cfg_scale", cfg, 0.0, 1.0)?;
    }
    Ok(())
}

/// Result payload of a finished video task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    /// URLs of the generated videos.
    pub result_urls: Vec<String>,
}
