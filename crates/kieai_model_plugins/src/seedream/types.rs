//! Seedream V4 request and result shapes.

use crate::validate;
use kieai_core::SdkError;
use serde::{Deserialize, Serialize};

const MAX_PROMPT_LEN: usize = 5000;
const MAX_EDIT_IMAGES: usize = 10;

/// Output size presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ImageSize {
    /// 512×512.
    #[serde(rename = "square")]
    Square,
    /// 1024×1024.
    #[default]
    #[serde(rename = "square_hd")]
    SquareHd,
    /// 768×1024.
    #[serde(rename = "portrait_4_3")]
    Portrait43,
    /// 576×1024.
    #[serde(rename = "portrait_16_9")]
    Portrait169,
    /// 1024×768.
    #[serde(rename = "landscape_4_3")]
    Landscape43,
    /// 1024×576.
    #[serde(rename = "landscape_16_9")]
    Landscape169,
}

/// Options for text-to-image generation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextToImageOptions {
    /// Text prompt. At most 5000 characters.
    pub prompt: String,
    /// Output size preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    /// Seed controlling generation stochasticity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl TextToImageOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate::require_non_empty("prompt", &self.prompt)?;
        validate::max_len("prompt", &self.prompt, MAX_PROMPT_LEN)
    }
}

/// Options for image editing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditOptions {
    /// Text prompt. At most 5000 characters.
    pub prompt: String,
    /// Input image URLs (jpeg/png/webp, at most 10 MB each, at most 10).
    pub image_urls: Vec<String>,
    /// Output size preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    /// Seed controlling generation stochasticity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl EditOptions {
    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        validate::require_non_empty("prompt", &self.prompt)?;
        validate::max_len("prompt", &self.prompt, MAX_PROMPT_LEN)?;
        if self.image_urls.is_empty() {
            return Err(SdkError::validation_field(
                "image_urls",
                "image_urls is required for editing",
            ));
        }
        if self.image_urls.len() > MAX_EDIT_IMAGES {
            return Err(SdkError::validation_field(
                "image_urls",
                format!("at most {MAX_EDIT_IMAGES} input images are supported"),
            ));
        }
        Ok(())
    }
}

/// Result payload of a finished image task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    /// URLs of the generated images.
    pub result_urls: Vec<String>,
}
