//! Midjourney plugin.

use super::{MidjourneyApi, NAME};
use kieai_core::SdkError;
use kieai_plugin::{Plugin, PluginContext, Version};
use std::sync::Arc;

/// Plugin providing the Midjourney image and video API.
#[derive(Debug, Default, Clone, Copy)]
pub struct MidjourneyPlugin;

impl Plugin for MidjourneyPlugin {
    type Api = MidjourneyApi;

    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    fn build(&self, ctx: &PluginContext<'_>) -> Result<MidjourneyApi, SdkError> {
        Ok(MidjourneyApi::new(Arc::clone(ctx.transport)))
    }
}
