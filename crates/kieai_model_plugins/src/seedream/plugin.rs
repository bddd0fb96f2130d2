//! Seedream V4 plugin.

use super::{NAME, SeedreamApi};
use kieai_core::SdkError;
use kieai_plugin::{Plugin, PluginContext, Version};
use std::sync::Arc;

/// Plugin providing the Seedream V4 image API.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedreamPlugin;

impl Plugin for SeedreamPlugin {
    type Api = SeedreamApi;

    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    fn build(&self, ctx: &PluginContext<'_>) -> Result<SeedreamApi, SdkError> {
        Ok(SeedreamApi::new(Arc::clone(ctx.transport)))
    }
}
