//! Veo3 plugin.

use super::{NAME, Veo3Api};
use kieai_core::SdkError;
use kieai_plugin::{Plugin, PluginContext, Version};
use std::sync::Arc;

/// Plugin providing the Veo3 video generation API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Veo3Plugin;

impl Plugin for Veo3Plugin {
    type Api = Veo3Api;

    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    fn build(&self, ctx: &PluginContext<'_>) -> Result<Veo3Api, SdkError> {
        Ok(Veo3Api::new(Arc::clone(ctx.transport)))
    }
}
