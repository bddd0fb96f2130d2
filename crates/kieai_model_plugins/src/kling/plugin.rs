//! Kling V2.1 plugin.

use super::{CallbackFallback, KlingApi, NAME};
use kieai_core::SdkError;
use kieai_plugin::{Plugin, PluginContext, Version};
use std::sync::Arc;

/// Plugin providing the Kling V2.1 video generation API.
///
/// ```ignore
/// client.register(KlingPlugin::default())?;
/// let kling = client.resolve::<KlingApi>(kling::NAME)?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct KlingPlugin {
    fallback: CallbackFallback,
}

impl KlingPlugin {
    /// Overrides the policy for callbacks with an unknown model
    /// discriminator. The default rejects them.
    #[must_use]
    pub fn with_callback_fallback(mut self, fallback: CallbackFallback) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Plugin for KlingPlugin {
    type Api = KlingApi;

    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    fn on_init(&self, _ctx: &PluginContext<'_>) -> Result<(), SdkError> {
        tracing::debug!("kling v2.1 plugin initialized");
        Ok(())
    }

    fn build(&self, ctx: &PluginContext<'_>) -> Result<KlingApi, SdkError> {
        Ok(KlingApi::new(Arc::clone(ctx.transport), self.fallback))
    }
}
