//! The composition root tying configuration, transport, and plugins together.

use crate::plugin::{Plugin, PluginContext};
use crate::registry::PluginRegistry;
use futures::future::join_all;
use kieai_core::{Config, HttpClient, SdkError, Transport};
use std::sync::Arc;

/// The Kie.ai client: a frozen configuration, a shared transport, and the
/// registry that composes capability plugins onto them.
///
/// Capabilities are registered at startup and resolved by name afterwards.
/// Registration takes `&mut self`, so registrations are serialized by the
/// borrow checker; share the client (behind an `Arc`, for instance) only
/// once registration is done. The configuration and transport are
/// read-only shared state, safe for any number of concurrent requests.
pub struct KieClient {
    config: Config,
    transport: Arc<dyn Transport>,
    registry: PluginRegistry,
}

impl KieClient {
    /// Creates a client, validating the configuration and building the
    /// reqwest transport over it.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ConfigInvalid`] when the configuration fails
    /// validation.
    pub fn new(config: Config) -> Result<Self, SdkError> {
        let config = config.normalize()?;
        let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(config.clone()));
        Ok(Self {
            config,
            transport,
            registry: PluginRegistry::new(),
        })
    }

    /// Creates a client over a caller-supplied transport.
    ///
    /// The configuration is validated the same way; the transport is used
    /// as-is.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ConfigInvalid`] when the configuration fails
    /// validation.
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, SdkError> {
        let config = config.normalize()?;
        Ok(Self {
            config,
            transport,
            registry: PluginRegistry::new(),
        })
    }

    /// Returns the frozen configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns the plugin registry.
    #[must_use]
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Registers a capability plugin.
    ///
    /// The plugin's required dependencies must already be registered;
    /// optional dependencies are skipped silently when absent. A
    /// dependency's `version` requirement is accepted but not checked
    /// (reserved). Errors from `on_init` or `build` propagate unchanged
    /// and leave the registry untouched — no partial registration survives
    /// a failed attempt.
    ///
    /// Returns `&mut Self`, so registrations chain:
    /// `client.register(a)?.register(b)?;`
    ///
    /// # Errors
    ///
    /// [`SdkError::PluginDuplicate`] when the name is taken,
    /// [`SdkError::DependencyMissing`] naming the dependent and the missing
    /// dependency, or whatever `on_init`/`build` returned.
    pub fn register<P: Plugin>(&mut self, plugin: P) -> Result<&mut Self, SdkError> {
        let name = plugin.name().to_string();
        if self.registry.has(&name) {
            return Err(SdkError::PluginDuplicate { name });
        }

        for dependency in plugin.dependencies() {
            if self.registry.has(&dependency.name) {
                // `dependency.version` is reserved for a future
                // compatibility check.
                continue;
            }
            if dependency.optional {
                tracing::debug!(
                    plugin = %name,
                    dependency = %dependency.name,
                    "optional dependency absent, skipping"
                );
                continue;
            }
            return Err(SdkError::DependencyMissing {
                plugin: name,
                dependency: dependency.name,
            });
        }

        let api = {
            let ctx = PluginContext {
                config: &self.config,
                transport: &self.transport,
                registry: &self.registry,
            };
            plugin.on_init(&ctx)?;
            plugin.build(&ctx)?
        };

        tracing::debug!(plugin = %name, version = %plugin.version(), "plugin registered");
        self.registry.insert(plugin, api);
        Ok(self)
    }

    /// Resolves the API registered under `name`.
    ///
    /// # Errors
    ///
    /// [`SdkError::PluginNotRegistered`] when nothing is registered under
    /// `name`, or when the registered API is not a `T`.
    pub fn resolve<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, SdkError> {
        if let Some(api) = self.registry.get::<T>(name) {
            return Ok(api);
        }
        if self.registry.has(name) {
            return Err(SdkError::PluginNotRegistered {
                name: name.to_string(),
                hint: format!("'{name}' is registered, but under a different API type"),
            });
        }
        Err(SdkError::plugin_not_registered(name))
    }

    /// Returns whether a plugin is registered under `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.registry.has(name)
    }

    /// Returns all registered plugin names, in registration order.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Tears the client down.
    ///
    /// Collects every plugin's optional teardown future, awaits them
    /// together, then clears the registry. Plugins without a teardown hook
    /// are skipped — teardown is opt-in. Names become available for
    /// re-registration afterwards.
    pub async fn dispose(&mut self) {
        let pending = self.registry.take_dispose_futures();
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "awaiting plugin teardowns");
            join_all(pending).await;
        }
        self.registry.clear();
    }
}

impl core::fmt::Debug for KieClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KieClient")
            .field("config", &self.config)
            .field("plugins", &self.registry.names())
            .finish()
    }
}
