//! Name-keyed storage of live plugin instances.

use crate::plugin::{DisposeFuture, Plugin, Version};
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;

/// Object-safe shadow of [`Plugin`] for heterogeneous storage.
trait ErasedPlugin: Send + Sync {
    fn version(&self) -> Version;
    fn on_dispose(&self) -> Option<DisposeFuture>;
}

impl<P: Plugin> ErasedPlugin for P {
    fn version(&self) -> Version {
        Plugin::version(self)
    }

    fn on_dispose(&self) -> Option<DisposeFuture> {
        Plugin::on_dispose(self)
    }
}

/// One registered plugin: the declaring unit plus its live API.
struct PluginEntry {
    plugin: Box<dyn ErasedPlugin>,
    api: Arc<dyn Any + Send + Sync>,
}

/// Map from plugin name to live instance, scoped to one client.
///
/// Entries keep registration order, so teardown and listings are
/// deterministic.
#[derive(Default)]
pub struct PluginRegistry {
    entries: IndexMap<String, PluginEntry>,
}

impl core::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns whether a plugin is registered under `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the API registered under `name`, when its type matches `T`.
    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.entries
            .get(name)
            .and_then(|entry| Arc::clone(&entry.api).downcast::<T>().ok())
    }

    /// Returns the registered version of `name`.
    #[must_use]
    pub fn version_of(&self, name: &str) -> Option<Version> {
        self.entries.get(name).map(|entry| entry.plugin.version())
    }

    /// Returns all registered names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert<P: Plugin>(&mut self, plugin: P, api: P::Api) {
        let name = plugin.name().to_string();
        self.entries.insert(
            name,
            PluginEntry {
                plugin: Box::new(plugin),
                api: Arc::new(api),
            },
        );
    }

    pub(crate) fn take_dispose_futures(&mut self) -> Vec<DisposeFuture> {
        self.entries
            .values()
            .filter_map(|entry| entry.plugin.on_dispose())
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
