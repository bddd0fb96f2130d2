//! The plugin contract.

use crate::registry::PluginRegistry;
use core::future::Future;
use core::pin::Pin;
use kieai_core::{Config, SdkError, Transport};
use std::sync::Arc;

/// Plugin version.
///
/// Stored with each registration. Dependency specs may carry a required
/// version; comparing it against the registered version is a reserved
/// extension point that the current registration path does not perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u16,
    minor: u16,
    patch: u16,
}

impl Version {
    /// Creates a version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl core::fmt::Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A dependency on another plugin, by registry name.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Name of the required plugin.
    pub name: String,
    /// Required version. Accepted but not checked (reserved).
    pub version: Option<Version>,
    /// Skip silently when the dependency is absent.
    pub optional: bool,
}

impl Dependency {
    /// A required dependency: registration fails when it is absent.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            optional: false,
        }
    }

    /// An optional dependency, skipped silently when absent.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            optional: true,
        }
    }
}

/// Shared context handed to plugin hooks and factories.
///
/// Borrowed from the client for the duration of one registration. The
/// registry reference sees every previously registered plugin, which is
/// how factories look up the APIs of their dependencies.
pub struct PluginContext<'a> {
    /// The client's frozen configuration.
    pub config: &'a Config,
    /// The shared transport.
    pub transport: &'a Arc<dyn Transport>,
    /// The registry as of this registration.
    pub registry: &'a PluginRegistry,
}

/// Deferred teardown work returned by [`Plugin::on_dispose`].
pub type DisposeFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A named capability unit composed onto the shared client.
///
/// # Lifecycle
///
/// declared → dependency-checked → initialized → built → registered →
/// (optionally) disposed. Registration is atomic: when [`on_init`]
/// (`Self::on_init`) or [`build`](Self::build) fails, nothing is stored
/// under the plugin's name.
///
/// Initialization is synchronous by signature. The registration algorithm
/// assumes init has completed before dependency-satisfied lookups proceed,
/// so asynchronous setup belongs in the API the factory produces, not in
/// the hook.
pub trait Plugin: Send + Sync + 'static {
    /// The runtime API produced by [`build`](Self::build).
    type Api: Send + Sync + 'static;

    /// Unique registry name.
    fn name(&self) -> &str;

    /// Plugin version.
    fn version(&self) -> Version;

    /// Plugins that must be registered before this one.
    ///
    /// The registry does not sort on the caller's behalf: a dependency must
    /// already be registered when this plugin is, so callers register in
    /// dependency order.
    fn dependencies(&self) -> Vec<Dependency> {
        Vec::new()
    }

    /// Initialization hook, run before the factory.
    ///
    /// # Errors
    ///
    /// Any error aborts the registration.
    fn on_init(&self, _ctx: &PluginContext<'_>) -> Result<(), SdkError> {
        Ok(())
    }

    /// Produces the runtime API bound to the shared context.
    ///
    /// # Errors
    ///
    /// Any error aborts the registration.
    fn build(&self, ctx: &PluginContext<'_>) -> Result<Self::Api, SdkError>;

    /// Optional teardown. All deferred futures are awaited together on
    /// [`KieClient::dispose`](crate::KieClient::dispose); returning `None`
    /// opts out.
    fn on_dispose(&self) -> Option<DisposeFuture> {
        None
    }
}
