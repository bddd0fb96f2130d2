//! Plugin composition for the Kie.ai client.
//!
//! Independently developed capability modules attach to one shared
//! [`KieClient`] without the client having compile-time knowledge of every
//! capability. Each capability ships a [`Plugin`]: a named, versioned unit
//! with optional dependencies, a synchronous init hook, a factory producing
//! its runtime API, and an optional deferred teardown.
//!
//! # Example
//!
//! ```ignore
//! use kieai_core::Config;
//! use kieai_plugin::KieClient;
//!
//! let mut client = KieClient::new(Config::new(std::env::var("KIE_API_KEY")?))?;
//! client.register(KlingPlugin::default())?;
//!
//! let kling = client.resolve::<KlingApi>("kling-v2-1")?;
//! let created = kling.standard_image_to_video(&options).await?;
//! ```

mod client;
mod plugin;
mod registry;

pub use client::KieClient;
pub use plugin::{Dependency, DisposeFuture, Plugin, PluginContext, Version};
pub use registry::PluginRegistry;
