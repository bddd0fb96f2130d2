//! Model capability plugins for the Kie.ai client.
//!
//! Each submodule packages one model family as a
//! [`Plugin`](kieai_plugin::Plugin). Register the plugin on a
//! [`KieClient`](kieai_plugin::KieClient), then resolve its API under the
//! module's `NAME`:
//!
//! - [`kling`] — Kling V2.1 video generation (four variants sharing one
//!   callback endpoint).
//! - [`seedream`] — Seedream V4 image generation and editing.
//! - [`veo3`] — Veo3 video generation over its own route family.
//! - [`midjourney`] — Midjourney image and video tasks over the legacy
//!   numeric status encoding.
//!
//! ```ignore
//! use kieai_model_plugins::kling::{self, KlingApi, KlingPlugin};
//!
//! client.register(KlingPlugin::default())?;
//! let kling = client.resolve::<KlingApi>(kling::NAME)?;
//! ```

pub mod kling;
pub mod midjourney;
pub mod seedream;
mod validate;
pub mod veo3;
