//! Typed async Rust client for the Kie.ai generative-media API.
//!
//! The client is a plugin orchestrator: a validated [`Config`] and a shared
//! HTTP transport, onto which model capabilities (Kling, Seedream, Veo3,
//! Midjourney) are composed as named plugins. Every capability speaks the
//! same asynchronous job protocol — submit a task, poll or wait for its
//! terminal state, and treat webhook callbacks as a signal to re-fetch
//! authoritative state.
//!
//! # Example
//!
//! ```ignore
//! use kieai::models::kling::{self, KlingApi, KlingPlugin, MasterTextToVideoOptions};
//! use kieai::{Config, KieClient, WaitOptions};
//!
//! let mut client = KieClient::new(Config::new(std::env::var("KIE_API_KEY")?))?;
//! client.register(KlingPlugin::default())?;
//!
//! let kling = client.resolve::<KlingApi>(kling::NAME)?;
//! let created = kling
//!     .master_text_to_video(
//!         &MasterTextToVideoOptions {
//!             prompt: "a cat surfing a wave".into(),
//!             ..Default::default()
//!         },
//!         None,
//!     )
//!     .await?;
//! let video = kling
//!     .wait_for_completion(&created.task_id, &WaitOptions::video())
//!     .await?;
//! ```

pub use kieai_core::{
    Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ErrorKind, HttpClient, RetryPolicy, SdkError,
    Transport,
};
pub use kieai_jobs::{
    CreatedTask, GenerationFlag, IntoOutcome, JobsModule, Task, TaskFailure, TaskOutcome,
    TaskRecord, TaskState, WaitOptions, poll_until_terminal,
};
pub use kieai_plugin::{
    Dependency, DisposeFuture, KieClient, Plugin, PluginContext, PluginRegistry, Version,
};

/// The bundled model capability plugins.
pub mod models {
    pub use kieai_model_plugins::{kling, midjourney, seedream, veo3};
}

/// Re-export of the common types for easy access.
pub mod prelude {
    pub use kieai_core::{Config, ErrorKind, SdkError};
    pub use kieai_jobs::{Task, TaskOutcome, TaskState, WaitOptions};
    pub use kieai_plugin::{Dependency, KieClient, Plugin, PluginContext, Version};
}
