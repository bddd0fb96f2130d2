//! Core building blocks for the Kie.ai client.
//!
//! Provides the pieces every other crate in the workspace builds on:
//!
//! - [`Config`] — validated, immutable client configuration.
//! - [`SdkError`] — the single error currency; lower layers translate
//!   transport- and parse-level failures into it before they cross a crate
//!   boundary.
//! - [`Transport`] — the HTTP boundary consumed by capability modules.
//! - [`HttpClient`] — the reqwest-backed [`Transport`] implementation.

pub mod config;
pub mod error;
mod http;
mod transport;

pub use config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RetryPolicy};
pub use error::{ErrorKind, SdkError};
pub use http::HttpClient;
pub use transport::Transport;
