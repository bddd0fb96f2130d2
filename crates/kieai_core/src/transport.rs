//! The HTTP transport boundary.

use crate::error::SdkError;
use async_trait::async_trait;
use serde_json::Value;

/// Transport consumed by every capability module.
///
/// Every endpoint of the service answers with a `{ code, msg, data }`
/// envelope. Implementations resolve that envelope and return the `data`
/// payload; a non-success HTTP status or envelope code must surface as a
/// typed [`SdkError`], never as a payload.
///
/// Implementations are shared behind `Arc<dyn Transport>`, so they must be
/// safe for any number of concurrent, independent requests.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Performs a GET request against a service path.
    ///
    /// `path` is either an absolute URL or a path resolved against the
    /// configured base URL. `query` entries are appended as query
    /// parameters.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, SdkError>;

    /// Performs a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Value, SdkError>;
}
