//! Lenient decoding of server-encoded task fields.
//!
//! The server stores a task's `param` and `resultJson` as opaque
//! JSON-encoded strings, and those strings occasionally arrive malformed.
//! A partial snapshot is more useful to a caller than an error on a
//! transient server-side encoding quirk, so both decoders degrade instead
//! of failing: `param` to an empty map, `resultJson` to `None`. These two
//! functions are the only place in the workspace where a parse failure is
//! swallowed.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decodes a JSON-object string, degrading to an empty map on failure.
///
/// Well-formed JSON that is not an object (an array or a scalar) degrades
/// too; the contract promises a mapping.
#[must_use]
pub fn object_or_empty(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Decodes an optional JSON string into `T`, degrading to `None` on
/// absence or any decode failure.
#[must_use]
pub fn value_or_none<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|raw| serde_json::from_str(raw).ok())
}
