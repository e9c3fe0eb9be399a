//! Serialization gateway: values to and from `.msgpack` / `.json` files.

pub mod codec;
pub mod format;
pub mod gateway;

use std::path::Path;

pub use codec::{Codec, JsonCodec, MsgPackCodec};
pub use format::Format;
pub use gateway::Gateway;
pub use serde_json::Value;

use crate::error::UnzipResult;

/// Number of top-level records in `value`.
///
/// Arrays and objects count their elements, `null` counts as zero, any other
/// scalar as one.
pub fn record_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        _ => 1,
    }
}

/// Reads `path` with a default [`Gateway`] (component `io`).
pub fn deserialize<P: AsRef<Path>>(path: P) -> UnzipResult<Value> {
    Gateway::default().read(path)
}

/// Writes `value` to `path` with a default [`Gateway`].
pub fn serialize<P: AsRef<Path>>(
    path: P,
    value: &Value,
) -> UnzipResult<()> {
    Gateway::default().write(path, value)
}
