//! Decoding resource snapshots from JSON text.
//!
//! Accepted shapes: one snapshot object, an array of snapshot objects, or a stream of either
//! (JSON Lines). A snapshot object looks like:
//!
//! ```json
//! {"type": "bigquery.googleapis.com/Dataset", "name": "//bigquery.googleapis.com/...", "resource": {...}}
//! ```
//!
//! `asset_type` is accepted in place of `type`. A missing `resource` is an empty document.

use rpe_domain::model::ResourceSnapshot;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// `index` counts top-level JSON values in the input.
    #[error("invalid JSON at value {index}: {source}")]
    InvalidJson {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// `index` counts snapshots after arrays are flattened.
    #[error("snapshot {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("snapshot {index} has no string `type` or `asset_type`")]
    MissingType { index: usize },
}

pub fn parse_snapshots(text: &str) -> Result<Vec<ResourceSnapshot>, SnapshotError> {
    let mut values = Vec::new();
    let stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    for (index, item) in stream.enumerate() {
        match item.map_err(|source| SnapshotError::InvalidJson { index, source })? {
            Value::Array(items) => values.extend(items),
            other => values.push(other),
        }
    }

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| snapshot_from_value(index, value))
        .collect()
}

pub fn snapshot_from_value(index: usize, value: Value) -> Result<ResourceSnapshot, SnapshotError> {
    let Value::Object(mut obj) = value else {
        return Err(SnapshotError::NotAnObject { index });
    };

    let resource_type = obj
        .get("type")
        .or_else(|| obj.get("asset_type"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SnapshotError::MissingType { index })?;
    let name = obj.get("name").and_then(Value::as_str).map(str::to_string);
    let document = obj
        .remove("resource")
        .unwrap_or_else(|| Value::Object(Map::new()));

    Ok(ResourceSnapshot {
        resource_type,
        name,
        document,
    })
}
