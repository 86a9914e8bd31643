use crate::model::ResourceSnapshot;
use crate::policy::{EffectiveConfig, ExclusionConfig};
use rpe_types::ids;
use serde_json::{Value, json};

pub fn dataset(name: &str, document: Value) -> ResourceSnapshot {
    ResourceSnapshot::new(ids::RESOURCE_BIGQUERY_DATASET, document).with_name(name)
}

/// A dataset granting READER to `allAuthenticatedUsers`.
pub fn public_dataset(name: &str) -> ResourceSnapshot {
    dataset(
        name,
        json!({
            "access": [
                {"role": "OWNER", "userByEmail": "owner@example.com"},
                {"role": "READER", "specialGroup": "allAuthenticatedUsers"},
            ]
        }),
    )
}

pub fn with_labels(mut snapshot: ResourceSnapshot, labels: Value) -> ResourceSnapshot {
    if let Some(obj) = snapshot.document.as_object_mut() {
        obj.insert("labels".to_string(), labels);
    }
    snapshot
}

pub fn config_with_exclusions<const N: usize>(labels: [(&str, &str); N]) -> EffectiveConfig {
    EffectiveConfig {
        exclusions: ExclusionConfig::from_labels(labels),
        ..EffectiveConfig::default()
    }
}
