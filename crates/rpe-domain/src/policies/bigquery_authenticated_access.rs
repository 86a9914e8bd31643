//! BigQuery datasets must not grant any role to `allAuthenticatedUsers`.
//!
//! `allUsers` is deliberately outside this policy's scope.

use crate::document::{AccessEntry, ResourceDocument};
use serde_json::{Value, json};

pub const FORBIDDEN_SPECIAL_GROUP: &str = "allAuthenticatedUsers";

/// Compliant iff no access entry targets the forbidden special group.
pub fn compliant(doc: ResourceDocument<'_>) -> bool {
    !doc.access().any(|entry| grants_forbidden_group(&entry))
}

pub fn evidence(doc: ResourceDocument<'_>) -> Value {
    // A grant without a string role is reported as `null`.
    let roles: Vec<Option<&str>> = doc
        .access()
        .filter(grants_forbidden_group)
        .map(|entry| entry.role())
        .collect();

    json!({
        "special_group": FORBIDDEN_SPECIAL_GROUP,
        "roles": roles,
    })
}

fn grants_forbidden_group(entry: &AccessEntry<'_>) -> bool {
    entry.special_group() == Some(FORBIDDEN_SPECIAL_GROUP)
}
