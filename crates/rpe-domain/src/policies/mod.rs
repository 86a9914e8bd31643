//! Policy catalog.
//!
//! Each policy pairs a pure compliance predicate with static metadata. Exclusion is shared
//! across policies and lives in [`crate::exclusion`].

use crate::document::ResourceDocument;
use rpe_types::ids;
use serde_json::Value;

pub mod bigquery_authenticated_access;


/// Static description of one policy.
#[derive(Clone, Copy, Debug)]
pub struct PolicyDescriptor {
    pub id: &'static str,
    /// Resource types this policy evaluates.
    pub applies_to: &'static [&'static str],
    pub description: &'static str,
    /// Static attributes surfaced on every evaluation.
    pub attributes: &'static [(&'static str, &'static str)],

    /// Finding code and guidance used when a resource violates the policy.
    pub code: &'static str,
    pub help: &'static str,

    pub compliant: fn(ResourceDocument<'_>) -> bool,
    /// Structured detail for a violation finding. Only called on non-compliant documents.
    pub evidence: fn(ResourceDocument<'_>) -> Value,
}

impl PolicyDescriptor {
    pub fn applies_to(&self, resource_type: &str) -> bool {
        self.applies_to.contains(&resource_type)
    }
}

static CATALOG: &[PolicyDescriptor] = &[PolicyDescriptor {
    id: ids::POLICY_BIGQUERY_NO_AUTHENTICATED_ACCESS,
    applies_to: &[ids::RESOURCE_BIGQUERY_DATASET],
    description: "BigQuery datasets must not grant access to allAuthenticatedUsers",
    attributes: &[("category", "data-exposure"), ("service", "bigquery")],
    code: ids::CODE_AUTHENTICATED_USERS_GRANT,
    help: "Remove the allAuthenticatedUsers entry from the dataset access list, or label the dataset with the configured exclusion labels.",
    compliant: bigquery_authenticated_access::compliant,
    evidence: bigquery_authenticated_access::evidence,
}];

/// All registered policies, in stable order.
pub fn catalog() -> &'static [PolicyDescriptor] {
    CATALOG
}

pub fn lookup(policy_id: &str) -> Option<&'static PolicyDescriptor> {
    CATALOG.iter().find(|p| p.id == policy_id)
}

/// Policies whose `applies_to` includes `resource_type`.
pub fn applicable(resource_type: &str) -> impl Iterator<Item = &'static PolicyDescriptor> + '_ {
    CATALOG.iter().filter(move |p| p.applies_to(resource_type))
}
