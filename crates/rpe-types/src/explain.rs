//! Explain registry for policies and codes.
//!
//! Maps policy IDs and finding codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a policy or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the policy/code.
    pub title: &'static str,
    /// What the policy checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after resource document examples (JSON).
    pub examples: ExamplePair,
}

/// Before and after resource document examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A document that would produce a finding.
    pub before: &'static str,
    /// A document that passes the policy.
    pub after: &'static str,
}

/// Look up an explanation by policy_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Policy IDs
        ids::POLICY_BIGQUERY_NO_AUTHENTICATED_ACCESS => Some(explain_no_authenticated_access()),

        // Codes
        ids::CODE_AUTHENTICATED_USERS_GRANT => Some(explain_authenticated_users_grant()),

        _ => None,
    }
}

/// List all known policy IDs.
pub fn all_policy_ids() -> &'static [&'static str] {
    &[ids::POLICY_BIGQUERY_NO_AUTHENTICATED_ACCESS]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_AUTHENTICATED_USERS_GRANT]
}

fn explain_no_authenticated_access() -> Explanation {
    Explanation {
        title: "No allAuthenticatedUsers Access on BigQuery Datasets",
        description: "\
Detects BigQuery datasets whose access list grants a role to the
`allAuthenticatedUsers` special group.

`allAuthenticatedUsers` matches every signed-in Google account, not just the
accounts of your organization. A grant to it exposes the dataset to anyone
with a Google login.

Grants to named principals (userByEmail, groupByEmail, iamMember, view) and to
other special groups are not inspected by this policy.

Resources carrying every configured exclusion label are skipped.",
        remediation: "\
Remove the `allAuthenticatedUsers` entry from the dataset's access list and grant
the role to a specific group or domain instead:

    bq show --format=prettyjson project:dataset > dataset.json
    # edit the access list
    bq update --source dataset.json project:dataset

If the exposure is intentional, label the dataset with the configured exclusion
labels (see `[exclusions.labels]` in rpe.toml).",
        examples: ExamplePair {
            before: r#"{
  "access": [
    { "role": "READER", "specialGroup": "allAuthenticatedUsers" }
  ]
}"#,
            after: r#"{
  "access": [
    { "role": "READER", "groupByEmail": "analysts@example.com" }
  ]
}"#,
        },
    }
}

fn explain_authenticated_users_grant() -> Explanation {
    let mut exp = explain_no_authenticated_access();
    exp.title = "Grant to allAuthenticatedUsers";
    exp
}
