//! The `explain` and `policies` use cases: look up policy documentation.

use rpe_domain::policies;
use rpe_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes available policy ids and codes.
    NotFound {
        identifier: String,
        available_policy_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a policy id or code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_policy_ids: explain::all_policy_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (violation):\n");
    out.push_str("```json\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (compliant):\n");
    out.push_str("```json\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, policy_ids: &[&str], codes: &[&str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown policy id or code: {identifier}\n\n"));
    out.push_str("Available policy ids:\n");
    for id in policy_ids {
        out.push_str(&format!("  - {id}\n"));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {code}\n"));
    }

    out
}

/// One row of the `policies` listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicySummary {
    pub id: &'static str,
    pub applies_to: &'static [&'static str],
    pub description: &'static str,
}

/// Every registered policy, in catalog order.
pub fn list_policies() -> Vec<PolicySummary> {
    policies::catalog()
        .iter()
        .map(|p| PolicySummary {
            id: p.id,
            applies_to: p.applies_to,
            description: p.description,
        })
        .collect()
}

pub fn format_policies(policies: &[PolicySummary]) -> String {
    let mut out = String::new();
    for p in policies {
        out.push_str(p.id);
        out.push('\n');
        out.push_str(&format!("  applies to: {}\n", p.applies_to.join(", ")));
        out.push_str(&format!("  {}\n", p.description));
    }
    out
}
