//! Stable identifiers for policies, finding codes, and resource types.
//!
//! `policy_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Policies
pub const POLICY_BIGQUERY_NO_AUTHENTICATED_ACCESS: &str =
    "bigquery.dataset.no_authenticated_access";

// Codes: bigquery.dataset.no_authenticated_access
pub const CODE_AUTHENTICATED_USERS_GRANT: &str = "authenticated_users_grant";

// Resource types (Cloud Asset Inventory naming)
pub const RESOURCE_BIGQUERY_DATASET: &str = "bigquery.googleapis.com/Dataset";

// Tool-level
pub const POLICY_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
