use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Stable schema identifier for rpe reports.
pub const SCHEMA_REPORT_V1: &str = "rpe.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Identity of the resource an evaluation or finding refers to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ResourceRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Outcome of one policy against one resource.
///
/// `compliant` is `None` when the resource was excluded: exclusion is decided first and the
/// compliance predicate is not consulted for excluded resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Evaluation {
    pub policy_id: String,
    pub resource: ResourceRef,
    pub severity: Severity,
    pub excluded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliant: Option<bool>,

    /// Static attributes of the policy (owner, category, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub policy_attributes: BTreeMap<String, String>,
}

impl Evaluation {
    /// A violation is a non-excluded evaluation that failed the compliance predicate.
    pub fn is_violation(&self) -> bool {
        !self.excluded && self.compliant == Some(false)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub policy_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `policy_id + code + resource type + resource name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Policy-specific structured payload.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct RpeData {
    pub fail_on: String,

    pub resources_scanned: u32,
    pub evaluations_total: u32,
    pub evaluations_excluded: u32,
    pub violations: u32,

    /// Exclusion labels in effect for this run.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exclusion_labels: BTreeMap<String, String>,
}

/// A generic report envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = RpeData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub evaluations: Vec<Evaluation>,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type RpeReport = ReportEnvelope<RpeData>;
