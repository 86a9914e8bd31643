use anyhow::Context;
use rpe_types::{
    Finding, ReportEnvelope, RpeData, RpeReport, SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict,
    ids,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "rpe".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Parse a previously written report, rejecting unknown schemas.
pub fn parse_report_json(text: &str) -> anyhow::Result<RpeReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse rpe report")
}

pub fn serialize_report(report: &RpeReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// A failing report carrying a single `tool.runtime` finding.
///
/// Written when the tool itself could not complete, so downstream consumers still get a
/// well-formed receipt.
pub fn runtime_error_report(message: &str) -> RpeReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        evaluations: Vec::new(),
        findings: vec![Finding {
            severity: Severity::Error,
            policy_id: ids::POLICY_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            resource: None,
            help: Some("Fix the tool error and re-run rpe.".to_string()),
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: RpeData {
            fail_on: "error".to_string(),
            ..RpeData::default()
        },
    }
}

/// Process exit code for a completed evaluation.
pub fn verdict_exit_code(verdict: &Verdict) -> i32 {
    match verdict {
        Verdict::Pass | Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
