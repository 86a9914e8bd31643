//! The `evaluate` use case: resolve config, evaluate resources, produce a report.

use crate::report::tool_meta;
use crate::snapshot::parse_snapshots;
use anyhow::Context;
use rayon::prelude::*;
use rpe_domain::model::ResourceSnapshot;
use rpe_domain::policy::EffectiveConfig;
use rpe_domain::report::DomainReport;
use rpe_settings::{Overrides, ResolvedConfig};
use rpe_types::{ReportEnvelope, RpeReport, SCHEMA_REPORT_V1};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Input for the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Resource snapshots as JSON (object, array, or JSON Lines).
    pub resources_text: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    pub report: RpeReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the evaluate use case: parse config, parse snapshots, evaluate, produce report.
pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Empty config is allowed, defaults apply.
    let cfg = rpe_settings::parse_config(input.config_text).context("parse config")?;
    let resolved = rpe_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let snapshots = parse_snapshots(input.resources_text).context("parse resources")?;
    debug!(
        resources = snapshots.len(),
        exclusion_labels = resolved.effective.exclusions.labels.len(),
        fail_on = resolved.effective.fail_on.as_str(),
        "evaluating resources"
    );

    let DomainReport {
        verdict,
        evaluations,
        findings,
        data,
        counts,
    } = evaluate_fleet(&snapshots, &resolved.effective);

    info!(
        ?verdict,
        resources = data.resources_scanned,
        evaluations = data.evaluations_total,
        excluded = data.evaluations_excluded,
        violations = data.violations,
        errors = counts.error,
        warnings = counts.warning,
        "evaluation finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        evaluations,
        findings,
        data,
    };

    Ok(EvaluateOutput {
        report,
        resolved_config: resolved,
    })
}

/// Evaluate snapshots in parallel. Outcomes are folded in input order.
pub fn evaluate_fleet(snapshots: &[ResourceSnapshot], cfg: &EffectiveConfig) -> DomainReport {
    let outcomes: Vec<_> = snapshots
        .par_iter()
        .map(|snapshot| rpe_domain::evaluate(snapshot, cfg))
        .collect();
    rpe_domain::summarize(outcomes, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpe_types::{Verdict, ids};
    use serde_json::json;
    use std::collections::BTreeMap;

    const PUBLIC: &str = r#"{"type": "bigquery.googleapis.com/Dataset", "name": "public",
        "resource": {"access": [{"role": "READER", "specialGroup": "allAuthenticatedUsers"}]}}"#;

    fn input<'a>(resources_text: &'a str, config_text: &'a str) -> EvaluateInput<'a> {
        EvaluateInput {
            resources_text,
            config_text,
            overrides: Overrides::default(),
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let output = run_evaluate(input(PUBLIC, "")).expect("run_evaluate");
        assert_eq!(output.report.verdict, Verdict::Fail);
        assert_eq!(output.report.schema, SCHEMA_REPORT_V1);
        assert_eq!(output.report.findings.len(), 1);
        assert_eq!(
            output.report.findings[0].policy_id,
            ids::POLICY_BIGQUERY_NO_AUTHENTICATED_ACCESS
        );
        assert!(output.resolved_config.effective.exclusions.is_empty());
    }

    #[test]
    fn config_exclusion_suppresses_violation() {
        let resources = r#"{"type": "bigquery.googleapis.com/Dataset", "name": "public",
            "resource": {
                "labels": {"exclude-me": "true", "environment": "bar"},
                "access": [{"role": "READER", "specialGroup": "allAuthenticatedUsers"}]
            }}"#;
        let config = "[exclusions.labels]\nexclude-me = \"true\"\n";

        let output = run_evaluate(input(resources, config)).expect("run_evaluate");
        assert_eq!(output.report.verdict, Verdict::Pass);
        assert!(output.report.findings.is_empty());
        assert_eq!(output.report.data.evaluations_excluded, 1);
        assert_eq!(output.report.evaluations[0].compliant, None);
    }

    #[test]
    fn override_exclusion_and_fail_on_apply() {
        let config = r#"{"policies": {"bigquery.dataset.no_authenticated_access": {"severity": "warning"}}}"#;
        let output = run_evaluate(input(PUBLIC, config)).expect("run_evaluate");
        assert_eq!(output.report.verdict, Verdict::Warn);

        let mut with_override = input(PUBLIC, config);
        with_override.overrides.fail_on = Some("warning".to_string());
        let output = run_evaluate(with_override).expect("run_evaluate");
        assert_eq!(output.report.verdict, Verdict::Fail);
        assert_eq!(output.report.data.fail_on, "warning");
    }

    #[test]
    fn invalid_resources_are_an_error() {
        let err = run_evaluate(input("{not json", "")).expect_err("bad input");
        assert!(format!("{err:#}").contains("parse resources"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = run_evaluate(input(PUBLIC, "fail_on = \"never\"")).expect_err("bad config");
        assert!(format!("{err:#}").contains("resolve config"));
    }

    #[test]
    fn parallel_fleet_matches_sequential_evaluation() {
        let snapshots: Vec<ResourceSnapshot> = (0..64)
            .map(|i| {
                let group = if i % 3 == 0 {
                    "allAuthenticatedUsers"
                } else {
                    "projectReaders"
                };
                let labels = if i % 5 == 0 {
                    json!({"exclude-me": "true"})
                } else {
                    json!({})
                };
                ResourceSnapshot::new(
                    ids::RESOURCE_BIGQUERY_DATASET,
                    json!({"labels": labels, "access": [{"role": "READER", "specialGroup": group}]}),
                )
                .with_name(format!("ds-{i:02}"))
            })
            .collect();
        let cfg = EffectiveConfig {
            exclusions: rpe_domain::policy::ExclusionConfig {
                labels: BTreeMap::from([("exclude-me".to_string(), "true".to_string())]),
            },
            ..EffectiveConfig::default()
        };

        let parallel = evaluate_fleet(&snapshots, &cfg);
        let sequential = rpe_domain::evaluate_all(&snapshots, &cfg);

        assert_eq!(parallel.evaluations, sequential.evaluations);
        assert_eq!(parallel.findings, sequential.findings);
        assert_eq!(parallel.data, sequential.data);
        // i % 3 == 0 and i % 5 != 0 for i in 0..64: 22 multiples of 3, minus 0,15,30,45,60.
        assert_eq!(parallel.data.violations, 17);
        assert_eq!(parallel.data.evaluations_excluded, 13);
    }
}
