use rpe_types::{RpeReport, Severity, Verdict};

pub fn render_markdown(report: &RpeReport) -> String {
    let mut out = String::new();

    out.push_str("# Resource policy report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Resources: {}\n- Evaluations: {} ({} excluded)\n- Violations: {}\n\n",
        verdict,
        report.data.resources_scanned,
        report.data.evaluations_total,
        report.data.evaluations_excluded,
        report.data.violations
    ));

    if !report.data.exclusion_labels.is_empty() {
        let labels: Vec<String> = report
            .data
            .exclusion_labels
            .iter()
            .map(|(k, v)| format!("`{}={}`", k, v))
            .collect();
        out.push_str(&format!("> Exclusion labels: {}\n\n", labels.join(", ")));
    }

    if report.findings.is_empty() {
        out.push_str("No violations.\n");
    } else {
        out.push_str("## Violations\n\n");

        for f in &report.findings {
            let sev = match f.severity {
                Severity::Info => "INFO",
                Severity::Warning => "WARN",
                Severity::Error => "ERROR",
            };

            match &f.resource {
                Some(r) => out.push_str(&format!(
                    "- [{}] `{}` / `{}`: {} (`{}`)\n",
                    sev,
                    f.policy_id,
                    f.code,
                    f.message,
                    r.resource_type
                )),
                None => out.push_str(&format!(
                    "- [{}] `{}` / `{}`: {}\n",
                    sev, f.policy_id, f.code, f.message
                )),
            }

            if let Some(help) = &f.help {
                out.push_str(&format!("  - help: {}\n", help));
            }
            if let Some(url) = &f.url {
                out.push_str(&format!("  - url: {}\n", url));
            }
        }
    }

    let excluded: Vec<_> = report.evaluations.iter().filter(|e| e.excluded).collect();
    if !excluded.is_empty() {
        out.push_str("\n## Excluded\n\n");
        for e in excluded {
            out.push_str(&format!(
                "- `{}` on `{}`\n",
                e.policy_id,
                e.resource.display_name()
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpe_types::{
        Evaluation, Finding, ReportEnvelope, ResourceRef, RpeData, SCHEMA_REPORT_V1, ToolMeta,
    };
    use std::collections::BTreeMap;
    use time::macros::datetime;

    fn resource(name: &str) -> ResourceRef {
        ResourceRef {
            resource_type: "bigquery.googleapis.com/Dataset".to_string(),
            name: Some(name.to_string()),
        }
    }

    fn report(verdict: Verdict, evaluations: Vec<Evaluation>, findings: Vec<Finding>) -> RpeReport {
        ReportEnvelope {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "rpe".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: datetime!(2026-01-01 00:00 UTC),
            finished_at: datetime!(2026-01-01 00:00 UTC),
            verdict,
            data: RpeData {
                fail_on: "error".to_string(),
                resources_scanned: evaluations.len() as u32,
                evaluations_total: evaluations.len() as u32,
                evaluations_excluded: evaluations.iter().filter(|e| e.excluded).count() as u32,
                violations: findings.len() as u32,
                exclusion_labels: BTreeMap::new(),
            },
            evaluations,
            findings,
        }
    }

    #[test]
    fn renders_clean_report() {
        let md = render_markdown(&report(Verdict::Pass, Vec::new(), Vec::new()));
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("No violations."));
        assert!(!md.contains("## Excluded"));
    }

    #[test]
    fn renders_violations_and_exclusions() {
        let excluded = Evaluation {
            policy_id: "bigquery.dataset.no_authenticated_access".to_string(),
            resource: resource("skipped"),
            severity: Severity::Error,
            excluded: true,
            compliant: None,
            policy_attributes: BTreeMap::new(),
        };
        let finding = Finding {
            severity: Severity::Error,
            policy_id: "bigquery.dataset.no_authenticated_access".to_string(),
            code: "authenticated_users_grant".to_string(),
            message: "resource 'public' violates policy".to_string(),
            resource: Some(resource("public")),
            help: Some("remove the grant".to_string()),
            url: Some("https://example.com/docs".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        };

        let mut r = report(Verdict::Fail, vec![excluded], vec![finding]);
        r.data
            .exclusion_labels
            .insert("exclude-me".to_string(), "true".to_string());

        let md = render_markdown(&r);
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("> Exclusion labels: `exclude-me=true`"));
        assert!(md.contains("## Violations"));
        assert!(md.contains("[ERROR] `bigquery.dataset.no_authenticated_access`"));
        assert!(md.contains("(`bigquery.googleapis.com/Dataset`)"));
        assert!(md.contains("help: remove the grant"));
        assert!(md.contains("url: https://example.com/docs"));
        assert!(md.contains("## Excluded"));
        assert!(md.contains("on `skipped`"));
    }
}
