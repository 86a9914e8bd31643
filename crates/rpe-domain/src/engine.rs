use crate::exclusion;
use crate::fingerprint::fingerprint_for_resource;
use crate::model::ResourceSnapshot;
use crate::policies::{self, PolicyDescriptor};
use crate::policy::{EffectiveConfig, FailOn, PolicySettings};
use crate::report::{DomainReport, SeverityCounts};
use rpe_types::{Evaluation, Finding, RpeData, Severity, Verdict};
use tracing::debug;

/// Everything one snapshot produced: an evaluation per applicable enabled policy and a
/// finding per violation.
#[derive(Clone, Debug, Default)]
pub struct SnapshotOutcome {
    pub evaluations: Vec<Evaluation>,
    pub findings: Vec<Finding>,
}

/// Evaluate one policy against one snapshot.
///
/// Exclusion is decided first. An excluded resource is never handed to the compliance
/// predicate, so its evaluation carries `compliant: None`.
pub fn evaluate_policy(
    policy: &PolicyDescriptor,
    settings: &PolicySettings,
    snapshot: &ResourceSnapshot,
    cfg: &EffectiveConfig,
) -> Evaluation {
    let doc = snapshot.document();

    let excluded = exclusion::excluded(doc, &cfg.exclusions);
    let compliant = if excluded {
        None
    } else {
        Some((policy.compliant)(doc))
    };

    debug!(
        policy_id = policy.id,
        resource = snapshot.display_name(),
        excluded,
        ?compliant,
        "policy evaluated"
    );

    Evaluation {
        policy_id: policy.id.to_string(),
        resource: snapshot.resource_ref(),
        severity: settings.severity,
        excluded,
        compliant,
        policy_attributes: policy
            .attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Evaluate every enabled policy that applies to the snapshot's resource type.
pub fn evaluate(snapshot: &ResourceSnapshot, cfg: &EffectiveConfig) -> SnapshotOutcome {
    let mut outcome = SnapshotOutcome::default();

    for policy in policies::applicable(&snapshot.resource_type) {
        let Some(settings) = cfg.policy_settings(policy.id) else {
            continue;
        };

        let evaluation = evaluate_policy(policy, settings, snapshot, cfg);
        if evaluation.is_violation() {
            outcome
                .findings
                .push(violation_finding(policy, &evaluation, snapshot));
        }
        outcome.evaluations.push(evaluation);
    }

    outcome
}

/// Sequential convenience over [`evaluate`] + [`summarize`].
pub fn evaluate_all(snapshots: &[ResourceSnapshot], cfg: &EffectiveConfig) -> DomainReport {
    let outcomes = snapshots.iter().map(|s| evaluate(s, cfg)).collect();
    summarize(outcomes, cfg)
}

/// Fold per-snapshot outcomes (in input order) into a report.
pub fn summarize(outcomes: Vec<SnapshotOutcome>, cfg: &EffectiveConfig) -> DomainReport {
    let resources_scanned = saturating_count(outcomes.len());

    let mut evaluations = Vec::new();
    let mut findings = Vec::new();
    for outcome in outcomes {
        evaluations.extend(outcome.evaluations);
        findings.extend(outcome.findings);
    }

    // Evaluations keep input order; findings are sorted for stable output.
    findings.sort_by(compare_findings);

    let verdict = compute_verdict(&findings, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&findings);

    let data = RpeData {
        fail_on: cfg.fail_on.as_str().to_string(),
        resources_scanned,
        evaluations_total: saturating_count(evaluations.len()),
        evaluations_excluded: saturating_count(evaluations.iter().filter(|e| e.excluded).count()),
        violations: saturating_count(findings.len()),
        exclusion_labels: cfg.exclusions.labels.clone(),
    };

    DomainReport {
        verdict,
        evaluations,
        findings,
        data,
        counts,
    }
}

/// Report counters are `u32`; larger counts clamp to `u32::MAX`.
fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn violation_finding(
    policy: &PolicyDescriptor,
    evaluation: &Evaluation,
    snapshot: &ResourceSnapshot,
) -> Finding {
    let fingerprint = fingerprint_for_resource(
        policy.id,
        policy.code,
        &snapshot.resource_type,
        snapshot.name.as_deref(),
    );

    Finding {
        severity: evaluation.severity,
        policy_id: policy.id.to_string(),
        code: policy.code.to_string(),
        message: format!(
            "resource '{}' violates policy: {}",
            snapshot.display_name(),
            policy.description
        ),
        resource: Some(evaluation.resource.clone()),
        help: Some(policy.help.to_string()),
        url: None,
        fingerprint: Some(fingerprint),
        data: (policy.evidence)(snapshot.document()),
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) resource (missing last)
    // 3) policy_id
    // 4) code
    // 5) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then_with(|| match (&a.resource, &b.resource) {
            (Some(ar), Some(br)) => ar.cmp(br),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
        .then(a.policy_id.cmp(&b.policy_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
