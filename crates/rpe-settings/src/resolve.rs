use crate::model::RpeConfigV1;
use anyhow::Context;
use rpe_domain::policies;
use rpe_domain::policy::{EffectiveConfig, FailOn};
use rpe_types::Severity;
use std::collections::BTreeMap;

/// Values supplied on the command line; they win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub fail_on: Option<String>,
    /// Extra exclusion labels, merged over `[exclusions.labels]`.
    pub exclude_labels: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(cfg: RpeConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    // per-policy overrides
    for (policy_id, pc) in cfg.policies.iter() {
        if policies::lookup(policy_id).is_none() {
            anyhow::bail!(
                "unknown policy: {policy_id} (known: {})",
                known_policy_ids().join(", ")
            );
        }
        let Some(entry) = effective.policies.get_mut(policy_id) else {
            continue;
        };

        if let Some(enabled) = pc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = pc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {policy_id}"))?;
        }
    }

    // exclusions: config first, then CLI
    effective.exclusions.labels = cfg.exclusions.labels;
    effective.exclusions.labels.extend(overrides.exclude_labels);

    // fail_on: CLI wins over config
    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig { effective })
}

fn known_policy_ids() -> Vec<&'static str> {
    policies::catalog().iter().map(|p| p.id).collect()
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
