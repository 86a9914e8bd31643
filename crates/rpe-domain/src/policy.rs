use crate::policies;
use rpe_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

impl FailOn {
    pub fn as_str(self) -> &'static str {
        match self {
            FailOn::Error => "error",
            FailOn::Warning => "warning",
        }
    }
}

/// Administrator-declared label overrides.
///
/// A resource is excluded when it carries every pair in `labels`. An empty set excludes nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionConfig {
    pub labels: BTreeMap<String, String>,
}

impl ExclusionConfig {
    pub fn from_labels<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicySettings {
    pub enabled: bool,
    pub severity: Severity,
}

impl PolicySettings {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub fail_on: FailOn,
    pub exclusions: ExclusionConfig,
    pub policies: BTreeMap<String, PolicySettings>,
}

impl EffectiveConfig {
    /// Settings for `policy_id`, or `None` if the policy is unknown or disabled.
    pub fn policy_settings(&self, policy_id: &str) -> Option<&PolicySettings> {
        self.policies.get(policy_id).filter(|p| p.enabled)
    }
}

impl Default for EffectiveConfig {
    /// Every catalog policy enabled at `error`, no exclusions.
    fn default() -> Self {
        Self {
            fail_on: FailOn::Error,
            exclusions: ExclusionConfig::default(),
            policies: policies::catalog()
                .iter()
                .map(|p| (p.id.to_string(), PolicySettings::enabled(Severity::Error)))
                .collect(),
        }
    }
}
