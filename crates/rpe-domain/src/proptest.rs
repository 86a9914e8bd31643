//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - the compliance predicate over arbitrary access lists
//! - label containment for exclusion
//! - gating and determinism of the engine

use crate::document::ResourceDocument;
use crate::engine::{evaluate, evaluate_all};
use crate::exclusion::excluded;
use crate::policies::bigquery_authenticated_access::{FORBIDDEN_SPECIAL_GROUP, compliant};
use crate::policy::{EffectiveConfig, ExclusionConfig};
use crate::test_support::dataset;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_role() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("READER".to_string()),
        Just("WRITER".to_string()),
        Just("OWNER".to_string()),
        Just("roles/bigquery.dataViewer".to_string()),
    ]
}

/// Special groups that never violate the policy.
fn arb_allowed_special_group() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("allUsers".to_string()),
        Just("projectReaders".to_string()),
        Just("projectWriters".to_string()),
        Just("projectOwners".to_string()),
        prop::string::string_regex("[a-zA-Z]{1,20}")
            .unwrap()
            .prop_filter("must differ from the forbidden group", |s| {
                s.as_str() != FORBIDDEN_SPECIAL_GROUP
            }),
    ]
}

/// An access entry that does not grant to the forbidden group.
fn arb_harmless_entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        (arb_role(), arb_allowed_special_group())
            .prop_map(|(role, group)| json!({"role": role, "specialGroup": group})),
        (arb_role(), "[a-z]{1,8}@example\\.com")
            .prop_map(|(role, email)| json!({"role": role, "userByEmail": email})),
        (arb_role(), "[a-z]{1,8}@example\\.com")
            .prop_map(|(role, email)| json!({"role": role, "groupByEmail": email})),
        Just(json!({"view": {"projectId": "p", "datasetId": "d", "tableId": "t"}})),
        Just(json!({})),
    ]
}

fn arb_label_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z][a-z0-9_-]{0,10}", "[a-z0-9_-]{0,10}", 0..6)
}

fn labels_doc(labels: &BTreeMap<String, String>) -> Value {
    let map: Map<String, Value> = labels
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    json!({ "labels": map })
}

// ============================================================================
// Compliance
// ============================================================================

proptest! {
    #[test]
    fn harmless_access_lists_are_compliant(
        entries in prop::collection::vec(arb_harmless_entry(), 0..12)
    ) {
        let doc = json!({ "access": entries });
        prop_assert!(compliant(ResourceDocument::new(&doc)));
    }

    #[test]
    fn one_forbidden_grant_anywhere_is_non_compliant(
        entries in prop::collection::vec(arb_harmless_entry(), 0..12),
        role in arb_role(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut entries = entries;
        let at = position.index(entries.len() + 1);
        entries.insert(at, json!({"role": role, "specialGroup": FORBIDDEN_SPECIAL_GROUP}));

        let doc = json!({ "access": entries });
        prop_assert!(!compliant(ResourceDocument::new(&doc)));
    }

    #[test]
    fn compliance_ignores_labels(
        labels in arb_label_map(),
    ) {
        let doc = labels_doc(&labels);
        prop_assert!(compliant(ResourceDocument::new(&doc)));
    }
}

// ============================================================================
// Exclusion
// ============================================================================

proptest! {
    #[test]
    fn empty_exclusion_config_never_excludes(labels in arb_label_map()) {
        let doc = labels_doc(&labels);
        prop_assert!(!excluded(ResourceDocument::new(&doc), &ExclusionConfig::default()));
    }

    #[test]
    fn superset_of_configured_labels_is_excluded(
        configured in arb_label_map().prop_filter("non-empty", |m| !m.is_empty()),
        extra in arb_label_map(),
    ) {
        let mut labels = extra;
        labels.extend(configured.clone());

        let doc = labels_doc(&labels);
        let cfg = ExclusionConfig { labels: configured };
        prop_assert!(excluded(ResourceDocument::new(&doc), &cfg));
    }

    #[test]
    fn dropping_any_configured_label_breaks_exclusion(
        configured in arb_label_map().prop_filter("non-empty", |m| !m.is_empty()),
        drop in any::<prop::sample::Index>(),
    ) {
        let mut labels = configured.clone();
        let key = labels
            .keys()
            .nth(drop.index(configured.len()))
            .cloned()
            .unwrap();
        labels.remove(&key);

        let doc = labels_doc(&labels);
        let cfg = ExclusionConfig { labels: configured };
        prop_assert!(!excluded(ResourceDocument::new(&doc), &cfg));
    }
}

// ============================================================================
// Engine
// ============================================================================

proptest! {
    #[test]
    fn excluded_evaluations_never_report_violations(
        entries in prop::collection::vec(arb_harmless_entry(), 0..6),
        forbidden in any::<bool>(),
        configured in arb_label_map().prop_filter("non-empty", |m| !m.is_empty()),
    ) {
        let mut entries = entries;
        if forbidden {
            entries.push(json!({"role": "READER", "specialGroup": FORBIDDEN_SPECIAL_GROUP}));
        }
        let labels: Map<String, Value> = configured
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let snapshot = dataset("ds", json!({"access": entries, "labels": labels}));

        let cfg = EffectiveConfig {
            exclusions: ExclusionConfig { labels: configured },
            ..EffectiveConfig::default()
        };
        let outcome = evaluate(&snapshot, &cfg);

        prop_assert_eq!(outcome.evaluations.len(), 1);
        prop_assert!(outcome.evaluations[0].excluded);
        prop_assert_eq!(outcome.evaluations[0].compliant, None);
        prop_assert!(outcome.findings.is_empty());
    }

    #[test]
    fn evaluation_is_deterministic(
        entries in prop::collection::vec(arb_harmless_entry(), 0..6),
        forbidden in any::<bool>(),
    ) {
        let mut entries = entries;
        if forbidden {
            entries.push(json!({"role": "READER", "specialGroup": FORBIDDEN_SPECIAL_GROUP}));
        }
        let snapshots = vec![dataset("ds", json!({ "access": entries }))];
        let cfg = EffectiveConfig::default();

        let first = evaluate_all(&snapshots, &cfg);
        let second = evaluate_all(&snapshots, &cfg);

        prop_assert_eq!(first.verdict, second.verdict);
        prop_assert_eq!(first.evaluations, second.evaluations);
        prop_assert_eq!(first.findings, second.findings);
        prop_assert_eq!(first.data.violations, u32::from(forbidden));
    }
}
