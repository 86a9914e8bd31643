//! Exclusion evaluator: label-based administrative opt-out.

use crate::document::ResourceDocument;
use crate::policy::ExclusionConfig;

/// Whether `doc` is opted out of evaluation by `exclusions`.
///
/// True iff the configured label set is non-empty and every configured `(key, value)` pair
/// is present on the resource with an identical value. Extra resource labels do not matter.
pub fn excluded(doc: ResourceDocument<'_>, exclusions: &ExclusionConfig) -> bool {
    if exclusions.is_empty() {
        return false;
    }

    exclusions
        .labels
        .iter()
        .all(|(key, value)| doc.label(key) == Some(value.as_str()))
}
