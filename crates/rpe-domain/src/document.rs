//! Read-only accessors over JSON resource documents.
//!
//! Lookups never fail: a missing field, or a field holding an unexpected JSON type, reads as
//! its empty value (no entries, no labels, no string).

use serde_json::{Map, Value};

pub const FIELD_ACCESS: &str = "access";
pub const FIELD_LABELS: &str = "labels";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_SPECIAL_GROUP: &str = "specialGroup";

static NULL: Value = Value::Null;

/// Follow `path` through nested objects.
///
/// Returns `None` as soon as a segment is missing or the current value is not an object.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// `lookup`, falling back to `default` when the path does not resolve.
pub fn get_or<'a>(value: &'a Value, path: &[&str], default: &'a Value) -> &'a Value {
    lookup(value, path).unwrap_or(default)
}

/// Borrowed view of one resource snapshot's document.
#[derive(Clone, Copy, Debug)]
pub struct ResourceDocument<'a> {
    value: &'a Value,
}

impl<'a> ResourceDocument<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Access entries in document order. Absent or non-array `access` yields nothing.
    pub fn access(self) -> impl Iterator<Item = AccessEntry<'a>> + 'a {
        get_or(self.value, &[FIELD_ACCESS], &NULL)
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(AccessEntry::new)
    }

    /// String value of label `key`. Non-string label values read as absent.
    pub fn label(&self, key: &str) -> Option<&'a str> {
        self.labels_map()?.get(key)?.as_str()
    }

    /// All string-valued labels, in key order.
    pub fn labels(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.labels_map()
            .into_iter()
            .flat_map(Map::iter)
            .filter_map(|(k, v)| Some((k.as_str(), v.as_str()?)))
    }

    fn labels_map(&self) -> Option<&'a Map<String, Value>> {
        get_or(self.value, &[FIELD_LABELS], &NULL).as_object()
    }
}

/// Borrowed view of one grant inside `access`.
#[derive(Clone, Copy, Debug)]
pub struct AccessEntry<'a> {
    value: &'a Value,
}

impl<'a> AccessEntry<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn role(&self) -> Option<&'a str> {
        self.str_field(FIELD_ROLE)
    }

    /// Built-in principal class (`allAuthenticatedUsers`, `allUsers`, ...), if the grant
    /// targets one.
    pub fn special_group(&self) -> Option<&'a str> {
        self.str_field(FIELD_SPECIAL_GROUP)
    }

    pub fn str_field(&self, key: &str) -> Option<&'a str> {
        lookup(self.value, &[key])?.as_str()
    }
}
