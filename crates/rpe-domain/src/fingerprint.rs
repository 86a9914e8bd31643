use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a resource finding.
///
/// Identity fields:
/// - policy_id
/// - code
/// - resource type
/// - resource name (if present)
pub fn fingerprint_for_resource(
    policy_id: &str,
    code: &str,
    resource_type: &str,
    resource_name: Option<&str>,
) -> String {
    let mut parts = vec![policy_id, code, resource_type];
    if let Some(name) = resource_name {
        parts.push(name);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_name_sensitive() {
        let a = fingerprint_for_resource("p", "c", "t", Some("one"));
        let b = fingerprint_for_resource("p", "c", "t", Some("one"));
        let c = fingerprint_for_resource("p", "c", "t", Some("two"));
        let unnamed = fingerprint_for_resource("p", "c", "t", None);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, unnamed);
        assert_eq!(a.len(), 64);
    }
}
