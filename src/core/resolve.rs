//! Resolution of raw key references to (namespace, key) pairs.
//!
//! A raw key may carry its namespace explicitly (`medical:conditions.title`);
//! otherwise it belongs to the file's first declared namespace.

use crate::core::{RawReference, SourceReference};

/// References of one file after resolution.
#[derive(Debug, Default)]
pub struct ResolvedReferences {
    pub references: Vec<SourceReference>,
    /// Number of references dropped because the key was empty.
    pub discarded: usize,
}

/// The namespace unprefixed keys of a file belong to.
pub fn file_namespace<'a>(declared: &'a [String], fallback: &'a str) -> &'a str {
    declared.first().map_or(fallback, String::as_str)
}

/// Resolve a raw key to `(namespace, key)`.
///
/// The text before the first `:` is taken as the namespace only when it names
/// a known namespace. Returns `None` when the resulting key is empty.
pub fn resolve_key(
    raw_key: &str,
    default_namespace: &str,
    known_namespaces: &[String],
) -> Option<(String, String)> {
    let (namespace, key) = match raw_key.split_once(':') {
        Some((ns, key)) if known_namespaces.iter().any(|k| k == ns) => (ns, key),
        _ => (default_namespace, raw_key),
    };

    if key.is_empty() {
        return None;
    }
    Some((namespace.to_string(), key.to_string()))
}

/// Resolve every static reference extracted from a file.
pub fn resolve_references(
    references: Vec<RawReference>,
    default_namespace: &str,
    known_namespaces: &[String],
) -> ResolvedReferences {
    let mut resolved = ResolvedReferences::default();

    for raw in references {
        match resolve_key(&raw.raw_key, default_namespace, known_namespaces) {
            Some((namespace, key)) => resolved
                .references
                .push(SourceReference::from_raw(raw, namespace, key)),
            None => resolved.discarded += 1,
        }
    }
    resolved
}
