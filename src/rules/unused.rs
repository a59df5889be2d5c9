//! Unused translation key detection rule.
//!
//! Keys defined in the reference locale that no static reference resolves
//! to. Keys only reached through dynamic references are reported too, so
//! this is a superset of truly dead keys.

use std::collections::HashSet;

use crate::{core::KeyIndex, issues::UnusedKeyIssue};

/// Find every reference-locale key absent from `used_keys`.
///
/// Sorted by namespace, then key.
pub fn check_unused_keys(
    used_keys: &HashSet<(String, String)>,
    index: &KeyIndex,
) -> Vec<UnusedKeyIssue> {
    let mut issues = Vec::new();

    for dictionary in index.dictionaries() {
        let mut keys = dictionary.keys();
        keys.sort();

        for key in keys {
            if used_keys.contains(&(dictionary.namespace.clone(), key.clone())) {
                continue;
            }
            issues.push(UnusedKeyIssue {
                namespace: dictionary.namespace.clone(),
                context: dictionary.context_for(&key),
            });
        }
    }

    issues
}
