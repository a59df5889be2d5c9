//! Locale consistency rule.
//!
//! Compares a target dictionary's key paths against the reference
//! dictionary of the same namespace. Only key presence is compared, never
//! values.

use std::collections::HashSet;

use crate::core::LocaleDictionary;

/// Key differences of one (locale, namespace) pair. All lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyComparison {
    /// In the reference, absent from the target.
    pub missing: Vec<String>,
    /// In the target, absent from the reference.
    pub extra: Vec<String>,
    /// Target keys whose value is a whitespace-only string.
    pub empty: Vec<String>,
}

impl KeyComparison {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.empty.is_empty()
    }
}

/// Set differences between two key lists: `(missing, extra)`, both sorted.
pub fn compare_keys(reference: &[String], target: &[String]) -> (Vec<String>, Vec<String>) {
    let reference_set: HashSet<&str> = reference.iter().map(String::as_str).collect();
    let target_set: HashSet<&str> = target.iter().map(String::as_str).collect();

    let mut missing: Vec<String> = reference_set
        .difference(&target_set)
        .map(|k| k.to_string())
        .collect();
    let mut extra: Vec<String> = target_set
        .difference(&reference_set)
        .map(|k| k.to_string())
        .collect();

    missing.sort();
    extra.sort();
    (missing, extra)
}

pub fn compare_dictionaries(
    reference: &LocaleDictionary,
    target: &LocaleDictionary,
) -> KeyComparison {
    let (missing, extra) = compare_keys(&reference.keys(), &target.keys());
    let mut empty = target.empty_keys();
    empty.sort();

    KeyComparison {
        missing,
        extra,
        empty,
    }
}
