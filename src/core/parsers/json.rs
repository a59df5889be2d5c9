use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::LocaleDictionary;

/// Path of the dictionary for a (locale, namespace) pair:
/// `<messages_root>/<locale>/<namespace>.json`.
pub fn dictionary_path(messages_root: &Path, locale: &str, namespace: &str) -> PathBuf {
    messages_root
        .join(locale)
        .join(format!("{}.json", namespace))
}

/// Load one dictionary.
///
/// Returns `Ok(None)` when the file does not exist; that is a reportable
/// state, not a failure. Read errors and malformed JSON are errors.
pub fn load_dictionary(
    messages_root: &Path,
    locale: &str,
    namespace: &str,
) -> Result<Option<LocaleDictionary>> {
    let path = dictionary_path(messages_root, locale, namespace);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read JSON file: {}", path.display()));
        }
    };
    parse_dictionary(&path, locale, namespace, content).map(Some)
}

pub fn parse_dictionary(
    path: &Path,
    locale: &str,
    namespace: &str,
    content: String,
) -> Result<LocaleDictionary> {
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;

    if !value.is_object() {
        bail!(
            "Failed to parse JSON file: {}: root must be an object",
            path.display()
        );
    }

    Ok(LocaleDictionary::new(
        locale,
        namespace,
        path.to_string_lossy(),
        content,
        value,
    ))
}

/// List locale directories under the messages root, sorted.
pub fn discover_locales(messages_root: &Path) -> Result<Vec<String>> {
    if !messages_root.exists() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: Check your .keycheckrc.json 'messagesRoot' setting.",
            messages_root.display()
        );
    }

    if !messages_root.is_dir() {
        bail!("'{}' is not a directory.", messages_root.display());
    }

    let mut locales = Vec::new();
    for entry in fs::read_dir(messages_root)? {
        let path = entry?.path();
        if path.is_dir()
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            locales.push(name.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}

/// Flatten a dictionary into dotted key paths, depth-first, in document order.
///
/// Only plain objects are walked. Every other value (string, number, bool,
/// null, array) is a leaf, so empty objects contribute no keys.
pub fn flatten_keys(value: &Value) -> Vec<String> {
    flatten_leaves(value)
        .into_iter()
        .map(|(key, _)| key)
        .collect()
}

/// Leaf key paths whose value is a string made only of whitespace.
///
/// Non-string values (`0`, `false`, `null`) are never empty.
pub fn empty_keys(value: &Value) -> Vec<String> {
    flatten_leaves(value)
        .into_iter()
        .filter(|(_, v)| matches!(v, Value::String(s) if s.trim().is_empty()))
        .map(|(key, _)| key)
        .collect()
}

pub fn flatten_leaves(value: &Value) -> Vec<(String, &Value)> {
    let mut leaves = Vec::new();
    if let Value::Object(map) = value {
        collect_leaves(map, "", &mut leaves);
    }
    leaves
}

fn collect_leaves<'a>(map: &'a Map<String, Value>, prefix: &str, out: &mut Vec<(String, &'a Value)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(child) => collect_leaves(child, &path, out),
            _ => out.push((path, val)),
        }
    }
}

/// Follow a dotted key path through nested objects.
pub fn lookup_path<'a>(value: &'a Value, key_path: &str) -> Option<&'a Value> {
    key_path
        .split('.')
        .try_fold(value, |current, part| match current {
            Value::Object(map) => map.get(part),
            _ => None,
        })
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub(crate) fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence so that `buttons.save` finds the
/// `"save"` that comes after `"buttons"`, not one under another parent.
/// Only matches followed by `:` count, so string values are skipped.
pub(crate) fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if after_pattern < remaining.len()
                && remaining[after_pattern..].trim_start().starts_with(':')
            {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}
