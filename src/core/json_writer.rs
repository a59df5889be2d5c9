use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::LocaleDictionary;

/// Path segments that are never written, whatever their source.
pub const RESERVED_SEGMENTS: &[&str] = &["__proto__", "constructor", "prototype"];

/// Result of merging one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    Updated,
    /// A path segment is reserved; nothing was written.
    SkippedReserved,
    /// An intermediate path segment holds a non-object value.
    SkippedBlocked,
}

impl MergeOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, MergeOutcome::Added | MergeOutcome::Updated)
    }
}

/// Keys written to and skipped from one dictionary by fix mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixOutcome {
    pub fixed: Vec<String>,
    pub skipped: Vec<String>,
}

/// JSON writer for dictionary files with nested structure support.
pub struct JsonWriter {
    file_path: PathBuf,
    data: Map<String, Value>,
}

impl JsonWriter {
    /// Start from an in-memory copy of a document that will be written to `path`.
    pub fn from_value(path: &Path, value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self {
                file_path: path.to_path_buf(),
                data,
            }),
            _ => bail!("Root of JSON file must be an object: {}", path.display()),
        }
    }

    /// Write a value at a dotted key path, creating intermediate objects.
    ///
    /// Existing non-object values on the path are never replaced.
    pub fn merge_value(&mut self, key: &str, value: Value) -> MergeOutcome {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.iter().any(|p| is_reserved_segment(p)) {
            return MergeOutcome::SkippedReserved;
        }
        insert_nested(&mut self.data, &parts, value)
    }

    pub fn value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Serialized form: 2-space indentation and one trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(&self.data).context("Failed to serialize JSON")?;
        Ok(format!("{}\n", content))
    }

    /// Overwrite the file with the serialized document.
    pub fn save(&self) -> Result<()> {
        let content = self.to_json_string()?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))?;
        Ok(())
    }
}

pub fn is_reserved_segment(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}

/// Copy the reference value of every missing key into the target
/// dictionary and overwrite the target file.
///
/// The file is only written when at least one key was merged.
pub fn fill_missing_keys(
    reference: &LocaleDictionary,
    target: &LocaleDictionary,
    missing: &[String],
) -> Result<FixOutcome> {
    let mut writer = JsonWriter::from_value(Path::new(&target.file_path), target.value.clone())?;
    let mut outcome = FixOutcome::default();

    for key in missing {
        let merged = match reference.get(key) {
            Some(value) => writer.merge_value(key, value.clone()),
            None => MergeOutcome::SkippedBlocked,
        };
        if merged.is_written() {
            outcome.fixed.push(key.clone());
        } else {
            tracing::debug!(key = %key, outcome = ?merged, "skipped key");
            outcome.skipped.push(key.clone());
        }
    }

    if !outcome.fixed.is_empty() {
        writer.save()?;
        tracing::debug!(
            file = %target.file_path,
            count = outcome.fixed.len(),
            "wrote missing keys"
        );
    }

    Ok(outcome)
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) -> MergeOutcome {
    let Some((first, rest)) = path.split_first() else {
        return MergeOutcome::SkippedBlocked;
    };

    if rest.is_empty() {
        let action = if root.contains_key(*first) {
            MergeOutcome::Updated
        } else {
            MergeOutcome::Added
        };
        root.insert(first.to_string(), value);
        return action;
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    match next_level {
        Value::Object(inner) => insert_nested(inner, rest, value),
        _ => MergeOutcome::SkippedBlocked,
    }
}
