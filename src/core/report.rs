//! Report documents printed by `--json`.
//!
//! The console reporter reads the same values, so both outputs always
//! agree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    core::{DynamicReference, Provenance},
    issues::{CoveredKeyIssue, ExposedKeyIssue, ParseErrorIssue, UnusedKeyIssue},
    rules::consistency::KeyComparison,
};

// ============================================================
// Checker
// ============================================================

/// State of one (locale, namespace) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceStatus {
    /// Keys match the reference.
    Ok,
    /// Missing, extra or empty keys were found.
    Issues,
    /// The target dictionary does not exist.
    MissingFile,
    /// The reference dictionary does not exist; nothing to compare against.
    MissingReference,
    /// One of the two dictionaries is malformed.
    ParseError,
}

impl NamespaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamespaceStatus::Ok => "ok",
            NamespaceStatus::Issues => "issues",
            NamespaceStatus::MissingFile => "missing-file",
            NamespaceStatus::MissingReference => "missing-reference",
            NamespaceStatus::ParseError => "parse-error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyCounts {
    pub missing: usize,
    pub extra: usize,
    pub empty: usize,
}

/// Comparison result of one (locale, namespace) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceResult {
    pub status: NamespaceStatus,
    /// Dictionary the status refers to (the reference one for
    /// `missing-reference` and reference parse errors).
    pub file_path: String,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub empty: Vec<String>,
    pub counts: KeyCounts,
    /// Missing keys written by fix mode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed: Vec<String>,
    /// Missing keys fix mode refused to write.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Line of each extra or empty key in the target file.
    #[serde(skip)]
    pub lines: BTreeMap<String, usize>,
}

impl NamespaceResult {
    fn without_comparison(status: NamespaceStatus, file_path: impl Into<String>) -> Self {
        Self {
            status,
            file_path: file_path.into(),
            missing: Vec::new(),
            extra: Vec::new(),
            empty: Vec::new(),
            counts: KeyCounts::default(),
            fixed: Vec::new(),
            skipped: Vec::new(),
            error: None,
            lines: BTreeMap::new(),
        }
    }

    pub fn compared(file_path: impl Into<String>, comparison: KeyComparison) -> Self {
        let status = if comparison.is_consistent() {
            NamespaceStatus::Ok
        } else {
            NamespaceStatus::Issues
        };
        Self {
            counts: KeyCounts {
                missing: comparison.missing.len(),
                extra: comparison.extra.len(),
                empty: comparison.empty.len(),
            },
            missing: comparison.missing,
            extra: comparison.extra,
            empty: comparison.empty,
            ..Self::without_comparison(status, file_path)
        }
    }

    pub fn missing_file(file_path: impl Into<String>) -> Self {
        Self::without_comparison(NamespaceStatus::MissingFile, file_path)
    }

    pub fn missing_reference(file_path: impl Into<String>) -> Self {
        Self::without_comparison(NamespaceStatus::MissingReference, file_path)
    }

    pub fn parse_error(file_path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::without_comparison(NamespaceStatus::ParseError, file_path)
        }
    }

    /// Missing keys still absent from the target file after this run.
    pub fn unfixed_count(&self, fix_mode: bool) -> usize {
        if fix_mode {
            self.missing.len() - self.fixed.len()
        } else {
            self.missing.len()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySummary {
    pub locales_checked: usize,
    pub namespaces_checked: usize,
    pub missing_keys: usize,
    pub extra_keys: usize,
    pub empty_keys: usize,
    pub missing_files: usize,
    pub parse_errors: usize,
    pub fixed_keys: usize,
    pub skipped_keys: usize,
}

/// Checker output: locale → namespace → result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub reference_locale: String,
    pub locales: BTreeMap<String, BTreeMap<String, NamespaceResult>>,
    pub summary: ConsistencySummary,
    #[serde(skip)]
    pub fix_mode: bool,
}

impl ConsistencyReport {
    pub fn new(reference_locale: impl Into<String>, fix_mode: bool) -> Self {
        Self {
            reference_locale: reference_locale.into(),
            locales: BTreeMap::new(),
            summary: ConsistencySummary::default(),
            fix_mode,
        }
    }

    pub fn insert(&mut self, locale: &str, namespace: &str, result: NamespaceResult) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .insert(namespace.to_string(), result);
    }

    /// Recompute the summary from the per-namespace results.
    pub fn summarize(&mut self) {
        let mut summary = ConsistencySummary {
            locales_checked: self.locales.len(),
            ..Default::default()
        };

        for result in self.locales.values().flat_map(|ns| ns.values()) {
            summary.namespaces_checked += 1;
            summary.missing_keys += result.counts.missing;
            summary.extra_keys += result.counts.extra;
            summary.empty_keys += result.counts.empty;
            summary.fixed_keys += result.fixed.len();
            summary.skipped_keys += result.skipped.len();
            match result.status {
                NamespaceStatus::MissingFile => summary.missing_files += 1,
                NamespaceStatus::ParseError => summary.parse_errors += 1,
                _ => {}
            }
        }

        self.summary = summary;
    }

    /// Missing keys, missing target files and malformed dictionaries that
    /// still need attention after this run.
    pub fn problem_count(&self) -> usize {
        self.locales
            .values()
            .flat_map(|ns| ns.values())
            .map(|result| match result.status {
                NamespaceStatus::MissingFile | NamespaceStatus::ParseError => 1,
                _ => result.unfixed_count(self.fix_mode),
            })
            .sum()
    }
}

// ============================================================
// Scanner
// ============================================================

/// One deduplicated key with every place it is referenced or defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    pub namespace: String,
    pub key: String,
    /// `file:line`, in encounter order.
    pub locations: Vec<String>,
    /// Shape of the first reference; absent for dictionary keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&ExposedKeyIssue> for KeyEntry {
    fn from(issue: &ExposedKeyIssue) -> Self {
        Self {
            namespace: issue.usage.namespace.clone(),
            key: issue.usage.key.clone(),
            locations: issue.usage.locations(),
            provenance: Some(issue.usage.provenance),
            reason: Some(issue.reason.to_string()),
        }
    }
}

impl From<&CoveredKeyIssue> for KeyEntry {
    fn from(issue: &CoveredKeyIssue) -> Self {
        Self {
            namespace: issue.usage.namespace.clone(),
            key: issue.usage.key.clone(),
            locations: issue.usage.locations(),
            provenance: Some(issue.usage.provenance),
            reason: None,
        }
    }
}

impl From<&UnusedKeyIssue> for KeyEntry {
    fn from(issue: &UnusedKeyIssue) -> Self {
        Self {
            namespace: issue.namespace.clone(),
            key: issue.context.key.clone(),
            locations: vec![format!(
                "{}:{}",
                issue.context.file_path(),
                issue.context.line()
            )],
            provenance: None,
            reason: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicEntry {
    pub expression: String,
    pub location: String,
    pub provenance: Provenance,
}

impl From<&DynamicReference> for DynamicEntry {
    fn from(reference: &DynamicReference) -> Self {
        Self {
            expression: reference.expression.clone(),
            location: reference.context.location.to_string(),
            provenance: reference.provenance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileError {
    pub file_path: String,
    pub error: String,
}

impl From<&ParseErrorIssue> for FileError {
    fn from(issue: &ParseErrorIssue) -> Self {
        Self {
            file_path: issue.file_path.clone(),
            error: issue.error.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub files_scanned: usize,
    pub static_references: usize,
    pub dynamic_references: usize,
    pub exposed: usize,
    pub covered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused: Option<usize>,
}

/// Scanner output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    /// Locale the references were checked against.
    pub locale: String,
    pub summary: UsageSummary,
    pub exposed: Vec<KeyEntry>,
    pub covered: Vec<KeyEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused: Option<Vec<KeyEntry>>,
    pub dynamic: Vec<DynamicEntry>,
    /// Source files that could not be read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_files: Vec<FileError>,
    /// Dictionaries of the checked locale that could not be parsed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parse_errors: Vec<FileError>,
}

impl UsageReport {
    pub fn problem_count(&self) -> usize {
        self.exposed.len() + self.parse_errors.len()
    }
}
