use std::fmt;

use serde::Serialize;

/// Pure position information in source code files (TS/TSX/JS/JSX).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Rendered as `file:line`, the form used in reports.
impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line)
    }
}

/// Position with context information in source code files.
///
/// Carries the source line so the reporter can show the offending call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// How a reference was found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// `t('key')`, `i18n.t('key')`
    Call,
    /// `{ titleKey: 'key' }`
    Property,
}

/// A statically-known key reference as written in the source, before
/// namespace resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    /// Key as written, possibly `namespace:`-prefixed.
    pub raw_key: String,
    /// Whether an inline fallback string renders when the key is absent.
    pub has_fallback: bool,
    pub provenance: Provenance,
    pub context: SourceContext,
}

/// A reference resolved to a concrete (namespace, key) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    pub namespace: String,
    pub key: String,
    pub has_fallback: bool,
    pub provenance: Provenance,
    pub context: SourceContext,
}

impl SourceReference {
    pub fn from_raw(raw: RawReference, namespace: String, key: String) -> Self {
        Self {
            namespace,
            key,
            has_fallback: raw.has_fallback,
            provenance: raw.provenance,
            context: raw.context,
        }
    }
}

/// A reference whose key is only known at runtime (`t(key)`,
/// `` t(`a.${b}`) ``). Reported for visibility, never classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicReference {
    /// Expression text exactly as written.
    pub expression: String,
    pub provenance: Provenance,
    pub context: SourceContext,
}
