use serde_json::Value;

use crate::core::parsers::json::{
    build_line_index, empty_keys, find_key_line, flatten_keys, lookup_path,
};

/// Position information in locale dictionary files (JSON).
///
/// Represents a specific location in a dictionary file, used for error
/// reporting when a key is defined but never referenced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the dictionary file (e.g., "./locales/en/common.json").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col: 1,
        }
    }
}

/// Position with context information in dictionary files.
///
/// Contains the key and a display form of the value at this location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// The dotted key path (e.g., "buttons.save").
    pub key: String,
    /// The value, rendered for display.
    pub value: String,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
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

/// One parsed dictionary: a single (locale, namespace) JSON document.
///
/// The raw text is kept next to the parsed value so keys can be mapped back
/// to the line they are defined on.
#[derive(Debug, Clone)]
pub struct LocaleDictionary {
    /// Locale code (e.g., "en", "de").
    pub locale: String,
    /// Namespace name (e.g., "common", "medical").
    pub namespace: String,
    /// Path of the dictionary file.
    pub file_path: String,
    /// Parsed JSON document.
    pub value: Value,
    content: String,
    line_index: Vec<usize>,
}

impl LocaleDictionary {
    pub fn new(
        locale: impl Into<String>,
        namespace: impl Into<String>,
        file_path: impl Into<String>,
        content: impl Into<String>,
        value: Value,
    ) -> Self {
        let content = content.into();
        let line_index = build_line_index(&content);
        Self {
            locale: locale.into(),
            namespace: namespace.into(),
            file_path: file_path.into(),
            value,
            content,
            line_index,
        }
    }

    /// Flattened key paths in document order.
    pub fn keys(&self) -> Vec<String> {
        flatten_keys(&self.value)
    }

    /// Key paths whose value is a whitespace-only string.
    pub fn empty_keys(&self) -> Vec<String> {
        empty_keys(&self.value)
    }

    /// Look up the value at a dotted key path.
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        lookup_path(&self.value, key_path)
    }

    /// Line (1-based) where the key is defined, or 1 if it cannot be located.
    pub fn key_line(&self, key_path: &str) -> usize {
        find_key_line(&self.content, key_path, &self.line_index)
    }

    /// Build a report context for a key of this dictionary.
    pub fn context_for(&self, key_path: &str) -> MessageContext {
        let value = match self.get(key_path) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        MessageContext::new(
            MessageLocation::with_line(&self.file_path, self.key_line(key_path)),
            key_path,
            value,
        )
    }
}
