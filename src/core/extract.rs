//! Per-file extraction over the whole source tree.
//!
//! Extraction of one file is pure, so files are processed in parallel and
//! collected back in input order. The result is identical to a sequential
//! run.

use std::fs;

use rayon::prelude::*;

use crate::{
    core::{
        DynamicReference, SourceReference,
        parsers::source::extract_references,
        resolve::{file_namespace, resolve_references},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
};

/// Resolved references of one source file.
#[derive(Debug, Default)]
pub struct FileReferences {
    pub file_path: String,
    /// Namespace unprefixed keys of this file resolve to.
    pub namespace: String,
    pub references: Vec<SourceReference>,
    pub dynamic: Vec<DynamicReference>,
    /// References dropped because their key was empty.
    pub discarded: usize,
}

/// Extraction output for a set of files.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    /// One entry per readable file, in input order.
    pub files: Vec<FileReferences>,
    /// Files that could not be read.
    pub errors: Vec<ParseErrorIssue>,
}

impl ExtractionResult {
    pub fn static_count(&self) -> usize {
        self.files.iter().map(|f| f.references.len()).sum()
    }

    pub fn dynamic_count(&self) -> usize {
        self.files.iter().map(|f| f.dynamic.len()).sum()
    }

    /// Dynamic references of all files, in file order.
    pub fn dynamic(&self) -> impl Iterator<Item = &DynamicReference> {
        self.files.iter().flat_map(|f| f.dynamic.iter())
    }
}

/// Extract and resolve the references of one file's text.
pub fn extract_source(
    source: &str,
    file_path: &str,
    default_namespace: &str,
    known_namespaces: &[String],
) -> FileReferences {
    let extracted = extract_references(source, file_path);
    let namespace = file_namespace(&extracted.namespaces, default_namespace).to_string();
    let resolved = resolve_references(extracted.references, &namespace, known_namespaces);

    FileReferences {
        file_path: file_path.to_string(),
        namespace,
        references: resolved.references,
        dynamic: extracted.dynamic,
        discarded: resolved.discarded,
    }
}

/// Read and extract every file.
///
/// Unreadable files are skipped with a warning and returned as errors.
pub fn extract_files(
    files: &[String],
    default_namespace: &str,
    known_namespaces: &[String],
) -> ExtractionResult {
    let results: Vec<_> = files
        .par_iter()
        .map(|file_path| match fs::read_to_string(file_path) {
            Ok(source) => Ok(extract_source(
                &source,
                file_path,
                default_namespace,
                known_namespaces,
            )),
            Err(e) => Err(ParseErrorIssue {
                file_path: file_path.clone(),
                error: format!("Failed to read file: {}", e),
                file_type: ParseErrorFileType::Source,
            }),
        })
        .collect();

    let mut extraction = ExtractionResult::default();
    for result in results {
        match result {
            Ok(file) => extraction.files.push(file),
            Err(issue) => {
                tracing::warn!(file = %issue.file_path, error = %issue.error, "skipping unreadable file");
                extraction.errors.push(issue);
            }
        }
    }

    tracing::debug!(
        files = extraction.files.len(),
        static_refs = extraction.static_count(),
        dynamic_refs = extraction.dynamic_count(),
        "extracted references"
    );

    extraction
}
