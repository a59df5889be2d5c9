//! Issue types for key usage analysis results.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it (console or JSON).

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, Provenance, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ExposedKey,
    CoveredKey,
    UnusedKey,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ExposedKey => write!(f, "exposed-key"),
            Rule::CoveredKey => write!(f, "covered-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Key Usage
// ============================================================

/// Why a referenced key is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureReason {
    /// The namespace is known but the key is not in its dictionary.
    MissingKey,
    /// The namespace is not part of the configured vocabulary, or the
    /// checked locale has no readable dictionary for it.
    UnknownNamespace,
}

impl std::fmt::Display for ExposureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExposureReason::MissingKey => write!(f, "missing key"),
            ExposureReason::UnknownNamespace => write!(f, "unknown namespace"),
        }
    }
}

/// All references to one (namespace, key) pair, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub namespace: String,
    pub key: String,
    /// How the first reference was written.
    pub provenance: Provenance,
    /// First reference encountered.
    pub context: SourceContext,
    /// Every later reference.
    pub others: Vec<SourceContext>,
}

impl KeyUsage {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>, context: SourceContext) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            provenance: Provenance::Call,
            context,
            others: Vec::new(),
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// `namespace:key`, the form a prefixed call would use.
    pub fn qualified_key(&self) -> String {
        format!("{}:{}", self.namespace, self.key)
    }

    /// `file:line` for every reference, first one first.
    pub fn locations(&self) -> Vec<String> {
        std::iter::once(&self.context)
            .chain(&self.others)
            .map(|ctx| ctx.location.to_string())
            .collect()
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// Key referenced without a fallback and absent from the reference locale.
/// The raw key would be rendered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedKeyIssue {
    pub usage: KeyUsage,
    pub reason: ExposureReason,
}

impl ExposedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ExposedKey
    }
}

/// Key referenced with an inline fallback but absent from the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveredKeyIssue {
    pub usage: KeyUsage,
}

impl CoveredKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::CoveredKey
    }
}

// ============================================================
// Issue Types - Dictionary Files (MessageContext)
// ============================================================

/// Key defined in the reference locale but never referenced statically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub namespace: String,
    pub context: MessageContext,
}

impl UnusedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedKey
    }
}

// ============================================================
// Special Issue Types
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorFileType {
    Source,
    Message,
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub file_type: ParseErrorFileType,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found by the scanner.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ExposedKey(ExposedKeyIssue),
    CoveredKey(CoveredKeyIssue),
    UnusedKey(UnusedKeyIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ExposedKey(_) => ExposedKeyIssue::severity(),
            Issue::CoveredKey(_) => CoveredKeyIssue::severity(),
            Issue::UnusedKey(_) => UnusedKeyIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ExposedKey(_) => ExposedKeyIssue::rule(),
            Issue::CoveredKey(_) => CoveredKeyIssue::rule(),
            Issue::UnusedKey(_) => UnusedKeyIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// Dictionary file location (no source_line, but has key/value).
    Message(&'a MessageContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls on
/// the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Further references to the same key, after the reported location.
    fn usages(&self) -> &[SourceContext] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ExposedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.usage.context)
    }

    fn message(&self) -> String {
        self.usage.qualified_key()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.reason {
            ExposureReason::MissingKey => {
                Some("add the key to the reference locale or pass a fallback string")
            }
            ExposureReason::UnknownNamespace => None,
        }
    }

    fn details(&self) -> Option<String> {
        match self.reason {
            ExposureReason::MissingKey => None,
            ExposureReason::UnknownNamespace => Some(format!(
                "namespace '{}' is not configured or has no dictionary in this locale",
                self.usage.namespace
            )),
        }
    }

    fn usages(&self) -> &[SourceContext] {
        &self.usage.others
    }
}

impl Report for CoveredKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.usage.context)
    }

    fn message(&self) -> String {
        self.usage.qualified_key()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("rendered from an inline fallback".to_string())
    }

    fn usages(&self) -> &[SourceContext] {
        &self.usage.others
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        format!("{}:{}", self.namespace, self.context.key)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.context.value))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.line,
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.col,
            ReportLocation::Message(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
