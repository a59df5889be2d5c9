//! Report formatting and printing utilities.
//!
//! Scanner issues are displayed cargo-style; checker results are grouped by
//! locale and namespace. Kept separate from core logic so keycheck can be
//! used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    DynamicReference, SourceContext,
    report::{ConsistencyReport, NamespaceResult, NamespaceStatus},
};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of further usages to display per issue.
const MAX_USAGES_DISPLAY: usize = 3;

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    if result.json {
        return print_json(&result.summary);
    }

    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Check(report) => print_consistency_to(report, verbose, stdout),
        CommandSummary::Scan(summary) => print_scan_to(summary, stdout),
        CommandSummary::Init(summary) => print_init(summary),
    }
    Ok(())
}

fn print_json(summary: &CommandSummary) -> Result<()> {
    let json = match summary {
        CommandSummary::Check(report) => serde_json::to_string_pretty(report),
        CommandSummary::Scan(summary) => serde_json::to_string_pretty(&summary.report),
        CommandSummary::Init(summary) => {
            print_init(summary);
            return Ok(());
        }
    }
    .context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

// ============================================================
// Checker
// ============================================================

/// Print checker results grouped by locale, then namespace.
pub fn print_consistency_to<W: Write>(report: &ConsistencyReport, verbose: bool, writer: &mut W) {
    for (locale, namespaces) in &report.locales {
        let _ = writeln!(
            writer,
            "{} {}",
            locale.bold(),
            format!("(compared with {})", report.reference_locale).dimmed()
        );

        for (namespace, result) in namespaces {
            print_namespace(namespace, result, verbose, writer);
        }
        let _ = writeln!(writer);
    }

    print_consistency_summary(report, writer);
}

fn print_namespace<W: Write>(namespace: &str, result: &NamespaceResult, verbose: bool, writer: &mut W) {
    match result.status {
        NamespaceStatus::Ok => {
            let _ = writeln!(writer, "  {} {}", SUCCESS_MARK.green(), namespace);
        }
        NamespaceStatus::Issues => {
            let mark = if result.counts.missing > 0 {
                FAILURE_MARK.red()
            } else {
                "!".yellow()
            };
            let _ = writeln!(
                writer,
                "  {} {}  {} missing, {} extra, {} empty  {}",
                mark,
                namespace,
                result.counts.missing,
                result.counts.extra,
                result.counts.empty,
                result.file_path.dimmed()
            );
            print_keys(result, verbose, writer);
        }
        NamespaceStatus::MissingFile => {
            let _ = writeln!(
                writer,
                "  {} {}  {} {}",
                FAILURE_MARK.red(),
                namespace,
                "locale file not found:".red(),
                result.file_path
            );
        }
        NamespaceStatus::MissingReference => {
            let _ = writeln!(
                writer,
                "  {} {}  {} {}",
                "-".dimmed(),
                namespace,
                "reference file not found:".dimmed(),
                result.file_path
            );
        }
        NamespaceStatus::ParseError => {
            let _ = writeln!(
                writer,
                "  {} {}  {} {}",
                FAILURE_MARK.red(),
                namespace,
                "parse error:".red(),
                result.error.as_deref().unwrap_or(&result.file_path)
            );
        }
    }
}

fn print_keys<W: Write>(result: &NamespaceResult, verbose: bool, writer: &mut W) {
    let line_suffix = |key: &str| match result.lines.get(key) {
        Some(line) if verbose => format!("  {}", format!("(line {})", line).dimmed()),
        _ => String::new(),
    };

    for key in &result.missing {
        let status = if result.fixed.contains(key) {
            format!("  {}", "fixed".green())
        } else if result.skipped.contains(key) {
            format!("  {}", "skipped".yellow())
        } else {
            String::new()
        };
        let _ = writeln!(writer, "      {} {}{}", "missing".red(), key, status);
    }
    for key in &result.extra {
        let _ = writeln!(writer, "      {} {}{}", "extra".yellow(), key, line_suffix(key));
    }
    for key in &result.empty {
        let _ = writeln!(writer, "      {} {}{}", "empty".yellow(), key, line_suffix(key));
    }
}

fn print_consistency_summary<W: Write>(report: &ConsistencyReport, writer: &mut W) {
    let summary = &report.summary;
    let problems = report.problem_count();

    if summary.fixed_keys > 0 || summary.skipped_keys > 0 {
        let _ = writeln!(
            writer,
            "{} {} key(s), {} {} key(s)",
            "Fixed".green().bold(),
            summary.fixed_keys,
            "skipped".yellow(),
            summary.skipped_keys
        );
    }

    if problems == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {}, {} namespace {} - no missing keys",
                summary.locales_checked,
                plural(summary.locales_checked, "locale", "locales"),
                summary.namespaces_checked,
                plural(summary.namespaces_checked, "file", "files")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} missing {}, {} missing {}, {} parse {} ({} extra, {} empty)",
            FAILURE_MARK.red(),
            summary.missing_keys,
            plural(summary.missing_keys, "key", "keys"),
            summary.missing_files,
            plural(summary.missing_files, "file", "files"),
            summary.parse_errors,
            plural(summary.parse_errors, "error", "errors"),
            summary.extra_keys,
            summary.empty_keys
        );
    }
}

// ============================================================
// Scanner
// ============================================================

pub fn print_scan_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let report = &summary.report;

    report_to(&summary.issues, writer);

    if !summary.dynamic.is_empty() {
        print_dynamic(&summary.dynamic, writer);
    }

    if summary.hidden_covered > 0 {
        let _ = writeln!(
            writer,
            "{} {} key(s) missing but rendered from a fallback (use {} to list)",
            "note:".bold(),
            summary.hidden_covered,
            "--all".cyan()
        );
    }

    if summary.issues.is_empty() {
        let files = report.summary.files_scanned;
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {} against '{}' - no exposed keys found",
                files,
                plural(files, "file", "files"),
                report.locale
            )
            .green()
        );
    }

    if !report.skipped_files.is_empty() {
        let _ = writeln!(
            io::stderr().lock(),
            "{} {} file(s) could not be read and were skipped",
            "warning:".bold().yellow(),
            report.skipped_files.len()
        );
    }
}

/// Print issues in cargo-style format.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let usages = issue.usages();
    if !usages.is_empty() {
        print_usages(usages, writer, max_line_width);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_usages<W: Write>(usages: &[SourceContext], writer: &mut W, max_line_width: usize) {
    let total = usages.len();
    let display_count = total.min(MAX_USAGES_DISPLAY);

    for (i, usage) in usages.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}:{}:{}{}",
            "",
            "=".blue(),
            "used:".bold(),
            usage.file_path(),
            usage.line(),
            usage.col(),
            suffix,
            width = max_line_width
        );
    }
}

fn print_dynamic<W: Write>(dynamic: &[DynamicReference], writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} dynamic {} not checked:",
        "note:".bold(),
        dynamic.len(),
        plural(dynamic.len(), "reference", "references")
    );
    for reference in dynamic {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}  {}",
            "-->".blue(),
            reference.context.file_path(),
            reference.context.line(),
            reference.context.col(),
            reference.expression.cyan()
        );
    }
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            plural(total_errors, "error", "errors").red(),
            total_warnings,
            plural(total_warnings, "warning", "warnings").yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col(), None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::Message(_) | ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Init
// ============================================================

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
