use anyhow::Result;

use super::{
    CommandResult, CommandSummary, ScanSummary,
    helper::{finish, sorted},
};
use crate::{
    cli::args::ScanCommand,
    core::{
        CheckContext,
        extract::extract_files,
        report::{DynamicEntry, FileError, KeyEntry, UsageReport, UsageSummary},
    },
    issues::Issue,
    rules::{exposure::classify_references, unused::check_unused_keys},
};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let locale = match cmd.locale.as_deref() {
        Some(locale) => {
            ctx.validate_locale(locale)?;
            locale
        }
        None => ctx.reference_locale(),
    };

    let index = ctx.load_index(locale);
    tracing::debug!(locale, keys = index.key_count(), "loaded key index");

    let sources = ctx.source_files();
    let extraction = extract_files(
        &sources.files,
        &ctx.config.default_namespace,
        ctx.namespaces(),
    );

    let analysis = classify_references(&extraction.files, &index);
    let unused = cmd
        .unused
        .then(|| check_unused_keys(&analysis.used_keys, &index));

    let report = UsageReport {
        locale: locale.to_string(),
        summary: UsageSummary {
            files_scanned: extraction.files.len(),
            static_references: extraction.static_count(),
            dynamic_references: extraction.dynamic_count(),
            exposed: analysis.exposed.len(),
            covered: analysis.covered.len(),
            unused: unused.as_ref().map(Vec::len),
        },
        exposed: analysis.exposed.iter().map(KeyEntry::from).collect(),
        covered: analysis.covered.iter().map(KeyEntry::from).collect(),
        unused: unused
            .as_ref()
            .map(|issues| issues.iter().map(KeyEntry::from).collect()),
        dynamic: extraction.dynamic().map(DynamicEntry::from).collect(),
        skipped_files: extraction.errors.iter().map(FileError::from).collect(),
        parse_errors: index.parse_errors.iter().map(FileError::from).collect(),
    };

    let hidden_covered = if cmd.all { 0 } else { analysis.covered.len() };

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(analysis.exposed.into_iter().map(Issue::ExposedKey));
    if cmd.all {
        issues.extend(analysis.covered.into_iter().map(Issue::CoveredKey));
    }
    if let Some(unused) = unused {
        issues.extend(unused.into_iter().map(Issue::UnusedKey));
    }
    issues.extend(index.parse_errors.into_iter().map(Issue::ParseError));

    let dynamic = if ctx.verbose {
        extraction.dynamic().cloned().collect()
    } else {
        Vec::new()
    };

    let summary = ScanSummary {
        report,
        issues: sorted(issues),
        hidden_covered,
        dynamic,
    };

    Ok(finish(CommandSummary::Scan(summary), cmd.json))
}
