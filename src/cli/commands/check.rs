use std::path::Path;

use anyhow::{Result, bail};

use super::{CommandResult, CommandSummary, helper::finish};
use crate::{
    cli::args::CheckCommand,
    core::{
        CheckContext, LocaleDictionary,
        json_writer::fill_missing_keys,
        parsers::json::{dictionary_path, load_dictionary},
        report::{ConsistencyReport, NamespaceResult},
    },
    rules::consistency::compare_dictionaries,
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let locales: Vec<&str> = match cmd.locale.as_deref() {
        Some(locale) => {
            ctx.validate_locale(locale)?;
            if locale == ctx.reference_locale() {
                bail!(
                    "'{}' is the reference locale. Valid locales: {}",
                    locale,
                    ctx.target_locales().join(", ")
                );
            }
            vec![locale]
        }
        None => ctx.target_locales(),
    };

    let namespaces: Vec<&str> = match cmd.namespace.as_deref() {
        Some(namespace) => {
            ctx.validate_namespace(namespace)?;
            vec![namespace]
        }
        None => ctx.namespaces().iter().map(String::as_str).collect(),
    };

    let mut report = ConsistencyReport::new(ctx.reference_locale(), cmd.fix);

    for namespace in namespaces {
        let reference_path = dictionary_path(&ctx.messages_root, ctx.reference_locale(), namespace);
        let reference = load_dictionary(&ctx.messages_root, ctx.reference_locale(), namespace);

        for &locale in &locales {
            let result = match &reference {
                Ok(Some(reference)) => {
                    check_namespace(&ctx.messages_root, reference, locale, cmd.fix)?
                }
                Ok(None) => NamespaceResult::missing_reference(display_path(&reference_path)),
                Err(e) => {
                    NamespaceResult::parse_error(display_path(&reference_path), format!("{:#}", e))
                }
            };
            tracing::debug!(locale, namespace, status = result.status.as_str(), "checked");
            report.insert(locale, namespace, result);
        }
    }

    report.summarize();
    Ok(finish(CommandSummary::Check(report), cmd.json))
}

/// Compare one target dictionary with the reference, repairing it in fix mode.
fn check_namespace(
    messages_root: &Path,
    reference: &LocaleDictionary,
    locale: &str,
    fix: bool,
) -> Result<NamespaceResult> {
    let namespace = reference.namespace.as_str();
    let target = match load_dictionary(messages_root, locale, namespace) {
        Ok(Some(target)) => target,
        Ok(None) => {
            let path = dictionary_path(messages_root, locale, namespace);
            return Ok(NamespaceResult::missing_file(display_path(&path)));
        }
        Err(e) => {
            let path = dictionary_path(messages_root, locale, namespace);
            return Ok(NamespaceResult::parse_error(
                display_path(&path),
                format!("{:#}", e),
            ));
        }
    };

    let comparison = compare_dictionaries(reference, &target);
    let mut result = NamespaceResult::compared(&target.file_path, comparison);
    result.lines = result
        .extra
        .iter()
        .chain(&result.empty)
        .map(|key| (key.clone(), target.key_line(key)))
        .collect();

    if fix && !result.missing.is_empty() {
        let outcome = fill_missing_keys(reference, &target, &result.missing)?;
        result.fixed = outcome.fixed;
        result.skipped = outcome.skipped;
    }

    Ok(result)
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
