//! Line-based extraction of translation key references from source text.
//!
//! This is pattern matching, not parsing. Calls split across lines or
//! written in unusual shapes are not seen.
//!
//! Known false positives of the `<base>Key:` property shape:
//!
//! - TypeScript annotations with string literal types:
//!   `variantKey: 'primary' | 'secondary'` yields a reference to `primary`.
//! - Ternaries whose middle operand ends in `Key`:
//!   `ok ? labelKey : 'none'` yields a reference to `none`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::{DynamicReference, Provenance, RawReference, SourceContext, SourceLocation};

/// Lines searched before and after a key-valued property for a sibling
/// fallback property.
pub const FALLBACK_WINDOW: usize = 5;

/// First-argument identifiers that are never translation keys.
const NON_TRANSLATABLE: &[&str] = &["true", "false", "null", "undefined", "this", "void"];

// Matches `t(` or `i18n.t(` / `i18next.t(` and captures the first argument:
// a quoted literal, a template literal, or an identifier/member expression.
static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?:^|[^\w$.])(?P<callee>(?:[A-Za-z_$][\w$]*\.)*t)\(\s*"#,
        r#"(?:'(?P<single>(?:[^'\\]|\\.)*)'"#,
        r#"|"(?P<double>(?:[^"\\]|\\.)*)""#,
        r#"|`(?P<template>(?:[^`\\]|\\.)*)`"#,
        r#"|(?P<expr>[A-Za-z_$][\w$]*(?:\??\.[A-Za-z_$][\w$]*|\[[^\]]*\])*))"#,
    ))
    .unwrap()
});

// Matches `labelKey: 'value'` (optionally quoted property name).
static PROPERTY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?:^|[^\w$])["']?(?P<base>[A-Za-z_$][\w$]*)Key["']?\s*:\s*"#,
        r#"(?:'(?P<single>(?:[^'\\]|\\.)*)'"#,
        r#"|"(?P<double>(?:[^"\\]|\\.)*)""#,
        r#"|`(?P<template>(?:[^`\\]|\\.)*)`)"#,
    ))
    .unwrap()
});

// Matches any `name:` property, used to find fallback siblings.
static PROPERTY_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[^\w$.])["']?(?P<name>[A-Za-z_$][\w$]*)["']?\s*:"#).unwrap()
});

// Matches `useTranslation('ns')` and `useTranslation(['ns1', 'ns2'])`.
static HOOK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"useTranslation\(\s*(?:'(?P<single>[^']*)'|"(?P<double>[^"]*)"|\[(?P<list>[^\]]*)\])"#,
    )
    .unwrap()
});

static QUOTED_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).unwrap());

/// Everything extracted from one source file, in encounter order.
#[derive(Debug, Default)]
pub struct ExtractResult {
    /// Namespaces declared by translation hooks, first declared first.
    pub namespaces: Vec<String>,
    pub references: Vec<RawReference>,
    pub dynamic: Vec<DynamicReference>,
}

/// Extract every key reference from a source file.
pub fn extract_references(source: &str, file_path: &str) -> ExtractResult {
    let lines: Vec<&str> = source.lines().collect();
    let mut result = ExtractResult {
        namespaces: declared_namespaces(source),
        ..Default::default()
    };

    for (idx, line) in lines.iter().enumerate() {
        extract_calls(line, idx + 1, file_path, &mut result);
        extract_properties(&lines, idx, file_path, &mut result);
    }

    // Calls and properties are collected in two passes per line.
    result
        .references
        .sort_by_key(|r| (r.context.line(), r.context.col()));
    result
        .dynamic
        .sort_by_key(|r| (r.context.line(), r.context.col()));

    result
}

/// Namespaces named by `useTranslation(...)` hooks, deduplicated.
pub fn declared_namespaces(source: &str) -> Vec<String> {
    let mut namespaces: Vec<String> = Vec::new();
    let mut push = |ns: &str| {
        if !ns.is_empty() && !namespaces.iter().any(|n| n == ns) {
            namespaces.push(ns.to_string());
        }
    };

    for caps in HOOK_REGEX.captures_iter(source) {
        if let Some(m) = caps.name("single").or_else(|| caps.name("double")) {
            push(m.as_str());
        } else if let Some(list) = caps.name("list") {
            for quoted in QUOTED_STRING_REGEX.captures_iter(list.as_str()) {
                if let Some(m) = quoted.get(1).or_else(|| quoted.get(2)) {
                    push(m.as_str());
                }
            }
        }
    }
    namespaces
}

fn extract_calls(line: &str, line_num: usize, file_path: &str, result: &mut ExtractResult) {
    for caps in CALL_REGEX.captures_iter(line) {
        let Some(callee) = caps.name("callee") else {
            continue;
        };
        let context = make_context(file_path, line, line_num, callee.start());
        let match_end = caps.get(0).map_or(line.len(), |m| m.end());

        if let Some(key) = quoted_literal(&caps) {
            result.references.push(RawReference {
                raw_key: key.to_string(),
                has_fallback: has_fallback_argument(&line[match_end..]),
                provenance: Provenance::Call,
                context,
            });
        } else if let Some(template) = caps.name("template") {
            let template = template.as_str();
            if template.contains("${") {
                result.dynamic.push(DynamicReference {
                    expression: format!("`{}`", template),
                    provenance: Provenance::Call,
                    context,
                });
            } else {
                result.references.push(RawReference {
                    raw_key: template.to_string(),
                    has_fallback: has_fallback_argument(&line[match_end..]),
                    provenance: Provenance::Call,
                    context,
                });
            }
        } else if let Some(expr) = caps.name("expr") {
            let expr = expr.as_str();
            if !NON_TRANSLATABLE.contains(&expr) {
                result.dynamic.push(DynamicReference {
                    expression: expr.to_string(),
                    provenance: Provenance::Call,
                    context,
                });
            }
        }
    }
}

fn extract_properties(lines: &[&str], idx: usize, file_path: &str, result: &mut ExtractResult) {
    let line = lines[idx];
    for caps in PROPERTY_REGEX.captures_iter(line) {
        let Some(base) = caps.name("base") else {
            continue;
        };
        let context = make_context(file_path, line, idx + 1, base.start());

        let key = match quoted_literal(&caps) {
            Some(key) => key,
            None => match caps.name("template") {
                Some(t) if t.as_str().contains("${") => {
                    result.dynamic.push(DynamicReference {
                        expression: format!("`{}`", t.as_str()),
                        provenance: Provenance::Property,
                        context,
                    });
                    continue;
                }
                Some(t) => t.as_str(),
                None => continue,
            },
        };

        result.references.push(RawReference {
            raw_key: key.to_string(),
            has_fallback: has_sibling_property(lines, idx, base.as_str()),
            provenance: Provenance::Property,
            context,
        });
    }
}

fn quoted_literal<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.name("single")
        .or_else(|| caps.name("double"))
        .map(|m| m.as_str())
}

/// True if the text after the first argument starts a second argument that
/// is a string or template literal.
fn has_fallback_argument(rest: &str) -> bool {
    match rest.trim_start().strip_prefix(',') {
        Some(second) => second.trim_start().starts_with(['\'', '"', '`']),
        None => false,
    }
}

/// True if a property named `base` appears within the fallback window.
fn has_sibling_property(lines: &[&str], idx: usize, base: &str) -> bool {
    let start = idx.saturating_sub(FALLBACK_WINDOW);
    let end = (idx + FALLBACK_WINDOW).min(lines.len().saturating_sub(1));

    lines[start..=end].iter().any(|line| {
        PROPERTY_NAME_REGEX
            .captures_iter(line)
            .any(|caps| caps.name("name").is_some_and(|m| m.as_str() == base))
    })
}

fn make_context(file_path: &str, line: &str, line_num: usize, byte_start: usize) -> SourceContext {
    let col = line[..byte_start].chars().count() + 1;
    SourceContext::new(SourceLocation::new(file_path, line_num, col), line)
}
