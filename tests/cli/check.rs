use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, json_output, stderr, stdout};

fn nested_project() -> Result<CliTest> {
    let test = CliTest::with_config()?;
    test.write_file("locales/en/common.json", r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("locales/de/common.json", r#"{"a": {}}"#)?;
    Ok(test)
}

#[test]
fn test_missing_nested_key_json() -> Result<()> {
    let test = nested_project()?;

    let output = test.check_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(report["referenceLocale"], json!("en"));
    assert_eq!(report["locales"]["de"]["common"]["status"], json!("issues"));
    assert_eq!(report["locales"]["de"]["common"]["missing"], json!(["a.b"]));
    assert_eq!(report["locales"]["de"]["common"]["extra"], json!([]));
    assert_eq!(report["summary"]["missingKeys"], json!(1));

    Ok(())
}

#[test]
fn test_console_report_lists_missing_key() -> Result<()> {
    let test = nested_project()?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("de (compared with en)"), "{}", out);
    assert!(out.contains("missing a.b"), "{}", out);

    Ok(())
}

#[test]
fn test_fix_writes_missing_keys() -> Result<()> {
    let test = nested_project()?;

    let output = test.check_command().arg("--fix").output()?;
    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout: {}\nstderr: {}",
        stdout(&output),
        stderr(&output)
    );

    assert_eq!(
        test.read_file("locales/de/common.json")?,
        "{\n  \"a\": {\n    \"b\": \"Hello\"\n  }\n}\n"
    );

    // Second run finds nothing left to do.
    let rerun = test.check_command().output()?;
    assert_eq!(rerun.status.code(), Some(0), "{}", stdout(&rerun));

    Ok(())
}

#[test]
fn test_locale_and_namespace_filters_restrict_the_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".keycheckrc.json",
        r#"{ "namespaces": ["common", "errors"] }"#,
    )?;
    test.write_file("locales/en/common.json", r#"{"a": {"b": "Hello"}}"#)?;
    test.write_file("locales/en/errors.json", r#"{"network": "Network error"}"#)?;
    for locale in ["de", "fr"] {
        test.write_file(&format!("locales/{}/common.json", locale), r#"{"a": {}}"#)?;
        test.write_file(&format!("locales/{}/errors.json", locale), "{}")?;
    }
    let filters = ["--locale", "de", "--ns", "common"];

    let output = test.check_command().args(filters).arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(
        report["locales"],
        json!({
            "de": {
                "common": {
                    "status": "issues",
                    "filePath": "./locales/de/common.json",
                    "missing": ["a.b"],
                    "extra": [],
                    "empty": [],
                    "counts": {"missing": 1, "extra": 0, "empty": 0}
                }
            }
        })
    );

    let fixed = test.check_command().args(filters).arg("--fix").output()?;
    assert_eq!(fixed.status.code(), Some(0), "{}", stdout(&fixed));
    assert_eq!(
        test.read_file("locales/de/common.json")?,
        "{\n  \"a\": {\n    \"b\": \"Hello\"\n  }\n}\n"
    );
    // Outside the filter nothing is written.
    assert_eq!(test.read_file("locales/fr/common.json")?, r#"{"a": {}}"#);
    assert_eq!(test.read_file("locales/de/errors.json")?, "{}");

    let rerun = test.check_command().args(filters).output()?;
    assert_eq!(rerun.status.code(), Some(0), "{}", stdout(&rerun));

    // The unfiltered run still sees the other pairs.
    let all = test.check_command().output()?;
    assert_eq!(all.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_extra_and_empty_keys_do_not_fail() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file("locales/en/common.json", r#"{"title": "Title"}"#)?;
    test.write_file(
        "locales/de/common.json",
        "{\n  \"title\": \"\",\n  \"legacy\": \"Alt\"\n}\n",
    )?;

    let output = test.check_command().args(["--json"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    let result = &json_output(&output)?["locales"]["de"]["common"];
    assert_eq!(result["extra"], json!(["legacy"]));
    assert_eq!(result["empty"], json!(["title"]));

    let verbose = test.check_command().arg("-v").output()?;
    let out = stdout(&verbose);
    assert!(out.contains("extra legacy  (line 3)"), "{}", out);
    assert!(out.contains("empty title  (line 2)"), "{}", out);

    Ok(())
}

#[test]
fn test_missing_target_file() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file("locales/en/common.json", r#"{"a": "A"}"#)?;
    test.write_file("locales/fr/.keep", "")?;

    let output = test.check_command().args(["--fix", "--json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(
        report["locales"]["fr"]["common"]["status"],
        json!("missing-file")
    );
    assert_eq!(report["summary"]["missingFiles"], json!(1));
    // Fix mode never creates dictionaries.
    assert!(!test.root().join("locales/fr/common.json").exists());

    Ok(())
}

#[test]
fn test_malformed_target_is_isolated() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file("locales/en/common.json", r#"{"a": "A"}"#)?;
    test.write_file("locales/de/common.json", r#"{"a": "#)?;
    test.write_file("locales/fr/common.json", r#"{"a": "Un"}"#)?;

    let output = test.check_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(report["locales"]["de"]["common"]["status"], json!("parse-error"));
    assert_eq!(report["locales"]["fr"]["common"]["status"], json!("ok"));

    Ok(())
}

#[test]
fn test_reserved_segment_is_never_written() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "locales/en/common.json",
        r#"{"ok": "Fine", "__proto__": {"polluted": "yes"}}"#,
    )?;
    test.write_file("locales/de/common.json", "{}")?;

    let output = test.check_command().args(["--fix", "--json"]).output()?;
    // The reserved key stays missing.
    assert_eq!(output.status.code(), Some(1));

    let result = &json_output(&output)?["locales"]["de"]["common"];
    assert_eq!(result["fixed"], json!(["ok"]));
    assert_eq!(result["skipped"], json!(["__proto__.polluted"]));
    assert_eq!(
        test.read_file("locales/de/common.json")?,
        "{\n  \"ok\": \"Fine\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_invalid_locale_lists_valid_values() -> Result<()> {
    let test = nested_project()?;

    let output = test.check_command().args(["--locale", "xx"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Invalid locale 'xx'. Valid locales: de, en"),
        "{}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_invalid_namespace_lists_valid_values() -> Result<()> {
    let test = nested_project()?;

    let output = test.check_command().args(["--ns", "billing"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Invalid namespace 'billing'. Valid namespaces: common"),
        "{}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_missing_messages_root_is_fatal() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: "), "{}", stderr(&output));

    Ok(())
}
