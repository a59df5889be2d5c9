use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, json_output, stderr, stdout};

const CHECKOUT: &str = r#"import { useTranslation } from 'react-i18next';

export function Checkout() {
  const { t } = useTranslation();
  const total = 3;

  return (
    <section>
      <p>{total}</p>
      <h1>{t('checkout.title')}</h1>
    </section>
  );
}
"#;

fn project(dictionary: &str) -> Result<CliTest> {
    let test = CliTest::with_config()?;
    test.write_file("locales/en/common.json", dictionary)?;
    Ok(test)
}

#[test]
fn test_exposed_key_json() -> Result<()> {
    let test = project("{}")?;
    test.write_file("src/Checkout.tsx", CHECKOUT)?;

    let output = test.scan_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1), "{}", stderr(&output));

    let report = json_output(&output)?;
    assert_eq!(report["locale"], json!("en"));
    assert_eq!(
        report["exposed"],
        json!([{
            "namespace": "common",
            "key": "checkout.title",
            "locations": ["./src/Checkout.tsx:10"],
            "provenance": "call",
            "reason": "missing key"
        }])
    );
    assert_eq!(report["summary"]["filesScanned"], json!(1));
    assert_eq!(report["summary"]["exposed"], json!(1));

    Ok(())
}

#[test]
fn test_exposed_key_console() -> Result<()> {
    let test = project("{}")?;
    test.write_file("src/Checkout.tsx", CHECKOUT)?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("error: \"common:checkout.title\"  exposed-key"), "{}", out);
    assert!(out.contains("--> ./src/Checkout.tsx:10:12"), "{}", out);

    Ok(())
}

#[test]
fn test_defined_key_is_valid() -> Result<()> {
    let test = project(r#"{"checkout": {"title": "Checkout"}}"#)?;
    test.write_file("src/Checkout.tsx", CHECKOUT)?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(
        stdout(&output).contains("Checked 1 source file against 'en' - no exposed keys found"),
        "{}",
        stdout(&output)
    );

    Ok(())
}

#[test]
fn test_duplicate_references_are_reported_once() -> Result<()> {
    let test = project("{}")?;
    test.write_file("src/a.tsx", "const a = t('shared.label');\n")?;
    test.write_file("src/b.tsx", "\nconst b = t('shared.label');\n")?;

    let output = test.scan_command().arg("--json").output()?;
    let report = json_output(&output)?;

    assert_eq!(report["summary"]["exposed"], json!(1));
    assert_eq!(
        report["exposed"][0]["locations"],
        json!(["./src/a.tsx:1", "./src/b.tsx:2"])
    );

    Ok(())
}

#[test]
fn test_dynamic_reference_is_not_checked() -> Result<()> {
    let test = project("{}")?;
    test.write_file(
        "src/status.tsx",
        "export const label = (status) => t(`status.${status}`);\n",
    )?;

    let output = test.scan_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(0));

    let report = json_output(&output)?;
    assert_eq!(report["exposed"], json!([]));
    assert_eq!(report["summary"]["dynamicReferences"], json!(1));
    assert_eq!(
        report["dynamic"],
        json!([{
            "expression": "`status.${status}`",
            "location": "./src/status.tsx:1",
            "provenance": "call"
        }])
    );

    Ok(())
}

#[test]
fn test_verbose_lists_dynamic_references() -> Result<()> {
    let test = project("{}")?;
    test.write_file(
        "src/status.tsx",
        "export const label = (status) => t(`status.${status}`);\n",
    )?;

    let quiet = test.scan_command().output()?;
    assert_eq!(quiet.status.code(), Some(0));
    assert!(!stdout(&quiet).contains("`status.${status}`"), "{}", stdout(&quiet));

    let verbose = test.scan_command().arg("--verbose").output()?;
    assert_eq!(verbose.status.code(), Some(0));
    let out = stdout(&verbose);
    assert!(out.contains("1 dynamic reference not checked:"), "{}", out);
    assert!(
        out.contains("--> ./src/status.tsx:1:34  `status.${status}`"),
        "{}",
        out
    );

    Ok(())
}

#[test]
fn test_covered_key_needs_all_flag() -> Result<()> {
    let test = project("{}")?;
    test.write_file("src/promo.tsx", "const s = t('promo.banner', 'Big sale');\n")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(!out.contains("covered-key"), "{}", out);
    assert!(out.contains("use --all to list"), "{}", out);

    let all = test.scan_command().arg("--all").output()?;
    assert_eq!(all.status.code(), Some(0));
    assert!(
        stdout(&all).contains("warning: \"common:promo.banner\"  covered-key"),
        "{}",
        stdout(&all)
    );

    let report = json_output(&test.scan_command().arg("--json").output()?)?;
    assert_eq!(report["covered"][0]["key"], json!("promo.banner"));
    assert_eq!(report["exposed"], json!([]));

    Ok(())
}

#[test]
fn test_unknown_namespace_is_exposed() -> Result<()> {
    let test = project(r#"{"title": "Title"}"#)?;
    test.write_file(
        "src/billing.tsx",
        "const { t } = useTranslation('billing');\nconst s = t('title', 'Title');\n",
    )?;

    let output = test.scan_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(report["exposed"][0]["namespace"], json!("billing"));
    assert_eq!(report["exposed"][0]["reason"], json!("unknown namespace"));

    Ok(())
}

#[test]
fn test_namespace_without_reference_dictionary_is_exposed() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".keycheckrc.json",
        r#"{ "namespaces": ["common", "admin"] }"#,
    )?;
    test.write_file("locales/en/common.json", "{}")?;
    test.write_file(
        "src/users.tsx",
        "const title = t('admin:users.title', 'Users');\n",
    )?;

    let output = test.scan_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(report["covered"], json!([]));
    assert_eq!(report["exposed"][0]["namespace"], json!("admin"));
    assert_eq!(report["exposed"][0]["key"], json!("users.title"));
    assert_eq!(report["exposed"][0]["reason"], json!("unknown namespace"));

    Ok(())
}

#[test]
fn test_unused_keys() -> Result<()> {
    let test = project("{\n  \"used\": \"Used\",\n  \"legacy\": \"Old\"\n}\n")?;
    test.write_file("src/app.tsx", "const s = t('used');\n")?;

    let output = test.scan_command().args(["--unused", "--json"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    let report = json_output(&output)?;
    assert_eq!(report["summary"]["unused"], json!(1));
    assert_eq!(
        report["unused"],
        json!([{
            "namespace": "common",
            "key": "legacy",
            "locations": ["./locales/en/common.json:3"]
        }])
    );

    // Without the flag the section is absent.
    let report = json_output(&test.scan_command().arg("--json").output()?)?;
    assert!(report.get("unused").is_none());

    Ok(())
}

#[test]
fn test_scan_against_target_locale() -> Result<()> {
    let test = project(r#"{"title": "Title"}"#)?;
    test.write_file("locales/de/common.json", "{}")?;
    test.write_file("src/app.tsx", "const s = t('title');\n")?;

    let reference = test.scan_command().output()?;
    assert_eq!(reference.status.code(), Some(0));

    let output = test.scan_command().args(["--locale", "de", "--json"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json_output(&output)?["locale"], json!("de"));

    Ok(())
}

#[test]
fn test_malformed_dictionary_fails_scan() -> Result<()> {
    let test = project(r#"{"title": "#)?;
    test.write_file("src/app.tsx", "const s = t('title');\n")?;

    let output = test.scan_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let report = json_output(&output)?;
    assert_eq!(
        report["parseErrors"][0]["filePath"],
        json!("./locales/en/common.json")
    );

    Ok(())
}
