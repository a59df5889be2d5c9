use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["messagesRoot", "referenceLocale", "namespaces", "defaultNamespace"] {
        assert!(parsed.get(field).is_some(), "Config should have '{}' field", field);
    }
    assert_eq!(parsed["referenceLocale"], "en");
    assert_eq!(parsed["defaultNamespace"], "common");

    assert!(content.starts_with("{\n  \""), "Config should use 2-space indentation");
    assert!(content.ends_with("}\n"));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output).trim_end(), @"✓ Created .keycheckrc.json");

    assert!(test.root().join(".keycheckrc.json").exists());
    assert_config_content(&test.read_file(".keycheckrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keycheckrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".keycheckrc.json already exists"));
    // Existing file is left alone.
    assert_eq!(test.read_file(".keycheckrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    test.write_file("src/app.tsx", "const s = t('title');\n")?;
    test.write_file("locales/en/common.json", r#"{"title": "Title"}"#)?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
