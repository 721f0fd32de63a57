use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["from"], "en");
    assert_eq!(parsed["dictionary"], "$GLOBALS");
    assert_eq!(parsed["languagesKey"], "translations");
    assert_eq!(parsed["cacheFile"], "trCache.json");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command_with(&["--init"]));

    assert!(test.root().join(".langgaprc.json").exists());
    let content = test.read_file(".langgaprc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".langgaprc.json", "{}")?;

    assert_cmd_snapshot!(test.command_with(&["--init"]));

    assert_eq!(test.read_file(".langgaprc.json")?, "{}");

    Ok(())
}
