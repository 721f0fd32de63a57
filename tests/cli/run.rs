use std::fs;

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const ES: &str = "<?php\n\
$GLOBALS['translations']['es']['hi'] = 'Hola';\n\
$GLOBALS['translations']['es']['bye'] = 'Adiós';\n";

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(".git/HEAD", "")?;
    test.write_file("es.php", ES)?;
    Ok(test)
}

#[test]
fn test_no_targets_prints_help() -> Result<()> {
    let test = project()?;

    let output = test.run(&[])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}

#[test]
fn test_dry_run_lists_missing_keys() -> Result<()> {
    let test = project()?;
    test.write_file(
        "en.php",
        "<?php\n$GLOBALS['translations']['en']['hi'] = 'Hello';\n",
    )?;

    assert_cmd_snapshot!(test.command_with(&["en", "--from", "es", "--dry-run"]));

    assert_eq!(
        test.read_file("en.php")?,
        "<?php\n$GLOBALS['translations']['en']['hi'] = 'Hello';\n"
    );
    assert!(!test.root().join("trCache.json").exists());

    Ok(())
}

#[test]
fn test_fills_from_cache_and_keeps_existing_lines() -> Result<()> {
    let test = project()?;
    test.write_file(
        "en.php",
        "<?php\n$GLOBALS[\"translations\"][\"en\"][\"hi\"] = \"Hello\";\n?>\n",
    )?;
    test.write_file(
        "trCache.json",
        r#"{ "es": { "en": { "bye": "Goodbye" } } }"#,
    )?;

    assert_cmd_snapshot!(test.command_with(&["en", "--from", "es"]));

    assert_eq!(
        test.read_file("en.php")?,
        "<?php\n\
         $GLOBALS[\"translations\"][\"en\"][\"hi\"] = \"Hello\";\n\
         $GLOBALS['translations']['en']['bye'] = 'Goodbye';\n\
         ?>\n"
    );

    Ok(())
}

#[test]
fn test_creates_missing_target_from_cache() -> Result<()> {
    let test = project()?;
    test.write_file(
        "trCache.json",
        r#"{ "es": { "fr": { "hi": "Salut", "bye": "Au revoir" } } }"#,
    )?;

    let output = test.run(&["--to", "fr", "--from", "es"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Target fr (fr.php) (new file): 0 keys"));

    assert_eq!(
        test.read_file("fr.php")?,
        "<?php\n\
         $GLOBALS['translations']['fr']['hi'] = 'Salut';\n\
         $GLOBALS['translations']['fr']['bye'] = 'Au revoir';\n"
    );

    Ok(())
}

#[test]
fn test_nothing_missing() -> Result<()> {
    let test = project()?;
    test.write_file(
        "en.php",
        "<?php\n\
         $GLOBALS['translations']['en']['hi'] = 'Hello';\n\
         $GLOBALS['translations']['en']['bye'] = 'Goodbye';\n",
    )?;

    let output = test.run(&["en", "--from", "es"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("en: no missing keys"));
    assert!(!test.root().join("trCache.json").exists());

    Ok(())
}

#[test]
fn test_baseline_as_target_is_an_error() -> Result<()> {
    let test = project()?;
    test.write_file("en.php", "<?php\n")?;

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(test.command_with(&["es", "--from", "es", "--dry-run"]));
    });

    Ok(())
}

#[test]
fn test_missing_baseline_is_an_error() -> Result<()> {
    let test = project()?;

    let output = test.run(&["fr", "--dry-run"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load the baseline language 'en'"));

    Ok(())
}

#[test]
fn test_custom_tokens_from_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".git/HEAD", "")?;
    test.write_file(
        ".langgaprc.json",
        r#"{ "from": "es", "dictionary": "$lang", "languagesKey": "strings", "langDir": "i18n" }"#,
    )?;
    test.write_file("i18n/es.php", "<?php\n$lang['strings']['es']['hi'] = 'Hola';\n")?;

    let output = test.run(&["de", "--dry-run"])?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Baseline es (i18n/es.php): 1 key"));
    assert!(out.contains("missing: hi"));

    Ok(())
}

#[test]
fn test_empty_baseline_warns() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".git/HEAD", "")?;
    test.write_file("en.php", "<?php\n$lang['en']['hi'] = 'Hi';\n")?;

    assert_cmd_snapshot!(test.command_with(&["fr", "--dry-run"]));

    Ok(())
}

#[test]
fn test_unreadable_target_is_skipped() -> Result<()> {
    let test = project()?;
    fs::create_dir(test.root().join("fr.php"))?;
    test.write_file("trCache.json", r#"{ "es": { "en": { "hi": "Hi", "bye": "Bye" } } }"#)?;

    let output = test.run(&["fr", "en", "--from", "es"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("error: fr was skipped: Failed to load language 'fr'"));
    assert_eq!(
        test.read_file("en.php")?,
        "<?php\n\
         $GLOBALS['translations']['en']['hi'] = 'Hi';\n\
         $GLOBALS['translations']['en']['bye'] = 'Bye';\n"
    );

    Ok(())
}
