/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use scriptorium::app_config::{Config, LogLevel};
use crate::common;

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let (config, created) = Config::load_or_create(&path)?;

    assert!(created);
    assert!(path.exists());
    assert_eq!(config.glossary.default_name, "default");
    Ok(())
}

#[test]
fn test_loadOrCreate_withExistingFile_shouldReadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"log_level": "debug", "extraction": {"ocr_language": "eng+lat", "timeout_secs": 600}}"#,
    )?;

    let (config, created) = Config::load_or_create(&path)?;

    assert!(!created);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.extraction.ocr_language, "eng+lat");
    assert_eq!(config.extraction.timeout_secs, Some(600));
    assert_eq!(config.extraction.pdf_command, "pdftotext");
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_config_roundTripThroughFile_shouldKeepOverrides() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    let mut config = Config::default();
    config.glossary.default_period = "Restoration".to_string();
    std::fs::write(&path, serde_json::to_string_pretty(&config)?)?;

    let (loaded, _) = Config::load_or_create(&path)?;

    assert_eq!(loaded.glossary.default_period, "Restoration");
    Ok(())
}
