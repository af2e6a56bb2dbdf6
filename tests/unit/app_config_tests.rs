/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use capsync::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldMatchReferenceThresholds() {
    let config = Config::default();

    assert_eq!(config.segmenter.min_lines, 5);
    assert_eq!(config.segmenter.merge_threshold, 3);
    assert_eq!(config.segmenter.max_chars, 150);
    assert_eq!(config.reflow.target_length, 14);
    assert!(common::approx_eq(config.timing.offset_seconds, 0.0));
    assert!(common::approx_eq(config.timing.chars_per_second, 10.0));
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test saving and reloading a configuration file
#[test]
fn test_config_save_and_load_withRoundTrip_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.segmenter.min_lines = 7;
    config.reflow.target_length = 20;
    config.timing.offset_seconds = -0.25;
    config.save_to_file(&config_path)?;

    let loaded = Config::from_file(&config_path)?;

    assert_eq!(loaded.segmenter.min_lines, 7);
    assert_eq!(loaded.reflow.target_length, 20);
    assert!(common::approx_eq(loaded.timing.offset_seconds, -0.25));
    Ok(())
}

/// Test partial configuration files falling back to defaults
#[test]
fn test_config_parse_withPartialJson_shouldUseDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"segmenter": {"min_lines": 8}}"#)?;

    assert_eq!(config.segmenter.min_lines, 8);
    assert_eq!(config.segmenter.merge_threshold, 3);
    assert_eq!(config.reflow.target_length, 14);
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

/// Test log level serializing in lowercase
#[test]
fn test_log_level_serialization_shouldBeLowercase() -> Result<()> {
    assert_eq!(serde_json::to_string(&LogLevel::Debug)?, "\"debug\"");
    let parsed: LogLevel = serde_json::from_str("\"warn\"")?;
    assert_eq!(parsed, LogLevel::Warn);
    Ok(())
}

/// Test validation rejecting a zero minimum line count
#[test]
fn test_validate_withZeroMinLines_shouldFail() {
    let mut config = Config::default();
    config.segmenter.min_lines = 0;

    assert!(config.validate().is_err());
}

/// Test validation rejecting a merge threshold at or above the minimum
#[test]
fn test_validate_withMergeThresholdAboveMinLines_shouldFail() {
    let mut config = Config::default();
    config.segmenter.merge_threshold = 5;

    assert!(config.validate().is_err());
}

/// Test validation rejecting a zero reflow target
#[test]
fn test_validate_withZeroTargetLength_shouldFail() {
    let mut config = Config::default();
    config.reflow.target_length = 0;

    assert!(config.validate().is_err());
}

/// Test validation rejecting a non-positive speech rate
#[test]
fn test_validate_withNonPositiveCharsPerSecond_shouldFail() {
    let mut config = Config::default();
    config.timing.chars_per_second = 0.0;

    assert!(config.validate().is_err());
}

/// Test the default configuration passing validation
#[test]
fn test_validate_withDefaults_shouldPass() {
    assert!(Config::default().validate().is_ok());
}
