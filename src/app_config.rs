use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Clip segmentation settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Timing allocation settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// Plain-text reflow settings
    #[serde(default)]
    pub reflow: ReflowConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Clip segmenter configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Minimum line count before a clip group is closed
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    /// A trailing group at or below this line count merges into the previous clip
    #[serde(default = "default_merge_threshold")]
    pub merge_threshold: usize,

    /// Advisory maximum character count per clip.
    ///
    /// Surfaced through segment info as a warning to the caller; clips are
    /// never forcibly split for exceeding it.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_lines: default_min_lines(),
            merge_threshold: default_merge_threshold(),
            max_chars: default_max_chars(),
        }
    }
}

/// Timing allocator configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Signed shift in seconds applied to every segment start
    #[serde(default)]
    pub offset_seconds: f64,

    /// Characters spoken per second at synthesis speed 1.0, for duration estimates
    #[serde(default = "default_chars_per_second")]
    pub chars_per_second: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            offset_seconds: 0.0,
            chars_per_second: default_chars_per_second(),
        }
    }
}

/// Reflow formatter configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReflowConfig {
    /// Preferred output line length in characters
    #[serde(default = "default_target_length")]
    pub target_length: usize,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            target_length: default_target_length(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_min_lines() -> usize {
    5
}

fn default_merge_threshold() -> usize {
    3
}

fn default_max_chars() -> usize {
    150
}

fn default_chars_per_second() -> f64 {
    // VOICEVOX-style engines read roughly 10 characters per second at speed 1.0
    10.0
}

fn default_target_length() -> usize {
    14
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.segmenter.min_lines == 0 {
            return Err(anyhow!("segmenter.min_lines must be at least 1"));
        }

        if self.segmenter.merge_threshold >= self.segmenter.min_lines {
            return Err(anyhow!(
                "segmenter.merge_threshold ({}) must be below segmenter.min_lines ({})",
                self.segmenter.merge_threshold,
                self.segmenter.min_lines
            ));
        }

        if self.reflow.target_length == 0 {
            return Err(anyhow!("reflow.target_length must be at least 1"));
        }

        if self.timing.chars_per_second <= 0.0 {
            return Err(anyhow!(
                "timing.chars_per_second must be positive, got {}",
                self.timing.chars_per_second
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            segmenter: SegmenterConfig::default(),
            timing: TimingConfig::default(),
            reflow: ReflowConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
