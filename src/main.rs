// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod engine;
mod errors;
mod file_utils;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every processing subcommand
#[derive(Parser, Debug)]
struct CommonArgs {
    /// Input script file (UTF-8 text) or directory of .txt scripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a script into clip groups, one text file per clip
    Clips(CommonArgs),

    /// Allocate per-line caption timing against a known audio duration
    Timing {
        #[command(flatten)]
        common: CommonArgs,

        /// Duration of the synthesized audio in seconds
        #[arg(short, long)]
        duration: f64,

        /// JSON file with the speech engine's per-phrase timing estimate
        #[arg(long)]
        phrase_timing: Option<PathBuf>,

        /// Signed start offset in seconds (overrides the config value)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },

    /// Export a time-coded SRT subtitle file
    Srt {
        #[command(flatten)]
        common: CommonArgs,

        /// Duration of the synthesized audio in seconds
        #[arg(short, long)]
        duration: f64,
    },

    /// Reflow a script into fixed-width lines for plain-text delivery
    Reflow {
        #[command(flatten)]
        common: CommonArgs,

        /// Preferred line length in characters (overrides the config value)
        #[arg(short, long)]
        target_length: Option<usize>,
    },

    /// Generate shell completions for capsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// capsync - Caption Segmentation & Timing Synchronization
///
/// Turns a spoken-word script plus the duration of its synthesized audio
/// into timed caption output for short-form vertical video.
#[derive(Parser, Debug)]
#[command(name = "capsync")]
#[command(version = "1.0.0")]
#[command(about = "Caption segmentation and timing synchronization tool")]
#[command(long_about = "capsync splits a spoken-word script into caption units and assigns each one
a start time and duration that sums exactly to a known audio length.

EXAMPLES:
    capsync clips script.txt                         # Split a script into clip groups
    capsync clips /scripts/ -f                       # Re-segment a whole directory
    capsync timing script.txt -d 12.5                # Per-line timing for 12.5s of audio
    capsync timing script.txt -d 12.5 --phrase-timing pt.json
    capsync srt script.txt -d 12.5                   # Export an SRT subtitle file
    capsync reflow script.txt --target-length 14     # Fixed-width plain-text reflow
    capsync completions bash > capsync.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let emoji = Self::get_emoji_for_level(record.level());
            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "capsync", &mut std::io::stdout());
            Ok(())
        }
        Commands::Clips(common) => {
            let controller = build_controller(&common, |_| {})?;
            if common.input_path.is_file() {
                controller.run_clips(&common.input_path, common.force_overwrite)
            } else if common.input_path.is_dir() {
                controller.run_clips_folder(&common.input_path, common.force_overwrite)
            } else {
                Err(anyhow!("Input path does not exist: {:?}", common.input_path))
            }
        }
        Commands::Timing {
            common,
            duration,
            phrase_timing,
            offset,
        } => {
            let controller = build_controller(&common, |config| {
                if let Some(offset) = offset {
                    config.timing.offset_seconds = offset;
                }
            })?;
            require_file(&common.input_path)?;
            controller.run_timing(
                &common.input_path,
                duration,
                phrase_timing.as_deref(),
                common.force_overwrite,
            )
        }
        Commands::Srt { common, duration } => {
            let controller = build_controller(&common, |_| {})?;
            require_file(&common.input_path)?;
            controller.run_srt(&common.input_path, duration, common.force_overwrite)
        }
        Commands::Reflow {
            common,
            target_length,
        } => {
            let controller = build_controller(&common, |config| {
                if let Some(target_length) = target_length {
                    config.reflow.target_length = target_length;
                }
            })?;
            if common.input_path.is_file() {
                controller.run_reflow(&common.input_path, common.force_overwrite)
            } else if common.input_path.is_dir() {
                controller.run_reflow_folder(&common.input_path, common.force_overwrite)
            } else {
                Err(anyhow!("Input path does not exist: {:?}", common.input_path))
            }
        }
    }
}

/// Load or create the configuration, apply CLI overrides, and build the controller
fn build_controller(common: &CommonArgs, apply_overrides: impl FnOnce(&mut Config)) -> Result<Controller> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &common.log_level {
        log::set_max_level(to_level_filter(&cmd_log_level.clone().into()));
    }

    let config_path = &common.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save_to_file(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    }
    apply_overrides(&mut config);

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if common.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    Controller::with_config(config)
}

/// Map the config log level onto the log crate's filter
fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Reject directory input for the duration-consuming subcommands
fn require_file(input_path: &Path) -> Result<()> {
    if !input_path.is_file() {
        return Err(anyhow!(
            "Input path must be a single script file: {:?}",
            input_path
        ));
    }
    Ok(())
}
