// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod decomposer;
mod errors;
mod file_utils;
mod language_utils;
mod naming;
mod recomposer;
mod table;
mod translation_record;
mod xliff_document;
mod xml_tree;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an XLIFF document into a translation table (CSV)
    Export {
        /// XLIFF document to decompose
        #[arg(value_name = "XLIFF_FILE")]
        xliff_file: PathBuf,
    },

    /// Merge an edited translation table back into the original document
    Import {
        /// The original XLIFF document the table was exported from
        #[arg(value_name = "ORIGINAL_XLIFF")]
        original: PathBuf,

        /// The edited translation table (CSV)
        #[arg(value_name = "TABLE_FILE")]
        table: PathBuf,
    },

    /// Detect the input's type and convert accordingly
    Convert {
        /// Input file (XLIFF document)
        #[arg(value_name = "INPUT_FILE")]
        input: PathBuf,
    },

    /// Generate shell completions for xlifftab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// xlifftab - XLIFF <-> table converter
///
/// Converts XLIFF translation documents into editable tables and merges the
/// edited tables back, preserving all other document structure.
#[derive(Parser, Debug)]
#[command(name = "xlifftab")]
#[command(version = "0.1.0")]
#[command(about = "XLIFF <-> translation table converter")]
#[command(long_about = "xlifftab decomposes XLIFF documents into flat translation tables and
recomposes edited tables back into complete documents.

EXAMPLES:
    xlifftab export AM_REPORT_DE.xlf            # Write AM_REPORT.csv for editing
    xlifftab import AM_REPORT_DE.xlf AM_REPORT.csv
                                                # Merge edits into AM_REPORT_DE.xlf targets
    xlifftab convert AM_REPORT_DE.xlf           # Auto-detect and export
    xlifftab -o out export AM_REPORT_DE.xlf     # Write the table into ./out
    xlifftab --log-level debug export a_DE.xlf  # Verbose conversion diagnostics
    xlifftab completions bash > xlifftab.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in xlifftab.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "xlifftab.json")]
    config_path: String,

    /// Directory output files are written to (overrides the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
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

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "xlifftab", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let config = load_or_create_config(&cli.config_path, cli.log_level.as_ref())?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    controller.start_run()?;

    let output_dir = cli.output_dir.as_deref();
    match &cli.command {
        Commands::Export { xliff_file } => {
            controller.run_export(xliff_file, output_dir)?;
        }
        Commands::Import { original, table } => {
            controller.run_import(original, table, output_dir)?;
        }
        Commands::Convert { input } => {
            controller.run_convert(input, output_dir)?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Load the configuration file, creating a default one when absent.
/// A CLI-provided log level overrides whatever the file says.
fn load_or_create_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
