use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language of the auto-translate formula (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Directory converted files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Run log settings
    #[serde(default)]
    pub run_log: RunLogConfig,
}

/// Run log configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunLogConfig {
    /// Whether a run marker is appended per invocation
    #[serde(default = "default_run_log_enabled")]
    pub enabled: bool,

    /// Where the run log lives
    #[serde(default = "default_run_log_path")]
    pub path: PathBuf,

    /// How many runs the rotation keeps
    #[serde(default = "default_keep_runs")]
    pub keep_runs: usize,
}

impl Default for RunLogConfig {
    fn default() -> Self {
        Self {
            enabled: default_run_log_enabled(),
            path: default_run_log_path(),
            keep_runs: default_keep_runs(),
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

impl LogLevel {
    // @returns: log crate filter for this level
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            output_dir: default_output_dir(),
            log_level: LogLevel::default(),
            run_log: RunLogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| anyhow!("Failed to open config file {:?}: {}", path.as_ref(), e))?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("source_language must not be empty"));
        }
        if self.source_language.trim().chars().count() != 2 {
            return Err(anyhow!(
                "source_language must be a two-letter code, got '{}'",
                self.source_language
            ));
        }
        if self.run_log.keep_runs == 0 {
            return Err(anyhow!("run_log.keep_runs must be at least 1"));
        }
        Ok(())
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_run_log_enabled() -> bool {
    true
}

fn default_run_log_path() -> PathBuf {
    PathBuf::from("logs").join("xlifftab.log")
}

fn default_keep_runs() -> usize {
    3
}
