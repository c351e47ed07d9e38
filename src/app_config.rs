use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use log::warn;
use crate::errors::AppError;
use crate::transcript::TimestampPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Treatment of negative or reversed chunk timestamps
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,

    /// Output naming and discovery
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// File naming settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Extension of written subtitle files
    #[serde(default = "default_output_extension")]
    pub extension: String,

    // @field: Extension of transcript files picked up in folder mode
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: default_output_extension(),
            input_extension: default_input_extension(),
        }
    }
}

/// Log verbosity level
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
    // @returns: Matching filter for the log crate
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

fn default_output_extension() -> String {
    "srt".to_string()
}

fn default_input_extension() -> String {
    "json".to_string()
}

impl Config {
    /// Load the configuration at `path`, or write and return the defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Check output naming; failures are reported as `AppError::Config`
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        for (name, ext) in [("output.extension", &self.output.extension), ("output.input_extension", &self.output.input_extension)] {
            if ext.trim().is_empty() {
                return Err(AppError::Config(format!("{} must not be empty", name)));
            }
            if ext.contains('.') || ext.contains('/') || ext.contains('\\') {
                return Err(AppError::Config(format!(
                    "{} must be a bare extension without dots or separators: {}",
                    name, ext
                )));
            }
        }

        if self.output.extension.eq_ignore_ascii_case(&self.output.input_extension) {
            return Err(AppError::Config(format!(
                "Output extension '{}' would overwrite the input transcripts",
                self.output.extension
            )));
        }

        Ok(())
    }
}
