use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumString};
use validator::Validate;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Tracker configuration
    #[serde(default)]
    #[validate(nested)]
    pub tracker: TrackerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Console configuration
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/local.toml".to_string());
        Self::load_from(Path::new(&config_path), false)
    }

    /// Load configuration layered over the embedded defaults
    pub fn load_from(path: &Path, required: bool) -> Result<Self> {
        let config: Config = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            // Override with config file
            .add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(required),
            )
            // Override with environment variables (prefix: EMERGENCY_DISPATCH__)
            .add_source(
                config::Environment::with_prefix("EMERGENCY_DISPATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate_settings()?;
        Ok(config)
    }

    /// Check value ranges after all layers and CLI overrides are applied
    pub fn validate_settings(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrackerConfig {
    /// Resource pool balance at session start
    #[serde(default = "default_initial_resources")]
    #[validate(range(min = 0))]
    pub initial_resources: i64,

    /// Discard all state shortly after an incident is resolved
    #[serde(default = "default_true")]
    pub reset_on_resolve: bool,

    /// Delay before the post-resolution reset (milliseconds)
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            initial_resources: default_initial_resources(),
            reset_on_resolve: true,
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Output format for rendered views
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

fn default_initial_resources() -> i64 {
    100
}

fn default_reset_delay_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_defaults() {
        let config = Config::load_from(Path::new("does/not/exist.toml"), false).unwrap();

        assert_eq!(config.tracker.initial_resources, 100);
        assert!(config.tracker.reset_on_resolve);
        assert_eq!(config.tracker.reset_delay_ms, 500);
        assert_eq!(config.console.format, OutputFormat::Text);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[tracker]\ninitial_resources = 40\nreset_on_resolve = false\n\n[console]\nformat = \"html\""
        )
        .unwrap();

        let config = Config::load_from(file.path(), true).unwrap();

        assert_eq!(config.tracker.initial_resources, 40);
        assert!(!config.tracker.reset_on_resolve);
        assert_eq!(config.tracker.reset_delay_ms, 500);
        assert_eq!(config.console.format, OutputFormat::Html);
    }

    #[test]
    fn test_missing_required_file_fails() {
        let err = Config::load_from(Path::new("does/not/exist.toml"), true).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_negative_initial_resources_rejected() {
        let mut config = Config::default();
        config.tracker.initial_resources = -1;
        let err = config.validate_settings().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("initial_resources"));

        config.tracker.initial_resources = 0;
        assert!(config.validate_settings().is_ok());
    }

    #[test]
    fn test_output_format_codes() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }
}
