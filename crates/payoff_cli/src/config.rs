//! CLI configuration management
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! `PAYOFF_`-prefixed environment variables, then command line flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use payoff_core::types::{Time, SYSTEM_TIME};

use crate::{CliError, Result};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "payoff.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PAYOFF";

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every event
    Trace,
    /// Product construction details
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown log level: {}. Supported: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Payoff output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON array of label and value pairs
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Valuation time, the start of generated schedules unless a product sets its own
    pub system_time: Time,
    /// Output format of `evaluate`
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            system_time: SYSTEM_TIME,
            output_format: OutputFormat::Table,
        }
    }
}

/// Command line overrides, highest priority
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Output format override
    pub output_format: Option<OutputFormat>,
}

impl CliConfig {
    /// Loads defaults, the file at `path` if it exists, then `PAYOFF_*` variables.
    ///
    /// # Errors
    ///
    /// `CliError::Config` when a source cannot be parsed or a value fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self> {
        let defaults = CliConfig::default();
        let settings = ::config::Config::builder()
            .set_default("log_level", defaults.log_level.as_filter_str())?
            .set_default("system_time", defaults.system_time)?
            .set_default("output_format", defaults.output_format.to_string())?
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: CliConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command line overrides.
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(format) = cli.output_format {
            self.output_format = format;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.system_time.is_finite() {
            return Err(CliError::Config(format!(
                "system_time must be finite, got {}",
                self.system_time
            )));
        }
        Ok(())
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(path: &Path, cli: &CliOverrides) -> Result<CliConfig> {
    let mut config = CliConfig::load(path)?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("payoff_cli_{}_{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.system_time, 0.0);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("payoff_cli_missing_config.toml");
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.system_time, 0.0);
    }

    #[test]
    fn test_file_values_are_loaded() {
        let path = temp_file(
            "config.toml",
            "log_level = \"debug\"\nsystem_time = 0.25\noutput_format = \"json\"\n",
        );
        let config = CliConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.system_time, 0.25);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let path = temp_file("bad_config.toml", "log_level = \"loud\"\n");
        let result = CliConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut config = CliConfig::default();
        config.merge_with_cli(&CliOverrides {
            log_level: Some(LogLevel::Error),
            output_format: None,
        });
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_validate_rejects_nan_system_time() {
        let config = CliConfig {
            system_time: f64::NAN,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
