//! Check command implementation
//!
//! Prints the configuration resolved from defaults, file, environment and flags.

use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &CliConfig) -> Result<String> {
    info!("Checking configuration...");
    config.validate()?;

    let rendered = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to render configuration: {}", e)))?;

    info!("Configuration OK");
    Ok(format!("# resolved configuration\n{}", rendered))
}
