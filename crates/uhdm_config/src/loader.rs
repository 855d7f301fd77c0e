//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::FrontendConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "uhdm.toml";

/// Loads and validates `<dir>/uhdm.toml`.
pub fn load_config(dir: &Path) -> Result<FrontendConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
    load_config_from_str(&content)
}

/// Parses and validates a `uhdm.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<FrontendConfig, ConfigError> {
    let config: FrontendConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &FrontendConfig) -> Result<(), ConfigError> {
    if let Some(dir) = &config.report.directory {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                key: "report.directory",
                reason: "must not be empty",
            });
        }
        if !config.report.coverage {
            return Err(ConfigError::Invalid {
                key: "report.directory",
                reason: "requires report.coverage = true",
            });
        }
    }
    Ok(())
}
