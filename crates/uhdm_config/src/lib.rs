//! Parsing and validation of `uhdm.toml` frontend configuration files.
//!
//! The configuration selects the translator mode flags and whether a line
//! coverage report is collected. [`FrontendConfig::translate_options`] turns it
//! into the [`TranslateOptions`] the translator consumes.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
