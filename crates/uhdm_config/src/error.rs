//! Configuration errors.

use std::path::PathBuf;

/// Why a `uhdm.toml` could not be turned into a [`FrontendConfig`](crate::FrontendConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file looked up.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid TOML or does not match the expected tables.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key holds a value the translator cannot use.
    #[error("invalid `{key}`: {reason}")]
    Invalid {
        /// Dotted key, e.g. `report.directory`.
        key: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
