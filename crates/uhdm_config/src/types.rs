//! Configuration types deserialized from `uhdm.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level frontend configuration. Every table is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FrontendConfig {
    /// Translator mode flags.
    #[serde(default)]
    pub translate: TranslateConfig,
    /// Line coverage collection.
    #[serde(default)]
    pub report: ReportConfig,
}

/// The `[translate]` table.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateConfig {
    /// Escalate every recoverable diagnostic into an abort of the run.
    #[serde(default)]
    pub strict: bool,
    /// Trace every visited object.
    #[serde(default)]
    pub debug: bool,
}

/// The `[report]` table.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Collect handled/unhandled status per source line.
    #[serde(default = "default_coverage")]
    pub coverage: bool,
    /// Directory an external writer renders the coverage report into.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_coverage() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            coverage: default_coverage(),
            directory: None,
        }
    }
}

/// Mode flags consumed by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Abort on the first recoverable diagnostic.
    pub strict: bool,
    /// Emit a trace line per visited object.
    pub debug: bool,
    /// Record handled/unhandled status per source line.
    pub coverage: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            debug: false,
            coverage: true,
        }
    }
}

impl TranslateOptions {
    /// Options with strict mode enabled.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

impl FrontendConfig {
    /// Effective translator flags. A coverage report run is never strict,
    /// since it has to see every unhandled line.
    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            strict: self.translate.strict && self.report.directory.is_none(),
            debug: self.translate.debug,
            coverage: self.report.coverage,
        }
    }
}
