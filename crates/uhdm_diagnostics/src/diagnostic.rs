//! Structured diagnostic messages.

use crate::code::{DiagnosticCode, Severity};
use serde::{Deserialize, Serialize};
use uhdm_source::SourceLoc;

/// A diagnostic message attached to the source line of the offending object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Where the offending object was declared.
    pub loc: SourceLoc,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Actionable suggestions.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        loc: SourceLoc,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            loc,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, loc: SourceLoc) -> Self {
        Self::with_severity(Severity::Error, code, message, loc)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, loc: SourceLoc) -> Self {
        Self::with_severity(Severity::Warning, code, message, loc)
    }

    /// Creates a note diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>, loc: SourceLoc) -> Self {
        Self::with_severity(Severity::Note, code, message, loc)
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
