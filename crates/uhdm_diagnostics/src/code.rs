//! Diagnostic codes and the severity each one is reported at.
//!
//! A code is a category letter and a three-digit number (`W300`). The letter
//! fixes the default severity: `E` codes are errors, `W` codes warnings, `N`
//! codes notes. Only notes leave a strict run alive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How bad a diagnostic is, from `Note` up to `Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; the translation result is complete.
    Note,
    /// A construct was skipped or approximated.
    Warning,
    /// A construct could not be translated at all.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Whether a diagnostic of this severity marks its line unhandled and
    /// aborts a strict run.
    pub fn escalates(self) -> bool {
        self != Severity::Note
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// The letter of a code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E`.
    Error,
    /// `W`.
    Warning,
    /// `N`.
    Note,
}

impl Category {
    /// The prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }

    /// Category for a prefix letter.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            'N' => Some(Category::Note),
            _ => None,
        }
    }

    /// Severity a code of this category is reported at.
    pub fn severity(self) -> Severity {
        match self {
            Category::Error => Severity::Error,
            Category::Warning => Severity::Warning,
            Category::Note => Severity::Note,
        }
    }
}

/// A category plus a number, displayed as e.g. `W300`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The letter.
    pub category: Category,
    /// The number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// Parses the `W300` spelling, as found in configuration or logs.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let category = Category::from_prefix(chars.next()?)?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(category, digits.parse().ok()?))
    }

    /// Default severity of this code.
    pub fn severity(self) -> Severity {
        self.category.severity()
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_number() {
        assert_eq!(DiagnosticCode::new(Category::Error, 302).to_string(), "E302");
        assert_eq!(DiagnosticCode::new(Category::Warning, 7).to_string(), "W007");
    }

    #[test]
    fn parse_accepts_display_form() {
        let code = DiagnosticCode::new(Category::Note, 303);
        assert_eq!(DiagnosticCode::parse(&code.to_string()), Some(code));
        assert_eq!(DiagnosticCode::parse("X300"), None);
        assert_eq!(DiagnosticCode::parse("W30"), None);
        assert_eq!(DiagnosticCode::parse("W3a0"), None);
    }

    #[test]
    fn only_notes_stay_quiet() {
        assert!(!DiagnosticCode::parse("N303").unwrap().severity().escalates());
        assert!(DiagnosticCode::parse("W300").unwrap().severity().escalates());
        assert!(DiagnosticCode::parse("E302").unwrap().severity().is_error());
        assert!(Severity::Note < Severity::Warning && Severity::Warning < Severity::Error);
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Warning, 300);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
