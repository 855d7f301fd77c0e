//! Diagnostic codes, diagnostic constructors and the translation error type.
//!
//! `W300`--`W304` and `E302` are recoverable: translation continues with a
//! partial node unless strict mode escalates them into
//! [`TranslateError::Aborted`]. `N303` is informational and never escalates.

use uhdm_common::InternalError;
use uhdm_diagnostics::{Category, Diagnostic, DiagnosticCode};
use uhdm_model::{ObjectKind, Relation};
use uhdm_source::SourceLoc;

/// A populated relation has no translation rule for its owner kind.
pub const W300: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 300,
};

/// An operator is unknown or not representable.
pub const W301: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 301,
};

/// A constant's value text does not parse.
pub const E302: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 302,
};

/// An aggregate assignment fell back to a concatenation.
pub const N303: DiagnosticCode = DiagnosticCode {
    category: Category::Note,
    number: 303,
};

/// An object kind has no translation rule.
pub const W304: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 304,
};

/// Result type of every translation step.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Why a translation run stopped.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Strict mode turned a recoverable diagnostic into an abort.
    #[error("translation aborted: {code} {message} at {location}")]
    Aborted {
        /// Code of the escalated diagnostic.
        code: DiagnosticCode,
        /// Message of the escalated diagnostic.
        message: String,
        /// `path:line` of the offending object.
        location: String,
    },
    /// A broken invariant or a caller contract violation.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Creates a warning for a populated relation without a translation rule.
pub fn warn_unsupported_relation(
    rel: Relation,
    kind: ObjectKind,
    name: &str,
    loc: SourceLoc,
) -> Diagnostic {
    let owner = if name.is_empty() {
        kind.to_string()
    } else {
        format!("{kind} `{name}`")
    };
    Diagnostic::warning(W300, format!("relation `{rel}` of {owner} is not translated"), loc)
        .with_note("the related objects are omitted from the output")
}

/// Creates a warning for an operator without a translation rule.
pub fn warn_unsupported_operator(what: &str, loc: SourceLoc) -> Diagnostic {
    Diagnostic::warning(W301, format!("unsupported operator: {what}"), loc)
        .with_note("the expression is omitted from the output")
}

/// Creates an error for a constant that fails to parse.
pub fn error_malformed_literal(text: &str, reason: &str, loc: SourceLoc) -> Diagnostic {
    Diagnostic::error(E302, format!("malformed literal `{text}`: {reason}"), loc)
}

/// Creates a note for an aggregate assignment without a known field layout.
pub fn note_missing_type_info(target: &str, loc: SourceLoc) -> Diagnostic {
    Diagnostic::note(
        N303,
        format!("field layout of `{target}` is unknown, assigning the pattern as a concatenation"),
        loc,
    )
}

/// Creates a warning for an object kind without a translation rule.
pub fn warn_unsupported_object(kind: ObjectKind, name: &str, loc: SourceLoc) -> Diagnostic {
    Diagnostic::warning(W304, format!("{kind} `{name}` is not translated"), loc)
}
