//! Diagnostics and line coverage for the UHDM frontend.
//!
//! Structured [`Diagnostic`] messages carry a severity, a [`DiagnosticCode`]
//! and a line-granular [`SourceLoc`](uhdm_source::SourceLoc). The thread-safe
//! [`DiagnosticSink`] accumulates them during translation, [`TerminalRenderer`]
//! formats them for humans, and [`CoverageReport`] records which source lines
//! the translator could and could not represent.

#![warn(missing_docs)]

pub mod code;
pub mod coverage;
pub mod diagnostic;
pub mod renderer;
pub mod sink;

pub use code::{Category, DiagnosticCode, Severity};
pub use coverage::{CoverageReport, CoverageSummary, LineStatus};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use sink::DiagnosticSink;
