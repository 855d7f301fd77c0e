//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use uhdm_source::SourceDb;

/// Formats diagnostics into strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-like layout:
///
/// ```text
/// warning[W300]: relation `AllPrograms` of design `\top` is not translated
///   --> rtl/top.sv:3
///    = note: ...
/// ```
///
/// Source text is not available to the translator, so there is no snippet.
pub struct TerminalRenderer {
    /// Whether to wrap the severity header in ANSI color codes.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let plain = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return plain;
        }
        let color = match diag.severity {
            crate::Severity::Error => "31",
            crate::Severity::Warning => "33",
            crate::Severity::Note => "36",
        };
        format!("\x1b[1;{color}m{plain}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);
        if !diag.loc.is_dummy() {
            out.push_str(&format!("  --> {}\n", source_db.resolve(diag.loc)));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use uhdm_source::SourceLoc;

    #[test]
    fn render_with_location() {
        let mut db = SourceDb::new();
        let file = db.intern_path("rtl/top.sv");
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 301),
            "operator code 69 is not translated",
            SourceLoc::new(file, 14),
        )
        .with_note("the expression is dropped");
        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.contains("warning[W301]: operator code 69 is not translated"));
        assert!(out.contains("--> rtl/top.sv:14"));
        assert!(out.contains("= note: the expression is dropped"));
    }

    #[test]
    fn render_dummy_location_has_no_arrow() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 302),
            "bad literal",
            SourceLoc::DUMMY,
        );
        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.starts_with("error[E302]: bad literal"));
        assert!(!out.contains("-->"));
    }

    #[test]
    fn color_wraps_header() {
        let db = SourceDb::new();
        let diag = Diagnostic::note(
            DiagnosticCode::new(Category::Note, 303),
            "n",
            SourceLoc::DUMMY,
        );
        let out = TerminalRenderer::new(true).render(&diag, &db);
        assert!(out.starts_with("\x1b[1;36mnote[N303]\x1b[0m"));
    }
}
