//! Mutable state threaded through one translation run.

use crate::errors::{TranslateError, TranslateResult};
use crate::registry::ElaborationRegistry;
use log::{debug, log, Level};
use uhdm_ast::{Ast, NodeId};
use uhdm_config::TranslateOptions;
use uhdm_diagnostics::{CoverageReport, Diagnostic, DiagnosticSink, Severity};
use uhdm_model::{ObjectId, ObjectModel};
use uhdm_source::{SourceDb, SourceLoc};

/// Everything a translation step reads or writes besides its own arguments.
///
/// The source model and the diagnostic sink are borrowed; the output tree,
/// the path table, the coverage report and the registry are owned and handed
/// back by [`Translator::finish`](crate::Translator::finish).
pub struct TranslationContext<'a> {
    /// The source object graph.
    pub model: &'a dyn ObjectModel,
    /// Mode flags for this run.
    pub options: TranslateOptions,
    /// Where diagnostics go.
    pub sink: &'a DiagnosticSink,
    /// Every node built so far.
    pub ast: Ast,
    /// Paths of source files seen so far.
    pub files: SourceDb,
    /// Per-line handled/unhandled status.
    pub coverage: CoverageReport,
    /// Definitions, type names and the identity memo.
    pub registry: ElaborationRegistry,
    depth: usize,
}

impl<'a> TranslationContext<'a> {
    /// Creates an empty context over `model`.
    pub fn new(
        model: &'a dyn ObjectModel,
        options: TranslateOptions,
        sink: &'a DiagnosticSink,
    ) -> Self {
        Self {
            model,
            options,
            sink,
            ast: Ast::new(),
            files: SourceDb::new(),
            coverage: CoverageReport::new(),
            registry: ElaborationRegistry::new(),
            depth: 0,
        }
    }

    /// Source location of `obj`, interning its file path.
    pub fn loc_of(&mut self, obj: ObjectId) -> SourceLoc {
        let model = self.model;
        match model.file(obj) {
            Some(path) => {
                let file = self.files.intern_path(path);
                if self.options.coverage {
                    self.coverage.add_file(file);
                }
                SourceLoc::new(file, model.line(obj))
            }
            None => SourceLoc::DUMMY,
        }
    }

    /// Marks the line of `obj` as translated.
    pub fn mark_handled(&mut self, obj: ObjectId) {
        let loc = self.loc_of(obj);
        self.mark_line_handled(loc);
    }

    /// Marks `loc` as translated. No-op when coverage is off.
    pub fn mark_line_handled(&mut self, loc: SourceLoc) {
        if self.options.coverage {
            self.coverage.mark_handled(loc);
        }
    }

    /// Records a recoverable diagnostic.
    ///
    /// Warnings and errors mark their line unhandled. In strict mode they also
    /// stop the run with [`TranslateError::Aborted`]; notes never do.
    pub fn report(&mut self, diag: Diagnostic) -> TranslateResult<()> {
        let location = self.files.resolve(diag.loc).to_string();
        log!(
            log_level(diag.severity),
            code = diag.code.to_string(),
            location = location.as_str();
            "{}",
            diag.message,
        );
        let escalate = diag.severity.escalates();
        if escalate && self.options.coverage {
            self.coverage.mark_unhandled(diag.loc);
        }
        let (code, message) = (diag.code, diag.message.clone());
        self.sink.emit(diag);
        if escalate && self.options.strict {
            return Err(TranslateError::Aborted {
                code,
                message,
                location,
            });
        }
        Ok(())
    }

    /// Traces entry into `obj` and increases the trace indent.
    pub fn enter(&mut self, obj: ObjectId) {
        if self.options.debug {
            let kind = self.model.kind(obj);
            let name = self.model.display_name(obj);
            debug!(depth = self.depth; "{:indent$}{kind} {name}", "", indent = self.depth * 2);
        }
        self.depth += 1;
    }

    /// Decreases the trace indent.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Traces reuse of a memoized node.
    pub fn trace_reuse(&self, obj: ObjectId, node: NodeId) {
        if self.options.debug {
            let kind = self.model.kind(obj);
            debug!(
                node:? = node;
                "{:indent$}{kind} {} (reused)",
                "",
                self.model.display_name(obj),
                indent = self.depth * 2,
            );
        }
    }

    /// Current recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

fn log_level(severity: Severity) -> Level {
    match severity {
        Severity::Note => Level::Info,
        Severity::Warning => Level::Warn,
        Severity::Error => Level::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{note_missing_type_info, warn_unsupported_operator, W301};
    use uhdm_diagnostics::LineStatus;
    use uhdm_model::{ObjectGraph, ObjectKind};

    fn located(graph: &mut ObjectGraph) -> ObjectId {
        graph.build(ObjectKind::Operation).at("top.sv", 7).id()
    }

    #[test]
    fn report_marks_unhandled_and_continues() {
        let mut graph = ObjectGraph::new();
        let obj = located(&mut graph);
        let sink = DiagnosticSink::new();
        let mut ctx = TranslationContext::new(&graph, TranslateOptions::default(), &sink);
        let loc = ctx.loc_of(obj);
        ctx.mark_handled(obj);
        ctx.report(warn_unsupported_operator("code 69", loc)).unwrap();
        assert_eq!(ctx.coverage.status(loc), Some(LineStatus::Unhandled));
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn strict_mode_aborts_with_location() {
        let mut graph = ObjectGraph::new();
        let obj = located(&mut graph);
        let sink = DiagnosticSink::new();
        let mut ctx = TranslationContext::new(&graph, TranslateOptions::strict(), &sink);
        let loc = ctx.loc_of(obj);
        let err = ctx.report(warn_unsupported_operator("code 69", loc)).unwrap_err();
        match err {
            TranslateError::Aborted { code, location, .. } => {
                assert_eq!(code, W301);
                assert_eq!(location, "top.sv:7");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn notes_never_abort_or_mark() {
        let mut graph = ObjectGraph::new();
        let obj = located(&mut graph);
        let sink = DiagnosticSink::new();
        let mut ctx = TranslationContext::new(&graph, TranslateOptions::strict(), &sink);
        let loc = ctx.loc_of(obj);
        ctx.report(note_missing_type_info("\\s", loc)).unwrap();
        assert_eq!(ctx.coverage.status(loc), None);
    }

    #[test]
    fn log_level_follows_severity() {
        assert_eq!(log_level(Severity::Note), Level::Info);
        assert_eq!(log_level(Severity::Warning), Level::Warn);
        assert_eq!(log_level(Severity::Error), Level::Error);
    }

    #[test]
    fn objects_without_file_get_dummy_loc() {
        let mut graph = ObjectGraph::new();
        let obj = graph.add(ObjectKind::Constant);
        let sink = DiagnosticSink::new();
        let mut ctx = TranslationContext::new(&graph, TranslateOptions::default(), &sink);
        assert!(ctx.loc_of(obj).is_dummy());
        assert!(ctx.files.is_empty());
    }
}
