//! Translation of a UHDM-style design object graph into an elaboration-ready
//! AST.
//!
//! The source graph is read through the [`ObjectModel`] trait and may alias
//! and contain cycles. Every object is translated at most once per run: the
//! first node built for an object is memoized under its identity before any of
//! its relations are visited, and later visits return that node.
//!
//! # Usage
//!
//! ```ignore
//! let sink = DiagnosticSink::new();
//! let Translation { forest, coverage } =
//!     translate(&graph, &[design], TranslateOptions::default(), &sink)?;
//! ```

#![warn(missing_docs)]

pub mod ancestors;
pub mod context;
pub mod decl;
pub mod errors;
pub mod expr;
pub mod factory;
pub mod generate;
pub mod instance;
pub mod literal;
pub mod registry;
pub mod stmt;
pub mod types;
pub mod visitor;

pub use ancestors::AncestorChain;
pub use context::TranslationContext;
pub use errors::{TranslateError, TranslateResult};
pub use registry::{Definition, ElaborationRegistry};

use log::{debug, info};
use uhdm_ast::{Ast, AstKind, Forest, NodeId};
use uhdm_common::InternalError;
use uhdm_config::TranslateOptions;
use uhdm_diagnostics::{CoverageReport, DiagnosticSink};
use uhdm_model::{ObjectId, ObjectKind, ObjectModel};
use uhdm_source::SourceLoc;

/// Output of a translation run.
#[derive(Debug)]
pub struct Translation {
    /// One root per translated design, plus the node arena and path table.
    pub forest: Forest,
    /// Per-line handled/unhandled status.
    pub coverage: CoverageReport,
}

/// Translates each design in `designs`, in order, within one run.
///
/// Definitions are shared across the designs of a run. Recoverable problems go
/// to `sink`; in strict mode the first one ends the run with
/// [`TranslateError::Aborted`].
pub fn translate(
    model: &dyn ObjectModel,
    designs: &[ObjectId],
    options: TranslateOptions,
    sink: &DiagnosticSink,
) -> Result<Translation, TranslateError> {
    let mut translator = Translator::new(model, options, sink);
    for &design in designs {
        translator.translate_design(design)?;
    }
    Ok(translator.finish())
}

/// Step-wise translation over one registry.
pub struct Translator<'a> {
    ctx: TranslationContext<'a>,
    designs: Vec<NodeId>,
    scratch: Option<NodeId>,
}

impl<'a> Translator<'a> {
    /// Creates a translator with an empty registry.
    pub fn new(model: &'a dyn ObjectModel, options: TranslateOptions, sink: &'a DiagnosticSink) -> Self {
        Self {
            ctx: TranslationContext::new(model, options, sink),
            designs: Vec::new(),
            scratch: None,
        }
    }

    /// Translates one design object and records it as a forest root.
    pub fn translate_design(&mut self, design: ObjectId) -> TranslateResult<NodeId> {
        let model = self.ctx.model;
        if !model.contains(design) {
            return Err(InternalError::new(format!("{design:?} is not in the model")).into());
        }
        if model.kind(design) != ObjectKind::Design {
            return Err(InternalError::new(format!(
                "{design:?} is a {}, not a design",
                model.kind(design)
            ))
            .into());
        }
        info!(design = model.display_name(design); "Translating design");
        let root = match self.ctx.registry.memo(design) {
            Some(existing) => existing,
            None => {
                self.ctx.enter(design);
                let result = visitor::check_relations(&mut self.ctx, design)
                    .and_then(|()| decl::translate_design(&mut self.ctx, design));
                self.ctx.leave();
                result?
            }
        };
        if !self.designs.contains(&root) {
            self.designs.push(root);
        }
        debug!(nodes = self.ctx.ast.len(), memoized = self.ctx.registry.memo_len(); "Design translated");
        Ok(root)
    }

    /// Translates a single object under a scratch design root that is not
    /// part of the forest.
    pub fn translate_object(&mut self, obj: ObjectId) -> TranslateResult<Option<NodeId>> {
        if !self.ctx.model.contains(obj) {
            return Err(InternalError::new(format!("{obj:?} is not in the model")).into());
        }
        let scratch = match self.scratch {
            Some(s) => s,
            None => {
                let s = self.ctx.ast.new_node(AstKind::Design, "", SourceLoc::DUMMY);
                self.scratch = Some(s);
                s
            }
        };
        visitor::visit_object(&mut self.ctx, obj, &AncestorChain::root(scratch))
    }

    /// The registry of this run.
    pub fn registry(&self) -> &ElaborationRegistry {
        &self.ctx.registry
    }

    /// Every node built so far.
    pub fn ast(&self) -> &Ast {
        &self.ctx.ast
    }

    /// Ends the run.
    pub fn finish(self) -> Translation {
        let summary = self.ctx.coverage.summary();
        info!(
            designs = self.designs.len(),
            handled = summary.handled,
            unhandled = summary.unhandled;
            "Translation finished",
        );
        Translation {
            forest: Forest {
                ast: self.ctx.ast,
                files: self.ctx.files,
                designs: self.designs,
            },
            coverage: self.ctx.coverage,
        }
    }
}
