//! Shared helpers for the translator integration tests.

#![allow(dead_code)]

use uhdm_ast::{Ast, AstKind, NodeId};
use uhdm_config::TranslateOptions;
use uhdm_diagnostics::DiagnosticSink;
use uhdm_model::{ObjectGraph, ObjectId, ObjectKind, Relation};
use uhdm_translate::{translate, TranslateError, Translation};

/// Translates one design with default options.
pub fn run(graph: &ObjectGraph, design: ObjectId) -> (Translation, DiagnosticSink) {
    let sink = DiagnosticSink::new();
    let out = translate(graph, &[design], TranslateOptions::default(), &sink)
        .expect("non-strict translation never aborts");
    (out, sink)
}

/// Translates one design with explicit options.
pub fn run_with(
    graph: &ObjectGraph,
    design: ObjectId,
    options: TranslateOptions,
) -> (Result<Translation, TranslateError>, DiagnosticSink) {
    let sink = DiagnosticSink::new();
    let out = translate(graph, &[design], options, &sink);
    (out, sink)
}

/// A design object listing definitions and top-level instances.
pub fn design(g: &mut ObjectGraph, defs: &[ObjectId], tops: &[ObjectId]) -> ObjectId {
    g.build(ObjectKind::Design)
        .name("design")
        .children(Relation::AllModules, defs)
        .children(Relation::TopModules, tops)
        .id()
}

/// A module definition object (`def_name = work@<name>`).
pub fn module_def(g: &mut ObjectGraph, name: &str) -> ObjectId {
    g.build(ObjectKind::Module)
        .def_name(&format!("work@{name}"))
        .at(&format!("{name}.sv"), 1)
        .id()
}

/// A module instance object.
pub fn module_inst(g: &mut ObjectGraph, inst: &str, def: &str) -> ObjectId {
    g.build(ObjectKind::Module)
        .name(inst)
        .def_name(&format!("work@{def}"))
        .at(&format!("{def}.sv"), 1)
        .id()
}

/// Names of `nodes`.
pub fn names(ast: &Ast, nodes: &[NodeId]) -> Vec<String> {
    nodes.iter().map(|&n| ast.name(n).to_string()).collect()
}

/// Children of `parent` with the given kind.
pub fn children_of_kind(ast: &Ast, parent: NodeId, kind: AstKind) -> Vec<NodeId> {
    ast.children(parent)
        .iter()
        .copied()
        .filter(|&c| ast.kind(c) == kind)
        .collect()
}

/// Kinds of the children of `parent`.
pub fn child_kinds(ast: &Ast, parent: NodeId) -> Vec<AstKind> {
    ast.children(parent).iter().map(|&c| ast.kind(c)).collect()
}

/// Unsigned value of a constant node.
pub fn const_value(ast: &Ast, node: NodeId) -> Option<u64> {
    ast.get(node).bits().and_then(|b| b.to_u64())
}
