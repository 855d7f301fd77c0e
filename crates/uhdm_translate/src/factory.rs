//! Node construction from source object metadata.
//!
//! Every node that stands for a source object is built here so that it is
//! memoized under that object's identity before any child is visited.

use crate::context::TranslationContext;
use uhdm_ast::{AstKind, AstNode, NodeId};
use uhdm_common::ConstBits;
use uhdm_model::ObjectId;
use uhdm_source::SourceLoc;

/// Drops a library prefix such as `work@`.
pub fn strip_library(name: &str) -> &str {
    match name.split_once('@') {
        Some((_, rest)) => rest,
        None => name,
    }
}

/// Rewrites a source symbol into the target convention: a leading `\` unless
/// the name already starts with `\` or `$`, and `@` replaced by `_`.
pub fn sanitize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let body = name.replace('@', "_");
    if body.starts_with('\\') || body.starts_with('$') {
        body
    } else {
        format!("\\{body}")
    }
}

/// The raw name of `obj`: its instance name, else its definition name
/// without a library prefix.
pub fn object_name(ctx: &TranslationContext<'_>, obj: ObjectId) -> String {
    let model = ctx.model;
    match model.name(obj) {
        Some(name) => name.to_string(),
        None => model.def_name(obj).map(strip_library).unwrap_or("").to_string(),
    }
}

/// Canonical definition name of `obj`: its definition name without a library
/// prefix, else its instance name. Sanitized.
pub fn definition_name(ctx: &TranslationContext<'_>, obj: ObjectId) -> String {
    let model = ctx.model;
    let raw = model
        .def_name(obj)
        .map(strip_library)
        .or_else(|| model.name(obj))
        .unwrap_or("");
    sanitize(raw)
}

/// Builds a node for `obj` named after it and memoizes it.
pub fn make_node(ctx: &mut TranslationContext<'_>, obj: ObjectId, kind: AstKind) -> NodeId {
    let name = sanitize(&object_name(ctx, obj));
    make_named(ctx, obj, kind, name)
}

/// Builds a node for `obj` with an explicit name and memoizes it.
pub fn make_named(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    kind: AstKind,
    name: String,
) -> NodeId {
    let loc = ctx.loc_of(obj);
    let node = ctx.ast.alloc(AstNode::new(kind).with_name(name).with_loc(loc));
    ctx.registry.remember(obj, node);
    ctx.mark_line_handled(loc);
    node
}

/// Builds a node that stands for no source object.
pub fn synth(ctx: &mut TranslationContext<'_>, kind: AstKind, name: &str, loc: SourceLoc) -> NodeId {
    ctx.ast.new_node(kind, name, loc)
}

/// Builds an `Identifier` node.
pub fn identifier(ctx: &mut TranslationContext<'_>, name: &str, loc: SourceLoc) -> NodeId {
    synth(ctx, AstKind::Identifier, name, loc)
}

/// Builds a signed 32-bit integer constant.
pub fn int_constant(ctx: &mut TranslationContext<'_>, value: i64, loc: SourceLoc) -> NodeId {
    ctx.ast
        .alloc(AstNode::constant(ConstBits::from_i64(value, 32)).with_loc(loc))
}

/// Builds `Range[hi, lo]` over integer bounds.
pub fn int_range(ctx: &mut TranslationContext<'_>, hi: i64, lo: i64, loc: SourceLoc) -> NodeId {
    let left = int_constant(ctx, hi, loc);
    let right = int_constant(ctx, lo, loc);
    let range = synth(ctx, AstKind::Range, "", loc);
    ctx.ast.get_mut(range).children = vec![left, right];
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use uhdm_config::TranslateOptions;
    use uhdm_diagnostics::{DiagnosticSink, LineStatus};
    use uhdm_model::{ObjectGraph, ObjectKind};

    #[test]
    fn sanitize_rules() {
        assert_eq!(sanitize("top"), "\\top");
        assert_eq!(sanitize("\\esc"), "\\esc");
        assert_eq!(sanitize("$enum0"), "$enum0");
        assert_eq!(sanitize("work@top"), "\\work_top");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn strip_library_prefix() {
        assert_eq!(strip_library("work@top"), "top");
        assert_eq!(strip_library("top"), "top");
    }

    #[test]
    fn names_prefer_instance_then_definition() {
        let mut graph = ObjectGraph::new();
        let inst = graph
            .build(ObjectKind::Module)
            .name("u1")
            .def_name("work@sub")
            .id();
        let def = graph.build(ObjectKind::Module).def_name("work@sub").id();
        let sink = DiagnosticSink::new();
        let ctx = TranslationContext::new(&graph, TranslateOptions::default(), &sink);
        assert_eq!(object_name(&ctx, inst), "u1");
        assert_eq!(object_name(&ctx, def), "sub");
        assert_eq!(definition_name(&ctx, inst), "\\sub");
    }

    #[test]
    fn make_node_memoizes_and_marks() {
        let mut graph = ObjectGraph::new();
        let net = graph.build(ObjectKind::Net).name("a").at("m.sv", 3).id();
        let sink = DiagnosticSink::new();
        let mut ctx = TranslationContext::new(&graph, TranslateOptions::default(), &sink);
        let node = make_node(&mut ctx, net, AstKind::Wire);
        assert_eq!(ctx.ast.name(node), "\\a");
        assert_eq!(ctx.registry.memo(net), Some(node));
        let loc = ctx.ast.get(node).loc;
        assert_eq!(loc.line, 3);
        assert_eq!(ctx.coverage.status(loc), Some(LineStatus::Handled));
    }

    #[test]
    fn int_range_is_signed_32_bit_bounds() {
        let graph = ObjectGraph::new();
        let sink = DiagnosticSink::new();
        let mut ctx = TranslationContext::new(&graph, TranslateOptions::default(), &sink);
        let range = int_range(&mut ctx, 31, 0, SourceLoc::DUMMY);
        let hi = ctx.ast.children(range)[0];
        assert_eq!(ctx.ast.get(hi).bits().and_then(|b| b.to_u64()), Some(31));
        assert!(ctx.ast.get(hi).flags.is_signed);
    }
}
