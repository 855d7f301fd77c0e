//! Expressions: references, selects, ranges and operations.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::errors::{warn_unsupported_operator, TranslateResult};
use crate::factory;
use crate::visitor::{visit_handle, visit_object};
use uhdm_ast::{AstKind, NodeId};
use uhdm_model::{ObjectId, ObjectKind, OpType, Property, Relation};

/// Target kind of a one-to-one operator.
pub(crate) fn operator_kind(op: OpType) -> Option<AstKind> {
    Some(match op {
        OpType::Minus => AstKind::Neg,
        OpType::Plus => AstKind::Pos,
        OpType::Not => AstKind::LogicNot,
        OpType::BitNeg => AstKind::BitNot,
        OpType::UnaryAnd => AstKind::ReduceAnd,
        OpType::UnaryOr => AstKind::ReduceOr,
        OpType::UnaryXor => AstKind::ReduceXor,
        OpType::UnaryXnor => AstKind::ReduceXnor,
        OpType::Sub => AstKind::Sub,
        OpType::Div => AstKind::Div,
        OpType::Mod => AstKind::Mod,
        OpType::Eq => AstKind::Eq,
        OpType::Neq => AstKind::Ne,
        OpType::CaseEq => AstKind::EqX,
        OpType::CaseNeq => AstKind::NeX,
        OpType::Gt => AstKind::Gt,
        OpType::Ge => AstKind::Ge,
        OpType::Lt => AstKind::Lt,
        OpType::Le => AstKind::Le,
        OpType::LShift => AstKind::ShiftLeft,
        OpType::RShift => AstKind::ShiftRight,
        OpType::ArithLShift => AstKind::ShiftSLeft,
        OpType::ArithRShift => AstKind::ShiftSRight,
        OpType::Add => AstKind::Add,
        OpType::Mult => AstKind::Mul,
        OpType::Power => AstKind::Pow,
        OpType::LogAnd => AstKind::LogicAnd,
        OpType::LogOr => AstKind::LogicOr,
        OpType::BitAnd => AstKind::BitAnd,
        OpType::BitOr => AstKind::BitOr,
        OpType::BitXor => AstKind::BitXor,
        OpType::BitXnor => AstKind::BitXnor,
        OpType::Condition => AstKind::Ternary,
        OpType::Posedge => AstKind::Posedge,
        OpType::Negedge => AstKind::Negedge,
        _ => return None,
    })
}

/// Translates a reference into an `Identifier`.
pub fn translate_ref(ctx: &mut TranslationContext<'_>, obj: ObjectId) -> TranslateResult<NodeId> {
    Ok(factory::make_node(ctx, obj, AstKind::Identifier))
}

/// Translates a range into `Range[left, right]`.
pub fn translate_range(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<NodeId> {
    let range = factory::make_named(ctx, obj, AstKind::Range, String::new());
    let inner = chain.push(range);
    for rel in [Relation::LeftRange, Relation::RightRange] {
        if let Some(bound) = visit_handle(ctx, obj, &[rel], &inner)? {
            ctx.ast.add_child(range, bound);
        }
    }
    Ok(range)
}

/// Translates a part or bit select into an `Identifier` with a `Range` child.
pub fn translate_select(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let ident = factory::make_node(ctx, obj, AstKind::Identifier);
    let loc = ctx.ast.get(ident).loc;
    let range = factory::synth(ctx, AstKind::Range, "", loc);
    let inner = chain.push(range);
    let rels: &[Relation] = if model.kind(obj) == ObjectKind::BitSelect {
        &[Relation::Index]
    } else {
        &[Relation::LeftRange, Relation::RightRange]
    };
    for &rel in rels {
        if let Some(bound) = visit_handle(ctx, obj, &[rel], &inner)? {
            ctx.ast.add_child(range, bound);
        }
    }
    ctx.ast.add_child(ident, range);
    Ok(Some(ident))
}

/// A tagged pattern stands for its value.
pub fn translate_tagged_pattern(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let value = visit_handle(ctx, obj, &[Relation::Pattern], chain)?;
    if let Some(v) = value {
        ctx.registry.remember(obj, v);
        ctx.mark_handled(obj);
    }
    Ok(value)
}

/// Translates an operation.
pub fn translate_operation(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let code = model.property(obj, Property::OpType);
    let Some(op) = code.and_then(OpType::from_code) else {
        let what = match code {
            Some(c) => format!("operator code {c}"),
            None => "operation without an operator".to_string(),
        };
        return unsupported(ctx, obj, &what);
    };
    let operands = model.iterate(obj, Relation::Operand);

    match op {
        OpType::EventOr | OpType::List => hoist_event_list(ctx, obj, &operands, chain),
        OpType::Cast => {
            let value = match operands.first() {
                Some(&operand) => visit_object(ctx, operand, chain)?,
                None => None,
            };
            if let Some(v) = value {
                ctx.registry.remember(obj, v);
                ctx.mark_handled(obj);
            }
            Ok(value)
        }
        OpType::Concat | OpType::AssignmentPattern => {
            let concat = factory::make_named(ctx, obj, AstKind::Concat, String::new());
            let mut parts = visit_all(ctx, &operands, &chain.push(concat))?;
            parts.reverse();
            ctx.ast.get_mut(concat).children = parts;
            Ok(Some(concat))
        }
        OpType::MultiConcat => translate_replicate(ctx, obj, &operands, chain).map(Some),
        OpType::Inside => translate_inside(ctx, obj, &operands, chain),
        OpType::PreInc | OpType::PostInc | OpType::PreDec | OpType::PostDec => {
            translate_step(ctx, obj, op, &operands, chain)
        }
        OpType::UnaryNand | OpType::UnaryNor => {
            let not = factory::make_named(ctx, obj, AstKind::LogicNot, String::new());
            let reduce_kind = if op == OpType::UnaryNand {
                AstKind::ReduceAnd
            } else {
                AstKind::ReduceOr
            };
            let loc = ctx.ast.get(not).loc;
            let reduce = factory::synth(ctx, reduce_kind, "", loc);
            ctx.ast.add_child(not, reduce);
            let parts = visit_all(ctx, &operands, &chain.push(not))?;
            ctx.ast.get_mut(reduce).children = parts;
            Ok(Some(not))
        }
        _ => match operator_kind(op) {
            Some(kind) => {
                let node = factory::make_named(ctx, obj, kind, String::new());
                let parts = visit_all(ctx, &operands, &chain.push(node))?;
                ctx.ast.get_mut(node).children = parts;
                Ok(Some(node))
            }
            None => unsupported(ctx, obj, &format!("{op:?}")),
        },
    }
}

fn unsupported(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    what: &str,
) -> TranslateResult<Option<NodeId>> {
    let loc = ctx.loc_of(obj);
    ctx.report(warn_unsupported_operator(what, loc))?;
    Ok(None)
}

fn visit_all(
    ctx: &mut TranslationContext<'_>,
    objs: &[ObjectId],
    chain: &AncestorChain<'_>,
) -> TranslateResult<Vec<NodeId>> {
    let mut out = Vec::with_capacity(objs.len());
    for &o in objs {
        if let Some(node) = visit_object(ctx, o, chain)? {
            out.push(node);
        }
    }
    Ok(out)
}

/// Event list operands belong to the enclosing process; the list itself
/// produces no node.
fn hoist_event_list(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    operands: &[ObjectId],
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let Some(process) = chain.find(&ctx.ast, &[AstKind::Always, AstKind::Initial]) else {
        return unsupported(ctx, obj, "event list outside a process");
    };
    ctx.mark_handled(obj);
    for &operand in operands {
        if let Some(node) = visit_object(ctx, operand, chain)? {
            ctx.ast.add_child(process, node);
        }
    }
    Ok(None)
}

/// `{n{a, b}}` becomes `Replicate[n, Concat[b, a]]`.
fn translate_replicate(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    operands: &[ObjectId],
    chain: &AncestorChain<'_>,
) -> TranslateResult<NodeId> {
    let repl = factory::make_named(ctx, obj, AstKind::Replicate, String::new());
    let loc = ctx.ast.get(repl).loc;
    let inner = chain.push(repl);
    let Some((&count, items)) = operands.split_first() else {
        return Ok(repl);
    };
    if let Some(n) = visit_object(ctx, count, &inner)? {
        ctx.ast.add_child(repl, n);
    }
    let mut parts = visit_all(ctx, items, &inner)?;
    let body = match parts.as_slice() {
        [single] if ctx.ast.kind(*single) == AstKind::Concat => *single,
        _ => {
            parts.reverse();
            let concat = factory::synth(ctx, AstKind::Concat, "", loc);
            ctx.ast.get_mut(concat).children = parts;
            concat
        }
    };
    ctx.ast.add_child(repl, body);
    Ok(repl)
}

/// `x inside {a, b, c}` becomes `(x == a) || (x == b) || (x == c)`.
fn translate_inside(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    operands: &[ObjectId],
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let Some((&subject, candidates)) = operands.split_first() else {
        return unsupported(ctx, obj, "inside without operands");
    };
    if candidates.is_empty() {
        return unsupported(ctx, obj, "inside without candidates");
    }
    let loc = ctx.loc_of(obj);
    let Some(left) = visit_object(ctx, subject, chain)? else {
        return Ok(None);
    };

    let mut acc: Option<NodeId> = None;
    for (i, &candidate) in candidates.iter().enumerate() {
        let lhs = if i == 0 { left } else { ctx.ast.deep_clone(left) };
        let eq = factory::synth(ctx, AstKind::Eq, "", loc);
        ctx.ast.add_child(eq, lhs);
        if let Some(rhs) = visit_object(ctx, candidate, chain)? {
            ctx.ast.add_child(eq, rhs);
        }
        acc = Some(match acc {
            None => eq,
            Some(prev) => {
                let or = factory::synth(ctx, AstKind::LogicOr, "", loc);
                ctx.ast.get_mut(or).children = vec![prev, eq];
                or
            }
        });
    }
    if let Some(root) = acc {
        ctx.registry.remember(obj, root);
        ctx.mark_line_handled(loc);
    }
    Ok(acc)
}

/// `x++`, `++x`, `x--` and `--x` all become `x = x ± 1`.
fn translate_step(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    op: OpType,
    operands: &[ObjectId],
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let assign = factory::make_named(ctx, obj, AstKind::AssignEq, String::new());
    let loc = ctx.ast.get(assign).loc;
    let Some(&target) = operands.first() else {
        return Ok(Some(assign));
    };
    let Some(lhs) = visit_object(ctx, target, &chain.push(assign))? else {
        return Ok(Some(assign));
    };
    let kind = if matches!(op, OpType::PreInc | OpType::PostInc) {
        AstKind::Add
    } else {
        AstKind::Sub
    };
    let read = ctx.ast.deep_clone(lhs);
    let one = factory::int_constant(ctx, 1, loc);
    let step = factory::synth(ctx, kind, "", loc);
    ctx.ast.get_mut(step).children = vec![read, one];
    ctx.ast.get_mut(assign).children = vec![lhs, step];
    Ok(Some(assign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::W301;
    use uhdm_config::TranslateOptions;
    use uhdm_diagnostics::DiagnosticSink;
    use uhdm_model::ObjectGraph;
    use uhdm_source::SourceLoc;

    fn with_ctx(g: &ObjectGraph, f: impl FnOnce(&mut TranslationContext<'_>, &AncestorChain<'_>)) -> DiagnosticSink {
        let sink = DiagnosticSink::new();
        {
            let mut ctx = TranslationContext::new(g, TranslateOptions::default(), &sink);
            let m = ctx.ast.new_node(AstKind::Module, "\\m", SourceLoc::DUMMY);
            let chain = AncestorChain::root(m);
            f(&mut ctx, &chain);
        }
        sink
    }

    #[test]
    fn binary_maps_and_keeps_operand_order() {
        let mut g = ObjectGraph::new();
        let a = g.ref_obj("a", None);
        let b = g.ref_obj("b", None);
        let op = g.operation(OpType::Neq, &[a, b]);
        with_ctx(&g, |ctx, chain| {
            let n = visit_object(ctx, op, chain).unwrap().unwrap();
            assert_eq!(ctx.ast.kind(n), AstKind::Ne);
            let names: Vec<_> = ctx.ast.children(n).iter().map(|&c| ctx.ast.name(c)).collect();
            assert_eq!(names, ["\\a", "\\b"]);
        });
    }

    #[test]
    fn nand_is_not_of_reduce_and() {
        let mut g = ObjectGraph::new();
        let a = g.ref_obj("a", None);
        let op = g.operation(OpType::UnaryNand, &[a]);
        with_ctx(&g, |ctx, chain| {
            let n = visit_object(ctx, op, chain).unwrap().unwrap();
            assert_eq!(ctx.ast.kind(n), AstKind::LogicNot);
            let inner = ctx.ast.children(n)[0];
            assert_eq!(ctx.ast.kind(inner), AstKind::ReduceAnd);
            assert_eq!(ctx.ast.children(inner).len(), 1);
        });
    }

    #[test]
    fn replicate_wraps_items_in_concat() {
        let mut g = ObjectGraph::new();
        let n = g.int_const(4);
        let a = g.ref_obj("a", None);
        let b = g.ref_obj("b", None);
        let op = g.operation(OpType::MultiConcat, &[n, a, b]);
        with_ctx(&g, |ctx, chain| {
            let r = visit_object(ctx, op, chain).unwrap().unwrap();
            assert_eq!(ctx.ast.kind(r), AstKind::Replicate);
            let body = ctx.ast.children(r)[1];
            assert_eq!(ctx.ast.kind(body), AstKind::Concat);
            let names: Vec<_> = ctx.ast.children(body).iter().map(|&c| ctx.ast.name(c)).collect();
            assert_eq!(names, ["\\b", "\\a"]);
        });
    }

    #[test]
    fn cast_is_transparent() {
        let mut g = ObjectGraph::new();
        let a = g.ref_obj("a", None);
        let op = g.operation(OpType::Cast, &[a]);
        with_ctx(&g, |ctx, chain| {
            let n = visit_object(ctx, op, chain).unwrap().unwrap();
            assert_eq!(ctx.ast.kind(n), AstKind::Identifier);
            assert_eq!(ctx.registry.memo(op), Some(n));
        });
    }

    #[test]
    fn unknown_operator_is_reported() {
        let mut g = ObjectGraph::new();
        let a = g.ref_obj("a", None);
        let b = g.ref_obj("b", None);
        let wild = g.operation(OpType::WildEq, &[a, b]);
        let bogus = g.build(ObjectKind::Operation).prop(Property::OpType, 999).id();
        let sink = with_ctx(&g, |ctx, chain| {
            assert_eq!(visit_object(ctx, wild, chain).unwrap(), None);
            assert_eq!(visit_object(ctx, bogus, chain).unwrap(), None);
        });
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.code == W301));
        assert!(diags[1].message.contains("999"));
    }

    #[test]
    fn part_select_has_range() {
        let mut g = ObjectGraph::new();
        let hi = g.int_const(3);
        let lo = g.int_const(0);
        let sel = g
            .build(ObjectKind::PartSelect)
            .name("bus")
            .handle(Relation::LeftRange, hi)
            .handle(Relation::RightRange, lo)
            .id();
        with_ctx(&g, |ctx, chain| {
            let n = visit_object(ctx, sel, chain).unwrap().unwrap();
            assert_eq!(ctx.ast.kind(n), AstKind::Identifier);
            assert_eq!(ctx.ast.name(n), "\\bus");
            let range = ctx.ast.children(n)[0];
            assert_eq!(ctx.ast.children(range).len(), 2);
        });
    }

    #[test]
    fn event_list_outside_process_is_reported() {
        let mut g = ObjectGraph::new();
        let a = g.ref_obj("a", None);
        let b = g.ref_obj("b", None);
        let list = g.operation(OpType::EventOr, &[a, b]);
        let sink = with_ctx(&g, |ctx, chain| {
            assert_eq!(visit_object(ctx, list, chain).unwrap(), None);
        });
        assert_eq!(sink.diagnostics()[0].code, W301);
    }
}
