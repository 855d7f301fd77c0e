//! Statements, processes, tasks and functions.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::decl::mark_port;
use crate::errors::{note_missing_type_info, warn_unsupported_operator, TranslateResult};
use crate::expr::operator_kind;
use crate::factory;
use crate::types;
use crate::visitor::{add_to, visit_handle, visit_object, visit_one_to_many};
use uhdm_ast::{AstKind, AstNode, NodeId};
use uhdm_common::ConstBits;
use uhdm_model::{AlwaysType, CaseType, Direction, ObjectId, ObjectKind, OpType, Property, Relation};
use uhdm_source::SourceLoc;

/// Kinds that can hold statements appended next to an assignment.
const STATEMENT_CONTAINERS: &[AstKind] = &[
    AstKind::Block,
    AstKind::Always,
    AstKind::Initial,
    AstKind::Function,
    AstKind::Task,
    AstKind::Module,
    AstKind::Interface,
    AstKind::GenBlock,
];

/// Translates a continuous or procedural assignment.
///
/// An assignment pattern whose target layout is known expands into one
/// assignment per field, appended to the enclosing container; the call then
/// yields no node of its own.
pub fn translate_assignment(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let kind = if model.kind(obj) == ObjectKind::ContAssign {
        AstKind::Assign
    } else if model.flag(obj, Property::Blocking) {
        AstKind::AssignEq
    } else {
        AstKind::AssignLe
    };
    let lhs = model.handle(obj, Relation::Lhs);
    let rhs = model.handle(obj, Relation::Rhs);

    if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
        if is_assignment_pattern(ctx, rhs) {
            if let Some(first) = expand_aggregate(ctx, obj, kind, lhs, rhs, chain)? {
                ctx.registry.remember(obj, first);
                return Ok(None);
            }
            let target = factory::sanitize(model.display_name(lhs));
            let loc = ctx.loc_of(obj);
            ctx.report(note_missing_type_info(&target, loc))?;
        }
    }

    let assign = factory::make_named(ctx, obj, kind, String::new());
    let inner = chain.push(assign);
    let lhs_node = match lhs {
        Some(l) => translate_target(ctx, l, &inner)?,
        None => None,
    };
    let mut rhs_node = match rhs {
        Some(r) => visit_object(ctx, r, &inner)?,
        None => None,
    };

    let compound = model
        .property(obj, Property::OpType)
        .filter(|&code| code != OpType::Assignment.code());
    if let (Some(code), Some(target), Some(value)) = (compound, lhs_node, rhs_node) {
        match OpType::from_code(code).and_then(operator_kind) {
            Some(op_kind) => {
                let loc = ctx.ast.get(assign).loc;
                let read = ctx.ast.deep_clone(target);
                let op = factory::synth(ctx, op_kind, "", loc);
                ctx.ast.get_mut(op).children = vec![read, value];
                rhs_node = Some(op);
            }
            None => {
                let loc = ctx.loc_of(obj);
                ctx.report(warn_unsupported_operator(
                    &format!("compound assignment operator code {code}"),
                    loc,
                ))?;
            }
        }
    }

    let children: Vec<NodeId> = lhs_node.into_iter().chain(rhs_node).collect();
    ctx.ast.get_mut(assign).children = children;
    Ok(Some(assign))
}

fn is_assignment_pattern(ctx: &TranslationContext<'_>, obj: ObjectId) -> bool {
    let model = ctx.model;
    model.kind(obj) == ObjectKind::Operation
        && model.property(obj, Property::OpType) == Some(OpType::AssignmentPattern.code())
}

/// An assignment target. A declaration used as a target is a reference to it,
/// not a new declaration.
fn translate_target(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    match model.kind(obj) {
        ObjectKind::Net | ObjectKind::Variable => {
            let name = factory::sanitize(model.display_name(obj));
            let loc = ctx.loc_of(obj);
            Ok(Some(factory::identifier(ctx, &name, loc)))
        }
        _ => visit_object(ctx, obj, chain),
    }
}

/// Field names of the struct declared for `target`, if known.
fn field_layout(
    ctx: &TranslationContext<'_>,
    target: ObjectId,
    chain: &AncestorChain<'_>,
) -> Option<Vec<String>> {
    let model = ctx.model;
    let declared = match model.kind(target) {
        ObjectKind::RefObj => model
            .handle(target, Relation::Actual)
            .and_then(|actual| ctx.registry.memo(actual)),
        ObjectKind::Net | ObjectKind::Variable => ctx.registry.memo(target),
        _ => return None,
    };
    let name = factory::sanitize(model.display_name(target));
    let wire = declared
        .filter(|&w| ctx.ast.kind(w) == AstKind::Wire)
        .or_else(|| {
            chain
                .iter()
                .filter(|&n| {
                    let k = ctx.ast.kind(n);
                    k.is_scope() || matches!(k, AstKind::Function | AstKind::Task | AstKind::Block)
                })
                .find_map(|scope| ctx.ast.find_child_named(scope, AstKind::Wire, &name))
        })?;

    let shape = ctx
        .ast
        .find_child(wire, |n| n.kind == AstKind::Struct)
        .or_else(|| {
            let type_ref = ctx.ast.find_child(wire, |n| n.kind == AstKind::WireType)?;
            let typedef = ctx.registry.lookup_type(ctx.ast.name(type_ref))?;
            ctx.ast.find_child(typedef, |n| n.kind == AstKind::Struct)
        })?;
    let fields: Vec<String> = ctx
        .ast
        .children(shape)
        .iter()
        .filter(|&&c| ctx.ast.kind(c) == AstKind::StructItem)
        .map(|&c| ctx.ast.name(c).trim_start_matches('\\').to_string())
        .collect();
    (!fields.is_empty()).then_some(fields)
}

/// Pairs each field with the pattern element assigned to it. Tagged elements
/// match by name with `default` filling the rest; positional elements must
/// match the field count.
fn match_pattern(
    ctx: &TranslationContext<'_>,
    pattern: ObjectId,
    fields: &[String],
) -> Option<Vec<(String, ObjectId)>> {
    let model = ctx.model;
    let elements = model.iterate(pattern, Relation::Operand);
    let tagged = elements
        .iter()
        .all(|&e| model.kind(e) == ObjectKind::TaggedPattern);

    if !tagged {
        if elements.len() != fields.len() {
            return None;
        }
        return Some(fields.iter().cloned().zip(elements).collect());
    }

    let mut by_tag = Vec::new();
    let mut default = None;
    for &e in &elements {
        let tag = model
            .handle(e, Relation::Typespec)
            .and_then(|ts| model.name(ts))
            .or_else(|| model.name(e))?;
        let value = model.handle(e, Relation::Pattern)?;
        if tag == "default" {
            default = Some(value);
        } else {
            by_tag.push((tag.to_string(), value));
        }
    }
    fields
        .iter()
        .map(|f| {
            by_tag
                .iter()
                .find(|(t, _)| t == f)
                .map(|(_, v)| *v)
                .or(default)
                .map(|v| (f.clone(), v))
        })
        .collect()
}

fn expand_aggregate(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    kind: AstKind,
    lhs: ObjectId,
    rhs: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let Some(container) = chain.find(&ctx.ast, STATEMENT_CONTAINERS) else {
        return Ok(None);
    };
    let Some(fields) = field_layout(ctx, lhs, chain) else {
        return Ok(None);
    };
    let Some(pairs) = match_pattern(ctx, rhs, &fields) else {
        return Ok(None);
    };

    let base = factory::object_name(ctx, lhs);
    let loc = ctx.loc_of(obj);
    ctx.mark_line_handled(loc);
    ctx.mark_handled(rhs);
    let mut first = None;
    for (field, value) in pairs {
        let assign = factory::synth(ctx, kind, "", loc);
        let target = factory::identifier(ctx, &factory::sanitize(&format!("{base}.{field}")), loc);
        ctx.ast.add_child(assign, target);
        if let Some(v) = visit_object(ctx, value, &chain.push(assign))? {
            ctx.ast.add_child(assign, v);
        }
        ctx.ast.add_child(container, assign);
        first.get_or_insert(assign);
    }
    Ok(first)
}

/// Translates `always` or `initial`.
pub fn translate_process(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let kind = if model.kind(obj) == ObjectKind::Initial {
        AstKind::Initial
    } else {
        AstKind::Always
    };
    let process = factory::make_named(ctx, obj, kind, String::new());
    let flavour = match model
        .property(obj, Property::AlwaysType)
        .and_then(AlwaysType::from_code)
    {
        Some(AlwaysType::AlwaysComb) => Some("always_comb"),
        Some(AlwaysType::AlwaysFf) => Some("always_ff"),
        Some(AlwaysType::AlwaysLatch) => Some("always_latch"),
        _ => None,
    };
    if let Some(flavour) = flavour {
        ctx.ast.get_mut(process).set_attribute(flavour, "1");
    }
    let inner = chain.push(process);
    visit_one_to_many(ctx, obj, &[Relation::Stmt], &inner, add_to(process))?;
    Ok(Some(process))
}

/// Translates `@(...) stmt` into a `Block`. The sensitivity is hoisted into
/// the enclosing process.
pub fn translate_event_control(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let block = factory::make_named(ctx, obj, AstKind::Block, String::new());
    if let Some(condition) = model.handle(obj, Relation::Condition) {
        let process = chain.find(&ctx.ast, &[AstKind::Always, AstKind::Initial]);
        if let Some(sense) = visit_object(ctx, condition, chain)? {
            match process {
                Some(p) => ctx.ast.add_child(p, sense),
                None => {
                    let loc = ctx.loc_of(obj);
                    ctx.report(warn_unsupported_operator("event control outside a process", loc))?;
                }
            }
        }
    }
    if let Some(body) = model.handle(obj, Relation::Stmt) {
        add_statement(ctx, body, block, &chain.push(block))?;
    }
    Ok(Some(block))
}

/// Appends `stmt` to `block`; a `begin` is flattened into it.
fn add_statement(
    ctx: &mut TranslationContext<'_>,
    stmt: ObjectId,
    block: NodeId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<()> {
    let model = ctx.model;
    if model.kind(stmt) == ObjectKind::Begin
        && model.name(stmt).is_none()
        && ctx.registry.memo(stmt).is_none()
    {
        ctx.registry.remember(stmt, block);
        ctx.mark_handled(stmt);
        return visit_one_to_many(ctx, stmt, &[Relation::Stmt], chain, add_to(block));
    }
    if let Some(node) = visit_object(ctx, stmt, chain)? {
        ctx.ast.add_child(block, node);
    }
    Ok(())
}

/// A fresh `Block` holding the statement under `rel`, if any.
fn body_block(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    rel: Relation,
    loc: SourceLoc,
    chain: &AncestorChain<'_>,
) -> TranslateResult<NodeId> {
    let block = factory::synth(ctx, AstKind::Block, "", loc);
    if let Some(stmt) = ctx.model.handle(obj, rel) {
        add_statement(ctx, stmt, block, &chain.push(block))?;
    }
    Ok(block)
}

/// Translates `begin ... end`.
pub fn translate_begin(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let block = factory::make_node(ctx, obj, AstKind::Block);
    visit_one_to_many(ctx, obj, &[Relation::Stmt], &chain.push(block), add_to(block))?;
    Ok(Some(block))
}

/// `if (c) a else b` becomes `Case[c, Cond[1'b1, Block[a]], Cond[Default, Block[b]]]`.
pub fn translate_if(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let case = factory::make_named(ctx, obj, AstKind::Case, String::new());
    let loc = ctx.ast.get(case).loc;
    let inner = chain.push(case);
    if let Some(cond) = visit_handle(ctx, obj, &[Relation::Condition], &inner)? {
        ctx.ast.add_child(case, cond);
    }

    let then_cond = factory::synth(ctx, AstKind::Cond, "", loc);
    let truth = ctx
        .ast
        .alloc(AstNode::constant(ConstBits::from_bool(true)).with_loc(loc));
    let then_block = body_block(ctx, obj, Relation::Stmt, loc, &inner)?;
    ctx.ast.get_mut(then_cond).children = vec![truth, then_block];
    ctx.ast.add_child(case, then_cond);

    if model.kind(obj) == ObjectKind::IfElse {
        let else_cond = factory::synth(ctx, AstKind::Cond, "", loc);
        let default = factory::synth(ctx, AstKind::Default, "", loc);
        let else_block = body_block(ctx, obj, Relation::ElseStmt, loc, &inner)?;
        ctx.ast.get_mut(else_cond).children = vec![default, else_block];
        ctx.ast.add_child(case, else_cond);
    }
    Ok(Some(case))
}

/// Translates `case`, `casex` and `casez`.
pub fn translate_case(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let case = factory::make_named(ctx, obj, AstKind::Case, String::new());
    let inner = chain.push(case);
    if let Some(selector) = visit_handle(ctx, obj, &[Relation::Condition], &inner)? {
        ctx.ast.add_child(case, selector);
    }
    let item_kind = match model
        .property(obj, Property::CaseType)
        .and_then(CaseType::from_code)
    {
        Some(CaseType::X) => AstKind::CondX,
        Some(CaseType::Z) => AstKind::CondZ,
        _ => AstKind::Cond,
    };
    visit_one_to_many(ctx, obj, &[Relation::CaseItem], &inner, move |ctx, item| {
        if ctx.ast.kind(item) == AstKind::Cond {
            ctx.ast.get_mut(item).kind = item_kind;
        }
        ctx.ast.add_child(case, item);
    })?;
    Ok(Some(case))
}

/// Translates one case item into `Cond[exprs.., Block]`, with `Default` for an
/// item without expressions.
pub fn translate_case_item(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let cond = factory::make_named(ctx, obj, AstKind::Cond, String::new());
    let loc = ctx.ast.get(cond).loc;
    let inner = chain.push(cond);
    if model.iterate(obj, Relation::Expr).is_empty() {
        let default = factory::synth(ctx, AstKind::Default, "", loc);
        ctx.ast.add_child(cond, default);
    } else {
        visit_one_to_many(ctx, obj, &[Relation::Expr], &inner, add_to(cond))?;
    }
    let block = body_block(ctx, obj, Relation::Stmt, loc, &inner)?;
    ctx.ast.add_child(cond, block);
    Ok(Some(cond))
}

/// Translates a `for` loop into `For[init, cond, step, Block]` and declares
/// its loop variable in the enclosing process or subroutine.
pub fn translate_for(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let for_node = factory::make_named(ctx, obj, AstKind::For, String::new());
    let loc = ctx.ast.get(for_node).loc;
    hoist_loop_variable(ctx, obj, chain);
    let inner = chain.push(for_node);
    for rel in [Relation::ForInitStmt, Relation::Condition, Relation::ForIncStmt] {
        if let Some(part) = visit_handle(ctx, obj, &[rel], &inner)? {
            ctx.ast.add_child(for_node, part);
        }
    }
    let body = body_block(ctx, obj, Relation::Stmt, loc, &inner)?;
    ctx.ast.add_child(for_node, body);
    Ok(Some(for_node))
}

fn hoist_loop_variable(ctx: &mut TranslationContext<'_>, obj: ObjectId, chain: &AncestorChain<'_>) {
    let model = ctx.model;
    let variable = model
        .handle(obj, Relation::ForInitStmt)
        .and_then(|init| model.handle(init, Relation::Lhs))
        .and_then(|lhs| match model.kind(lhs) {
            ObjectKind::Variable => Some(lhs),
            ObjectKind::RefObj => model
                .handle(lhs, Relation::Actual)
                .filter(|&a| model.kind(a) == ObjectKind::Variable),
            _ => None,
        });
    let Some(variable) = variable else {
        return;
    };
    let scope = chain.find(
        &ctx.ast,
        &[AstKind::Always, AstKind::Initial, AstKind::Function, AstKind::Task],
    );
    let Some(scope) = scope else {
        return;
    };
    let name = factory::sanitize(model.display_name(variable));
    if ctx.ast.find_child_named(scope, AstKind::Wire, &name).is_some() {
        return;
    }
    let loc = ctx.loc_of(variable);
    let wire = factory::synth(ctx, AstKind::Wire, &name, loc);
    {
        let flags = &mut ctx.ast.get_mut(wire).flags;
        flags.is_reg = true;
        flags.is_signed = true;
    }
    let range = factory::int_range(ctx, 31, 0, loc);
    ctx.ast.add_child(wire, range);
    ctx.ast.add_child(scope, wire);
}

/// Translates `while (c) stmt` into `While[c, Block]`.
pub fn translate_while(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let node = factory::make_named(ctx, obj, AstKind::While, String::new());
    let loc = ctx.ast.get(node).loc;
    let inner = chain.push(node);
    if let Some(cond) = visit_handle(ctx, obj, &[Relation::Condition], &inner)? {
        ctx.ast.add_child(node, cond);
    }
    let body = body_block(ctx, obj, Relation::Stmt, loc, &inner)?;
    ctx.ast.add_child(node, body);
    Ok(Some(node))
}

/// Translates a function or task: I/O declarations, locals, the return
/// variable of a function, then the body block.
pub fn translate_task_func(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let kind = if model.kind(obj) == ObjectKind::Function {
        AstKind::Function
    } else {
        AstKind::Task
    };
    let sub = factory::make_node(ctx, obj, kind);
    let loc = ctx.ast.get(sub).loc;
    let inner = chain.push(sub);
    visit_one_to_many(ctx, obj, &[Relation::IoDecl, Relation::Variables], &inner, add_to(sub))?;

    if let Some(ret) = model.handle(obj, Relation::Return) {
        let wire = match visit_object(ctx, ret, &inner)? {
            Some(w) if ctx.ast.kind(w) == AstKind::Wire => w,
            _ => factory::synth(ctx, AstKind::Wire, "", loc),
        };
        let sub_name = ctx.ast.name(sub).to_string();
        let node = ctx.ast.get_mut(wire);
        if node.name.is_empty() {
            node.name = sub_name;
        }
        node.flags.is_reg = true;
        ctx.ast.add_child(sub, wire);
    }

    let body = body_block(ctx, obj, Relation::Stmt, loc, &inner)?;
    ctx.ast.add_child(sub, body);
    Ok(Some(sub))
}

/// Translates a subroutine argument declaration into a port `Wire`.
pub fn translate_io_decl(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let wire = factory::make_node(ctx, obj, AstKind::Wire);
    let direction = model
        .property(obj, Property::Direction)
        .and_then(Direction::from_code);
    mark_port(ctx, wire, direction);
    ctx.ast.get_mut(wire).flags.is_signed = model.flag(obj, Property::Signed);
    let inner = chain.push(wire);
    visit_one_to_many(ctx, obj, &[Relation::Range], &inner, add_to(wire))?;
    types::apply_typespec(ctx, wire, obj, &inner)?;
    Ok(Some(wire))
}

/// Translates a function, system function or task call.
pub fn translate_call(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let kind = if ctx.model.kind(obj) == ObjectKind::TaskCall {
        AstKind::TCall
    } else {
        AstKind::FCall
    };
    let call = factory::make_node(ctx, obj, kind);
    visit_one_to_many(ctx, obj, &[Relation::Argument], &chain.push(call), add_to(call))?;
    Ok(Some(call))
}
