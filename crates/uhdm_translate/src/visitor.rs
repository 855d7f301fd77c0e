//! Identity-memoized recursive walk over the source graph.
//!
//! [`visit_object`] is the single entry for translating any source object. It
//! returns the memoized node when the object was seen before; otherwise it
//! reports relations that no rule reads and dispatches on the object kind.
//! Rules build their node through [`factory`](crate::factory), which
//! memoizes it before children are visited, so revisiting an object through a
//! cycle or an alias returns the node under construction. A cycle that comes
//! back to an object before any node exists for it yields no node.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::errors::{warn_unsupported_object, warn_unsupported_relation, TranslateResult};
use crate::{decl, expr, generate, instance, literal, stmt, types};
use log::debug;
use uhdm_ast::NodeId;
use uhdm_model::{ObjectId, ObjectKind, Relation};

/// Relations that belong to a module or interface body.
pub(crate) const SCOPE_RELATIONS: &[Relation] = &[
    Relation::Port,
    Relation::Net,
    Relation::Variables,
    Relation::Parameter,
    Relation::ParamAssign,
    Relation::Typedef,
    Relation::ContAssign,
    Relation::Process,
    Relation::Module,
    Relation::Interface,
    Relation::GenScopeArray,
    Relation::TaskFunc,
];

/// Relations read by the rule for each object kind. A populated relation that
/// is neither listed here nor structural is reported as unsupported.
fn handled_relations(kind: ObjectKind) -> &'static [Relation] {
    use Relation as R;
    match kind {
        ObjectKind::Design => &[
            R::AllModules,
            R::TopModules,
            R::AllPackages,
            R::AllInterfaces,
        ],
        ObjectKind::Module | ObjectKind::Interface | ObjectKind::GenScope => SCOPE_RELATIONS,
        ObjectKind::Package => &[
            R::Parameter,
            R::ParamAssign,
            R::Typedef,
            R::Net,
            R::Variables,
            R::TaskFunc,
        ],
        ObjectKind::Port => &[R::LowConn, R::HighConn, R::Typespec],
        ObjectKind::Net | ObjectKind::Variable | ObjectKind::IoDecl => &[R::Range, R::Typespec],
        ObjectKind::Parameter => &[R::Typespec, R::Range],
        ObjectKind::ParamAssign | ObjectKind::ContAssign | ObjectKind::Assignment => {
            &[R::Lhs, R::Rhs]
        }
        ObjectKind::StructTypespec => &[R::TypespecMember],
        ObjectKind::EnumTypespec => &[R::EnumConst, R::Typespec],
        ObjectKind::LogicTypespec => &[R::Range],
        ObjectKind::TypespecMember => &[R::Typespec],
        ObjectKind::Range | ObjectKind::PartSelect => &[R::LeftRange, R::RightRange],
        ObjectKind::Always | ObjectKind::Initial | ObjectKind::Begin => &[R::Stmt],
        ObjectKind::EventControl | ObjectKind::If | ObjectKind::While => {
            &[R::Condition, R::Stmt]
        }
        ObjectKind::IfElse => &[R::Condition, R::Stmt, R::ElseStmt],
        ObjectKind::Case => &[R::Condition, R::CaseItem],
        ObjectKind::CaseItem => &[R::Expr, R::Stmt],
        ObjectKind::For => &[R::ForInitStmt, R::Condition, R::ForIncStmt, R::Stmt],
        ObjectKind::Operation => &[R::Operand, R::Typespec],
        ObjectKind::Constant => &[R::Typespec],
        ObjectKind::BitSelect => &[R::Index],
        ObjectKind::TaggedPattern => &[R::Typespec, R::Pattern],
        ObjectKind::GenScopeArray => &[R::GenScope],
        ObjectKind::Function | ObjectKind::Task => {
            &[R::IoDecl, R::Return, R::Stmt, R::Variables]
        }
        ObjectKind::FuncCall | ObjectKind::SysFuncCall | ObjectKind::TaskCall => &[R::Argument],
        ObjectKind::RefObj
        | ObjectKind::IntTypespec
        | ObjectKind::EnumConst
        | ObjectKind::Program
        | ObjectKind::ClassDefn
        | ObjectKind::Udp => &[],
    }
}

/// Translates `obj`, or returns the node already built for it.
pub fn visit_object(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    if let Some(node) = ctx.registry.memo(obj) {
        ctx.trace_reuse(obj, node);
        return Ok(Some(node));
    }
    // Rewrites that yield an operand's node register only after descending.
    if !ctx.registry.begin_visit(obj) {
        debug!(object:? = obj; "cycle reached {} before it had a node", ctx.model.kind(obj));
        return Ok(None);
    }
    ctx.enter(obj);
    let result = dispatch(ctx, obj, chain);
    ctx.leave();
    ctx.registry.end_visit(obj);
    result
}

fn dispatch(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let kind = ctx.model.kind(obj);
    if matches!(
        kind,
        ObjectKind::Program | ObjectKind::ClassDefn | ObjectKind::Udp
    ) {
        let name = ctx.model.display_name(obj).to_string();
        let loc = ctx.loc_of(obj);
        ctx.report(warn_unsupported_object(kind, &name, loc))?;
        return Ok(None);
    }
    check_relations(ctx, obj)?;

    match kind {
        ObjectKind::Design => decl::translate_design(ctx, obj).map(Some),
        ObjectKind::Module | ObjectKind::Interface => instance::translate_definition(ctx, obj, chain),
        ObjectKind::Package => decl::translate_package(ctx, obj, chain),
        ObjectKind::Port => decl::translate_port(ctx, obj, chain),
        ObjectKind::Net | ObjectKind::Variable => decl::translate_net(ctx, obj, chain),
        ObjectKind::Parameter => decl::translate_parameter(ctx, obj, chain),
        ObjectKind::ParamAssign => decl::translate_param_assign(ctx, obj, chain),
        ObjectKind::StructTypespec
        | ObjectKind::EnumTypespec
        | ObjectKind::LogicTypespec
        | ObjectKind::IntTypespec => types::translate_typedef(ctx, obj, chain),
        ObjectKind::TypespecMember => types::translate_member(ctx, obj, chain),
        ObjectKind::EnumConst => types::translate_enum_const(ctx, obj, chain),
        ObjectKind::Range => expr::translate_range(ctx, obj, chain).map(Some),
        ObjectKind::ContAssign | ObjectKind::Assignment => stmt::translate_assignment(ctx, obj, chain),
        ObjectKind::Always | ObjectKind::Initial => stmt::translate_process(ctx, obj, chain),
        ObjectKind::EventControl => stmt::translate_event_control(ctx, obj, chain),
        ObjectKind::Begin => stmt::translate_begin(ctx, obj, chain),
        ObjectKind::If | ObjectKind::IfElse => stmt::translate_if(ctx, obj, chain),
        ObjectKind::Case => stmt::translate_case(ctx, obj, chain),
        ObjectKind::CaseItem => stmt::translate_case_item(ctx, obj, chain),
        ObjectKind::For => stmt::translate_for(ctx, obj, chain),
        ObjectKind::While => stmt::translate_while(ctx, obj, chain),
        ObjectKind::Function | ObjectKind::Task => stmt::translate_task_func(ctx, obj, chain),
        ObjectKind::IoDecl => stmt::translate_io_decl(ctx, obj, chain),
        ObjectKind::FuncCall | ObjectKind::SysFuncCall | ObjectKind::TaskCall => {
            stmt::translate_call(ctx, obj, chain)
        }
        ObjectKind::Operation => expr::translate_operation(ctx, obj, chain),
        ObjectKind::Constant => literal::translate_constant(ctx, obj),
        ObjectKind::RefObj => expr::translate_ref(ctx, obj).map(Some),
        ObjectKind::PartSelect | ObjectKind::BitSelect => expr::translate_select(ctx, obj, chain),
        ObjectKind::TaggedPattern => expr::translate_tagged_pattern(ctx, obj, chain),
        ObjectKind::GenScopeArray => generate::translate_gen_scope_array(ctx, obj, chain),
        ObjectKind::GenScope => generate::translate_gen_scope(ctx, obj, chain),
        ObjectKind::Program | ObjectKind::ClassDefn | ObjectKind::Udp => Ok(None),
    }
}

/// Reports every populated relation of `obj` that no rule reads.
pub(crate) fn check_relations(ctx: &mut TranslationContext<'_>, obj: ObjectId) -> TranslateResult<()> {
    let model = ctx.model;
    let kind = model.kind(obj);
    let handled = handled_relations(kind);
    for rel in model.relations(obj) {
        if rel.is_structural() || handled.contains(&rel) {
            continue;
        }
        let loc = ctx.loc_of(obj);
        ctx.report(warn_unsupported_relation(rel, kind, model.display_name(obj), loc))?;
    }
    Ok(())
}

/// Visits every target of each relation in `rels`, in native order, passing
/// each produced node to `f`.
pub fn visit_one_to_many(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    rels: &[Relation],
    chain: &AncestorChain<'_>,
    mut f: impl FnMut(&mut TranslationContext<'_>, NodeId),
) -> TranslateResult<()> {
    let model = ctx.model;
    for &rel in rels {
        for target in model.iterate(obj, rel) {
            if let Some(node) = visit_object(ctx, target, chain)? {
                f(ctx, node);
            }
        }
    }
    Ok(())
}

/// Visits the target of the first populated relation in `rels` and passes the
/// produced node to `f`.
pub fn visit_one_to_one(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    rels: &[Relation],
    chain: &AncestorChain<'_>,
    f: impl FnOnce(&mut TranslationContext<'_>, NodeId),
) -> TranslateResult<()> {
    if let Some(node) = visit_handle(ctx, obj, rels, chain)? {
        f(ctx, node);
    }
    Ok(())
}

/// Visits the target of the first populated relation in `rels`.
pub fn visit_handle(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    rels: &[Relation],
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    match rels.iter().find_map(|&rel| model.handle(obj, rel)) {
        Some(target) => visit_object(ctx, target, chain),
        None => Ok(None),
    }
}

/// A callback appending each produced node to `parent`.
pub fn add_to(parent: NodeId) -> impl FnMut(&mut TranslationContext<'_>, NodeId) {
    move |ctx, node| ctx.ast.add_child(parent, node)
}

/// A callback that drops the produced node.
pub fn ignore(_: &mut TranslationContext<'_>, _: NodeId) {}
