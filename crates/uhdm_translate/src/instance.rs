//! Module and interface elaboration: templates, repeat visits and instances.
//!
//! A module-like object is one of three things:
//!
//! 1. the first sighting of a definition, which becomes the template;
//! 2. a later sighting of the same definition, whose contents are merged into
//!    the template by name;
//! 3. an instance with its own name, which becomes a `Cell`. If it overrides
//!    parameters it refers to a clone of the template named after its
//!    instance path; otherwise it shares the template.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::errors::TranslateResult;
use crate::factory;
use crate::registry::Definition;
use crate::visitor::{add_to, visit_handle, visit_one_to_many};
use log::debug;
use uhdm_ast::{AstKind, NodeId};
use uhdm_model::{ObjectId, ObjectKind, Property, Relation};

/// Translates a module or interface object.
pub fn translate_definition(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let kind = if model.kind(obj) == ObjectKind::Interface {
        AstKind::Interface
    } else {
        AstKind::Module
    };
    let canonical = factory::definition_name(ctx, obj);
    let instance = model.name(obj).map(factory::sanitize).unwrap_or_default();

    if !instance.is_empty() && instance != canonical {
        return instantiate(ctx, obj, kind, &canonical, &instance, chain).map(Some);
    }

    match ctx.registry.template(&canonical) {
        None => {
            let template = factory::make_named(ctx, obj, kind, canonical.clone());
            ctx.registry.register_template(&canonical, template)?;
            populate_scope(ctx, obj, template, &chain.push(template))?;
            Ok(Some(template))
        }
        Some(template) => {
            ctx.registry.remember(obj, template);
            ctx.mark_handled(obj);
            let loc = ctx.loc_of(obj);
            let scratch = factory::synth(ctx, kind, &canonical, loc);
            populate_scope(ctx, obj, scratch, &chain.push(scratch))?;
            merge_children(ctx, template, scratch);
            Ok(Some(template))
        }
    }
}

fn instantiate(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    kind: AstKind,
    canonical: &str,
    instance: &str,
    chain: &AncestorChain<'_>,
) -> TranslateResult<NodeId> {
    let loc = ctx.loc_of(obj);
    let template = match ctx.registry.template(canonical) {
        Some(t) => t,
        None => {
            let t = factory::synth(ctx, kind, canonical, loc);
            ctx.registry.register_template(canonical, t)?;
            t
        }
    };

    let cell = factory::make_named(ctx, obj, AstKind::Cell, instance.to_string());
    let scratch = factory::synth(ctx, kind, instance, loc);
    populate_scope(ctx, obj, scratch, &chain.push(scratch))?;

    let overrides = parameter_overrides(ctx, obj);
    let definition = if overrides.is_empty() {
        merge_children(ctx, template, scratch);
        canonical.to_string()
    } else {
        let name = format!("{canonical}${}", instance_path(ctx, chain, instance));
        let clone = match ctx.registry.definition(&name).map(Definition::node) {
            Some(existing) => existing,
            None => {
                let clone = ctx.ast.deep_clone(template);
                ctx.ast.get_mut(clone).name = name.clone();
                debug!(overrides:? = overrides; "specializing {canonical} as {name}");
                ctx.registry
                    .register_specialized(&name, canonical, clone, overrides)?;
                clone
            }
        };
        apply_overrides(ctx, clone, scratch);
        name
    };

    let cell_type = factory::synth(ctx, AstKind::CellType, &definition, loc);
    ctx.ast.add_child(cell, cell_type);

    let model = ctx.model;
    for port in model.iterate(obj, Relation::Port) {
        let formal = factory::sanitize(model.display_name(port));
        let port_loc = ctx.loc_of(port);
        let arg = factory::synth(ctx, AstKind::Argument, &formal, port_loc);
        if let Some(actual) = visit_handle(ctx, port, &[Relation::HighConn], chain)? {
            ctx.ast.add_child(arg, actual);
        }
        ctx.ast.add_child(cell, arg);
    }
    Ok(cell)
}

/// Visits the contents of a module, interface or generate scope into `scope`.
///
/// Typedefs come first so declarations can refer to them; parameters come
/// before everything whose shape may depend on them.
pub(crate) fn populate_scope(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    scope: NodeId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<()> {
    visit_one_to_many(ctx, obj, &[Relation::Typedef], chain, add_to(scope))?;
    visit_one_to_many(
        ctx,
        obj,
        &[Relation::Parameter, Relation::ParamAssign],
        chain,
        add_to(scope),
    )?;
    visit_one_to_many(
        ctx,
        obj,
        &[Relation::Net, Relation::Variables, Relation::Port],
        chain,
        add_to(scope),
    )?;
    visit_one_to_many(
        ctx,
        obj,
        &[Relation::Module, Relation::Interface],
        chain,
        move |ctx, node| {
            if ctx.ast.kind(node) == AstKind::Cell {
                ctx.ast.add_child(scope, node);
            }
        },
    )?;
    visit_one_to_many(
        ctx,
        obj,
        &[
            Relation::GenScopeArray,
            Relation::ContAssign,
            Relation::Process,
            Relation::TaskFunc,
        ],
        chain,
        add_to(scope),
    )?;
    Ok(())
}

/// Moves the children of `scratch` into `target`. Named children replace
/// same-named ones in place; anonymous ones are appended unless an equal
/// child is already there.
pub(crate) fn merge_children(ctx: &mut TranslationContext<'_>, target: NodeId, scratch: NodeId) {
    for child in ctx.ast.children(scratch).to_vec() {
        if ctx.ast.name(child).is_empty() && has_equal_child(ctx, target, child) {
            continue;
        }
        ctx.ast.add_or_replace_child(target, child);
    }
}

fn has_equal_child(ctx: &TranslationContext<'_>, parent: NodeId, candidate: NodeId) -> bool {
    ctx.ast
        .children(parent)
        .iter()
        .any(|&c| c == candidate || ctx.ast.structurally_eq(c, candidate))
}

/// Applies the parameters of `scratch` to a specialized clone. Other children
/// are added only when the clone has nothing of the same name.
fn apply_overrides(ctx: &mut TranslationContext<'_>, clone: NodeId, scratch: NodeId) {
    for child in ctx.ast.children(scratch).to_vec() {
        let node = ctx.ast.get(child);
        if node.kind == AstKind::Parameter {
            ctx.ast.add_or_replace_child(clone, child);
            continue;
        }
        let present = if node.name.is_empty() {
            has_equal_child(ctx, clone, child)
        } else {
            let name = node.name.clone();
            ctx.ast.find_child(clone, |n| n.name == name).is_some()
        };
        if !present {
            ctx.ast.add_child(clone, child);
        }
    }
}

/// Names of the parameters `obj` assigns itself. Values inherited from the
/// definition are not overrides, even while the template is still empty.
fn parameter_overrides(ctx: &TranslationContext<'_>, obj: ObjectId) -> Vec<String> {
    let model = ctx.model;
    let mut overrides = Vec::new();
    for assign in model.iterate(obj, Relation::ParamAssign) {
        let Some(lhs) = model.handle(assign, Relation::Lhs) else {
            continue;
        };
        if model.flag(lhs, Property::LocalParam) {
            continue;
        }
        let name = factory::sanitize(model.display_name(lhs));
        if !name.is_empty() && !overrides.contains(&name) {
            overrides.push(name);
        }
    }
    overrides
}

/// Dotted path of enclosing instance and generate names, outermost first,
/// ending with `instance`.
fn instance_path(ctx: &TranslationContext<'_>, chain: &AncestorChain<'_>, instance: &str) -> String {
    let mut parts: Vec<&str> = chain
        .iter()
        .filter(|&n| {
            matches!(
                ctx.ast.kind(n),
                AstKind::Module | AstKind::Interface | AstKind::GenBlock
            )
        })
        .map(|n| ctx.ast.name(n).trim_start_matches('\\'))
        .collect();
    parts.reverse();
    parts.push(instance.trim_start_matches('\\'));
    parts.join(".")
}
