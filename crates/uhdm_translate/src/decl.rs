//! Declarations: designs, packages, ports, nets, variables and parameters.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::errors::TranslateResult;
use crate::factory;
use crate::literal;
use crate::types;
use crate::visitor::{add_to, ignore, visit_handle, visit_object, visit_one_to_many};
use uhdm_ast::{AstKind, NodeId};
use uhdm_model::{Direction, NetType, ObjectId, ObjectKind, Property, Relation};

/// Translates a design: packages, interfaces, definitions, then the elaborated
/// instance trees. Definitions registered along the way are attached to the
/// design node in registration order.
pub fn translate_design(ctx: &mut TranslationContext<'_>, obj: ObjectId) -> TranslateResult<NodeId> {
    let design = factory::make_node(ctx, obj, AstKind::Design);
    let chain = AncestorChain::root(design);
    visit_one_to_many(
        ctx,
        obj,
        &[
            Relation::AllPackages,
            Relation::AllInterfaces,
            Relation::AllModules,
            Relation::TopModules,
        ],
        &chain,
        ignore,
    )?;
    for def in ctx.registry.take_unattached() {
        ctx.ast.add_child(design, def);
    }
    types::strip_type_qualifiers(ctx, design);
    Ok(design)
}

/// Translates a package into a registered `Package` definition.
pub fn translate_package(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let name = factory::definition_name(ctx, obj);
    if let Some(existing) = ctx.registry.template(&name) {
        ctx.registry.remember(obj, existing);
        return Ok(Some(existing));
    }
    let package = factory::make_named(ctx, obj, AstKind::Package, name.clone());
    ctx.registry.register_template(&name, package)?;
    let inner = chain.push(package);
    visit_one_to_many(ctx, obj, &[Relation::Typedef], &inner, add_to(package))?;
    visit_one_to_many(
        ctx,
        obj,
        &[Relation::Parameter, Relation::ParamAssign],
        &inner,
        add_to(package),
    )?;
    visit_one_to_many(
        ctx,
        obj,
        &[Relation::Net, Relation::Variables, Relation::TaskFunc],
        &inner,
        add_to(package),
    )?;
    Ok(Some(package))
}

/// Translates a port.
///
/// The low connection is the declaration the port exposes; when it yields a
/// `Wire`, that wire becomes the port. Otherwise a standalone port wire is
/// built.
pub fn translate_port(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let direction = model
        .property(obj, Property::Direction)
        .and_then(Direction::from_code);
    let declared = model
        .handle(obj, Relation::LowConn)
        .and_then(|low| match model.kind(low) {
            ObjectKind::RefObj => model.handle(low, Relation::Actual),
            ObjectKind::Net | ObjectKind::Variable => Some(low),
            _ => None,
        })
        .filter(|&d| matches!(model.kind(d), ObjectKind::Net | ObjectKind::Variable));

    if let Some(decl) = declared {
        if let Some(wire) = visit_object(ctx, decl, chain)? {
            if ctx.ast.kind(wire) == AstKind::Wire {
                mark_port(ctx, wire, direction);
                ctx.registry.remember(obj, wire);
                ctx.mark_handled(obj);
                return Ok(Some(wire));
            }
        }
    }

    let wire = factory::make_node(ctx, obj, AstKind::Wire);
    mark_port(ctx, wire, direction);
    types::apply_typespec(ctx, wire, obj, &chain.push(wire))?;
    Ok(Some(wire))
}

/// Sets direction flags and, once, a port number.
pub(crate) fn mark_port(ctx: &mut TranslationContext<'_>, wire: NodeId, direction: Option<Direction>) {
    let needs_id = ctx.ast.get(wire).port_id == 0;
    let port_id = if needs_id { ctx.registry.alloc_port_id() } else { 0 };
    let node = ctx.ast.get_mut(wire);
    if let Some((input, output)) = direction.map(Direction::flags) {
        node.flags.is_input = input;
        node.flags.is_output = output;
    }
    if needs_id {
        node.port_id = port_id;
    }
}

/// Translates a net or a variable into a `Wire`.
pub fn translate_net(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let wire = factory::make_node(ctx, obj, AstKind::Wire);
    let is_reg = model.kind(obj) == ObjectKind::Variable
        || model.property(obj, Property::NetType).map(NetType::from_code) == Some(NetType::Reg);
    {
        let flags = &mut ctx.ast.get_mut(wire).flags;
        flags.is_reg = is_reg;
        flags.is_signed = model.flag(obj, Property::Signed);
    }
    let inner = chain.push(wire);
    visit_one_to_many(ctx, obj, &[Relation::Range], &inner, add_to(wire))?;
    types::apply_typespec(ctx, wire, obj, &inner)?;
    Ok(Some(wire))
}

/// Translates a parameter declaration. Its value, if any, is the first child.
pub fn translate_parameter(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let kind = if model.flag(obj, Property::LocalParam) {
        AstKind::Localparam
    } else {
        AstKind::Parameter
    };
    let param = factory::make_node(ctx, obj, kind);
    if model.value(obj).is_some() {
        if let Some(value) = literal::value_node(ctx, obj)? {
            ctx.ast.add_child(param, value);
        }
    }
    visit_one_to_many(ctx, obj, &[Relation::Range], &chain.push(param), add_to(param))?;
    if let Some(ts) = model.handle(obj, Relation::Typespec) {
        if model.kind(ts) == ObjectKind::IntTypespec || model.flag(ts, Property::Signed) {
            ctx.ast.get_mut(param).flags.is_signed = true;
        }
    }
    Ok(Some(param))
}

/// Translates a parameter assignment by setting the value of the parameter it
/// names in the nearest scope, creating the parameter if the scope lacks it.
pub fn translate_param_assign(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let Some(scope) = chain.find(
        &ctx.ast,
        &[
            AstKind::Module,
            AstKind::Interface,
            AstKind::Package,
            AstKind::GenBlock,
        ],
    ) else {
        return Ok(None);
    };
    let Some(lhs) = model.handle(obj, Relation::Lhs) else {
        return Ok(None);
    };
    let name = factory::sanitize(model.display_name(lhs));
    if name.is_empty() {
        return Ok(None);
    }

    let existing = ctx.ast.find_child(scope, |n| {
        matches!(n.kind, AstKind::Parameter | AstKind::Localparam) && n.name == name
    });
    let param = match existing {
        Some(p) => p,
        None => {
            let kind = if model.flag(lhs, Property::LocalParam) {
                AstKind::Localparam
            } else {
                AstKind::Parameter
            };
            let loc = ctx.loc_of(obj);
            let p = factory::synth(ctx, kind, &name, loc);
            ctx.ast.add_child(scope, p);
            p
        }
    };
    ctx.registry.remember(obj, param);
    ctx.mark_handled(obj);

    if let Some(value) = visit_handle(ctx, obj, &[Relation::Rhs], &chain.push(param))? {
        let replace = ctx
            .ast
            .children(param)
            .first()
            .is_some_and(|&first| ctx.ast.kind(first) != AstKind::Range);
        let children = &mut ctx.ast.get_mut(param).children;
        if replace {
            children[0] = value;
        } else {
            children.insert(0, value);
        }
    }
    Ok(Some(param))
}
