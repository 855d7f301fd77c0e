//! Typedefs, type shapes and type references on declarations.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::errors::TranslateResult;
use crate::factory;
use crate::literal;
use crate::registry::unqualified;
use crate::visitor::{add_to, visit_object, visit_one_to_many};
use uhdm_ast::{AstKind, NodeId};
use uhdm_model::{ObjectId, ObjectKind, Property, Relation};

/// Attribute linking a declaration or typedef to its synthetic enum.
pub const ENUM_TYPE_ATTR: &str = "enum_type";

/// Translates a typespec into a `Typedef` holding its shape, and registers the
/// typedef under its qualified name (`\pkg::t` inside a package, `\t`
/// elsewhere).
pub fn translate_typedef(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let raw = model.name(obj).unwrap_or("");
    let tail = raw.rsplit("::").next().unwrap_or(raw);
    let typedef = factory::make_named(ctx, obj, AstKind::Typedef, factory::sanitize(tail));

    let qualified = match chain.find(&ctx.ast, &[AstKind::Package]) {
        Some(pkg) => format!("{}::{}", ctx.ast.name(pkg), tail),
        None => factory::sanitize(tail),
    };
    ctx.registry.register_type(typedef, qualified);

    if let Some(shape) = build_shape(ctx, obj, &chain.push(typedef))? {
        ctx.ast.add_child(typedef, shape);
        if ctx.ast.kind(shape) == AstKind::Enum {
            let enum_name = ctx.ast.name(shape).to_string();
            ctx.ast.get_mut(typedef).set_attribute(ENUM_TYPE_ATTR, enum_name);
        }
    }
    Ok(Some(typedef))
}

/// Builds the shape of a typespec: `Struct`, `Enum`, or a `Wire` for logic and
/// integer aliases.
pub fn build_shape(
    ctx: &mut TranslationContext<'_>,
    ts: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let model = ctx.model;
    let loc = ctx.loc_of(ts);
    let shape = match model.kind(ts) {
        ObjectKind::StructTypespec => {
            let s = factory::synth(ctx, AstKind::Struct, "", loc);
            visit_one_to_many(ctx, ts, &[Relation::TypespecMember], &chain.push(s), add_to(s))?;
            s
        }
        ObjectKind::EnumTypespec => {
            let name = format!("$enum{}", ctx.registry.alloc_enum_id());
            let e = factory::synth(ctx, AstKind::Enum, &name, loc);
            let inner = chain.push(e);
            visit_one_to_many(ctx, ts, &[Relation::EnumConst], &inner, add_to(e))?;
            let base_ranges = match model.handle(ts, Relation::Typespec) {
                Some(base) => typespec_ranges(ctx, base, &inner)?,
                None => Vec::new(),
            };
            if let Some(base) = model.handle(ts, Relation::Typespec) {
                if model.flag(base, Property::Signed) {
                    ctx.ast.get_mut(e).flags.is_signed = true;
                }
            }
            for item in ctx.ast.children(e).to_vec() {
                for &range in &base_ranges {
                    let copy = ctx.ast.deep_clone(range);
                    ctx.ast.add_child(item, copy);
                }
            }
            e
        }
        ObjectKind::LogicTypespec => {
            let w = factory::synth(ctx, AstKind::Wire, "", loc);
            ctx.ast.get_mut(w).flags.is_logic = true;
            ctx.ast.get_mut(w).flags.is_signed = model.flag(ts, Property::Signed);
            for range in typespec_ranges(ctx, ts, chain)? {
                ctx.ast.add_child(w, range);
            }
            w
        }
        ObjectKind::IntTypespec => {
            let w = factory::synth(ctx, AstKind::Wire, "", loc);
            int_shape(ctx, w, loc);
            w
        }
        _ => return Ok(None),
    };
    Ok(Some(shape))
}

fn int_shape(ctx: &mut TranslationContext<'_>, node: NodeId, loc: uhdm_source::SourceLoc) {
    let flags = &mut ctx.ast.get_mut(node).flags;
    flags.is_signed = true;
    flags.is_reg = true;
    let range = factory::int_range(ctx, 31, 0, loc);
    ctx.ast.add_child(node, range);
}

/// Fresh copies of the ranges of a typespec, one per use site.
fn typespec_ranges(
    ctx: &mut TranslationContext<'_>,
    ts: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Vec<NodeId>> {
    let model = ctx.model;
    let mut out = Vec::new();
    for range in model.iterate(ts, Relation::Range) {
        if let Some(node) = visit_object(ctx, range, chain)? {
            out.push(ctx.ast.deep_clone(node));
        }
    }
    Ok(out)
}

/// Translates a struct member into a `StructItem`.
pub fn translate_member(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let item = factory::make_node(ctx, obj, AstKind::StructItem);
    apply_typespec(ctx, item, obj, &chain.push(item))?;
    Ok(Some(item))
}

/// Translates an enum constant into an `EnumItem` carrying its value.
pub fn translate_enum_const(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    _chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let item = factory::make_node(ctx, obj, AstKind::EnumItem);
    if ctx.model.value(obj).is_some() {
        if let Some(value) = literal::value_node(ctx, obj)? {
            ctx.ast.add_child(item, value);
        }
    }
    Ok(Some(item))
}

/// Applies the `Typespec` relation of `obj` to the declaration `node`.
///
/// Named structs and enums become an `is_custom_type` flag plus a `WireType`
/// child naming the type; the shape stays with the typedef. Anonymous ones
/// are inlined. Logic and integer types contribute flags and ranges unless
/// `obj` declares its own ranges.
pub fn apply_typespec(
    ctx: &mut TranslationContext<'_>,
    node: NodeId,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<()> {
    let model = ctx.model;
    let Some(ts) = model.handle(obj, Relation::Typespec) else {
        return Ok(());
    };
    let own_ranges = !model.iterate(obj, Relation::Range).is_empty();
    let loc = ctx.ast.get(node).loc;
    match model.kind(ts) {
        ObjectKind::StructTypespec | ObjectKind::EnumTypespec => match model.name(ts) {
            Some(type_name) => {
                let type_name = factory::sanitize(type_name);
                let typedef = match ctx.registry.lookup_type(&type_name) {
                    Some(td) => Some(td),
                    None => declare_late(ctx, ts, chain)?,
                };
                let wire_type = factory::synth(ctx, AstKind::WireType, &type_name, loc);
                ctx.ast.add_child(node, wire_type);
                ctx.ast.get_mut(node).flags.is_custom_type = true;
                let enum_type = typedef
                    .and_then(|td| ctx.ast.get(td).attribute(ENUM_TYPE_ATTR))
                    .map(str::to_string);
                if let Some(enum_type) = enum_type {
                    ctx.ast.get_mut(node).set_attribute(ENUM_TYPE_ATTR, enum_type);
                }
            }
            None => {
                if let Some(shape) = build_shape(ctx, ts, chain)? {
                    ctx.ast.add_child(node, shape);
                    if ctx.ast.kind(shape) == AstKind::Enum {
                        let enum_name = ctx.ast.name(shape).to_string();
                        ctx.ast.get_mut(node).set_attribute(ENUM_TYPE_ATTR, enum_name);
                    }
                }
            }
        },
        ObjectKind::LogicTypespec => {
            ctx.ast.get_mut(node).flags.is_logic = true;
            if !own_ranges {
                for range in typespec_ranges(ctx, ts, chain)? {
                    ctx.ast.add_child(node, range);
                }
            }
        }
        ObjectKind::IntTypespec => {
            if own_ranges {
                let flags = &mut ctx.ast.get_mut(node).flags;
                flags.is_signed = true;
                flags.is_reg = true;
            } else {
                int_shape(ctx, node, loc);
            }
        }
        _ => {}
    }
    if model.flag(ts, Property::Signed) {
        ctx.ast.get_mut(node).flags.is_signed = true;
    }
    Ok(())
}

/// Translates a named type seen before its declaration and attaches the
/// typedef to the nearest scope.
fn declare_late(
    ctx: &mut TranslationContext<'_>,
    ts: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let scope = chain.iter().find(|&n| ctx.ast.kind(n).is_scope());
    let Some(scope) = scope else {
        return Ok(None);
    };
    let typedef = visit_object(ctx, ts, &AncestorChain::root(scope))?;
    if let Some(td) = typedef {
        ctx.ast.add_child(scope, td);
    }
    Ok(typedef)
}

/// Rewrites package-qualified `WireType` references to the unqualified name
/// when the enclosing scope declares a typedef of that name. The first
/// matching typedef in child order wins.
pub fn strip_type_qualifiers(ctx: &mut TranslationContext<'_>, root: NodeId) {
    let mut scopes = Vec::new();
    ctx.ast.walk(root, |id, node| {
        if node.kind.is_scope() {
            scopes.push(id);
        }
    });
    let mut renames = Vec::new();
    for scope in scopes {
        let typedefs: Vec<&str> = ctx
            .ast
            .children(scope)
            .iter()
            .filter(|&&c| ctx.ast.kind(c) == AstKind::Typedef)
            .map(|&c| ctx.ast.name(c))
            .collect();
        if typedefs.is_empty() {
            continue;
        }
        ctx.ast.walk(scope, |id, node| {
            if node.kind != AstKind::WireType || !node.name.contains("::") {
                return;
            }
            let tail = unqualified(&node.name);
            if let Some(local) = typedefs.iter().find(|t| unqualified(t) == tail) {
                renames.push((id, local.to_string()));
            }
        });
    }
    for (id, name) in renames {
        ctx.ast.get_mut(id).name = name;
    }
}
