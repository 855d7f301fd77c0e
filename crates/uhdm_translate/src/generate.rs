//! Generate scopes.

use crate::ancestors::AncestorChain;
use crate::context::TranslationContext;
use crate::errors::TranslateResult;
use crate::factory;
use crate::instance::populate_scope;
use crate::visitor::visit_one_to_many;
use uhdm_ast::{AstKind, NodeId};
use uhdm_model::{ObjectId, Relation};

/// Translates a generate scope array into a `GenBlock`. Each iteration that
/// yields a `GenBlock` is spliced into it rather than nested.
pub fn translate_gen_scope_array(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let array = factory::make_node(ctx, obj, AstKind::GenBlock);
    visit_one_to_many(
        ctx,
        obj,
        &[Relation::GenScope],
        &chain.push(array),
        move |ctx, scope| {
            if ctx.ast.kind(scope) == AstKind::GenBlock {
                for child in ctx.ast.children(scope).to_vec() {
                    ctx.ast.add_child(array, child);
                }
            } else {
                ctx.ast.add_child(array, scope);
            }
        },
    )?;
    Ok(Some(array))
}

/// Translates one generate iteration into a populated `GenBlock`.
pub fn translate_gen_scope(
    ctx: &mut TranslationContext<'_>,
    obj: ObjectId,
    chain: &AncestorChain<'_>,
) -> TranslateResult<Option<NodeId>> {
    let block = factory::make_node(ctx, obj, AstKind::GenBlock);
    populate_scope(ctx, obj, block, &chain.push(block))?;
    Ok(Some(block))
}
