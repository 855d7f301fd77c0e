//! Upward view of the nodes enclosing the one being built.

use uhdm_ast::{Ast, AstKind, NodeId};

/// A cons list of enclosing nodes, innermost first.
///
/// Each recursive translation step pushes the node it is populating and passes
/// the extended chain down; the chain itself is never mutated. Context such as
/// "the nearest process" is found by kind with [`AncestorChain::find`].
#[derive(Clone, Copy, Debug)]
pub struct AncestorChain<'p> {
    parent: Option<&'p AncestorChain<'p>>,
    node: NodeId,
}

impl<'p> AncestorChain<'p> {
    /// A chain holding only `node`.
    pub fn root(node: NodeId) -> Self {
        Self { parent: None, node }
    }

    /// A chain with `node` as the new innermost entry.
    pub fn push(&self, node: NodeId) -> AncestorChain<'_> {
        AncestorChain {
            parent: Some(self),
            node,
        }
    }

    /// The innermost node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The chain without its innermost entry.
    pub fn parent(&self) -> Option<&AncestorChain<'p>> {
        self.parent
    }

    /// Enclosing nodes, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut cursor = Some(self);
        std::iter::from_fn(move || {
            let entry = cursor?;
            cursor = entry.parent;
            Some(entry.node)
        })
    }

    /// Nearest node whose kind is in `kinds`.
    pub fn find(&self, ast: &Ast, kinds: &[AstKind]) -> Option<NodeId> {
        self.iter().find(|&n| kinds.contains(&ast.kind(n)))
    }

    /// Number of entries.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }
}
