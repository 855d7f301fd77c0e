//! Arena of AST nodes and the tree operations the translator relies on.

use crate::ids::NodeId;
use crate::kind::AstKind;
use crate::node::AstNode;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::{Index, IndexMut};
use uhdm_common::Arena;
use uhdm_source::SourceLoc;

/// Owns every node built during one translation run.
///
/// Children are stored as [`NodeId`]s, so a node may be referenced from more
/// than one parent; the translator relies on this for memoized objects that
/// are reachable through several relations.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Ast {
    nodes: Arena<NodeId, AstNode>,
}

impl Ast {
    /// Creates an empty tree arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a node and returns its identity.
    pub fn alloc(&mut self, node: AstNode) -> NodeId {
        self.nodes.alloc(node)
    }

    /// Shorthand for allocating a named node at a location.
    pub fn new_node(&mut self, kind: AstKind, name: impl Into<String>, loc: SourceLoc) -> NodeId {
        self.alloc(AstNode::new(kind).with_name(name).with_loc(loc))
    }

    /// Returns the node with the given ID.
    pub fn get(&self, id: NodeId) -> &AstNode {
        self.nodes.get(id)
    }

    /// Returns the node with the given ID mutably.
    pub fn get_mut(&mut self, id: NodeId) -> &mut AstNode {
        self.nodes.get_mut(id)
    }

    /// Number of allocated nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node has been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Kind of a node.
    pub fn kind(&self, id: NodeId) -> AstKind {
        self.nodes[id].kind
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id].name
    }

    /// Children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Appends `child` unless it is already a child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    /// First child of `parent` satisfying `pred`.
    pub fn find_child(&self, parent: NodeId, pred: impl Fn(&AstNode) -> bool) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| pred(&self.nodes[c]))
    }

    /// First child of `parent` with the given kind and name.
    pub fn find_child_named(&self, parent: NodeId, kind: AstKind, name: &str) -> Option<NodeId> {
        self.find_child(parent, |n| n.kind == kind && n.name == name)
    }

    /// Inserts `new_child` into `parent`, replacing a same-named child in place.
    ///
    /// When a child is replaced, grandchildren of the old node that the new node
    /// lacks are moved onto the new node, so repeated partial visits of the same
    /// definition accumulate. Named grandchildren match by kind and name,
    /// anonymous ones structurally. Anonymous children are appended; a child
    /// that is already present is left alone.
    pub fn add_or_replace_child(&mut self, parent: NodeId, new_child: NodeId) {
        if self.nodes[parent].children.contains(&new_child) {
            return;
        }
        let existing = {
            let name = &self.nodes[new_child].name;
            if name.is_empty() {
                None
            } else {
                self.nodes[parent]
                    .children
                    .iter()
                    .position(|&c| self.nodes[c].name == *name)
            }
        };
        let Some(idx) = existing else {
            self.nodes[parent].children.push(new_child);
            return;
        };
        let old = self.nodes[parent].children[idx];
        let carried: Vec<NodeId> = self.nodes[old]
            .children
            .iter()
            .copied()
            .filter(|&gc| !self.has_matching_child(new_child, gc))
            .collect();
        self.nodes[new_child].children.extend(carried);
        self.nodes[parent].children[idx] = new_child;
    }

    fn has_matching_child(&self, parent: NodeId, candidate: NodeId) -> bool {
        let p = &self.nodes[candidate];
        self.nodes[parent].children.iter().any(|&c| {
            if c == candidate {
                return true;
            }
            let n = &self.nodes[c];
            if p.name.is_empty() {
                self.structurally_eq(c, candidate)
            } else {
                n.kind == p.kind && n.name == p.name
            }
        })
    }

    /// Deep-copies the subtree at `root`, giving every copied node a fresh
    /// identity. Sharing and cycles inside the subtree are preserved.
    pub fn deep_clone(&mut self, root: NodeId) -> NodeId {
        let mut mapping = HashMap::new();
        self.clone_into(root, &mut mapping)
    }

    fn clone_into(&mut self, id: NodeId, mapping: &mut HashMap<NodeId, NodeId>) -> NodeId {
        if let Some(&copy) = mapping.get(&id) {
            return copy;
        }
        let mut node = self.nodes[id].clone();
        let children = std::mem::take(&mut node.children);
        let copy = self.nodes.alloc(node);
        mapping.insert(id, copy);
        let cloned: Vec<NodeId> = children
            .into_iter()
            .map(|c| self.clone_into(c, mapping))
            .collect();
        self.nodes[copy].children = cloned;
        copy
    }

    /// Compares two subtrees by kind, name, flags, port ID, value, attributes and
    /// children, ignoring identities and source locations.
    pub fn structurally_eq(&self, a: NodeId, b: NodeId) -> bool {
        let mut assumed = HashSet::new();
        self.eq_rec(a, b, &mut assumed)
    }

    fn eq_rec(&self, a: NodeId, b: NodeId, assumed: &mut HashSet<(NodeId, NodeId)>) -> bool {
        if a == b || !assumed.insert((a, b)) {
            return true;
        }
        let (x, y) = (&self.nodes[a], &self.nodes[b]);
        x.kind == y.kind
            && x.name == y.name
            && x.flags == y.flags
            && x.port_id == y.port_id
            && x.value == y.value
            && x.attributes == y.attributes
            && x.children.len() == y.children.len()
            && x
                .children
                .iter()
                .zip(&y.children)
                .all(|(&ca, &cb)| self.eq_rec(ca, cb, assumed))
    }

    /// Visits `root` and its descendants depth-first, each node once.
    pub fn walk(&self, root: NodeId, mut f: impl FnMut(NodeId, &AstNode)) {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let node = &self.nodes[id];
            f(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Counts nodes of `kind` reachable from `root`.
    pub fn count_kind(&self, root: NodeId, kind: AstKind) -> usize {
        let mut count = 0;
        self.walk(root, |_, n| {
            if n.kind == kind {
                count += 1;
            }
        });
        count
    }
}

impl Index<NodeId> for Ast {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &AstNode {
        self.get(id)
    }
}

impl IndexMut<NodeId> for Ast {
    fn index_mut(&mut self, id: NodeId) -> &mut AstNode {
        self.get_mut(id)
    }
}
