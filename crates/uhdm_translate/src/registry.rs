//! Per-run elaboration state: definitions, type names, the identity memo and
//! synthetic ID counters.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use uhdm_ast::NodeId;
use uhdm_common::{InternalError, UhdmResult};
use uhdm_model::ObjectId;

/// One registered module, interface or package definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    /// The canonical node for a definition name, shared by every instance that
    /// overrides nothing.
    Template {
        /// The definition node.
        node: NodeId,
    },
    /// A deep copy of a template carrying one instance path's parameter
    /// overrides.
    Specialized {
        /// Canonical name of the template this was cloned from.
        of: String,
        /// The cloned definition node.
        node: NodeId,
        /// Names of the overridden parameters.
        overrides: Vec<String>,
    },
}

impl Definition {
    /// The definition node.
    pub fn node(&self) -> NodeId {
        match self {
            Definition::Template { node } | Definition::Specialized { node, .. } => *node,
        }
    }

    /// Returns `true` for a specialized clone.
    pub fn is_specialized(&self) -> bool {
        matches!(self, Definition::Specialized { .. })
    }
}

/// Lookup tables that live for exactly one translation run.
///
/// Definitions keep registration order so that unattached definitions are
/// appended to a design in the order they were first seen.
#[derive(Debug, Default)]
pub struct ElaborationRegistry {
    definitions: IndexMap<String, Definition>,
    attached: HashSet<NodeId>,
    type_names: IndexMap<NodeId, String>,
    memo: HashMap<ObjectId, NodeId>,
    visiting: HashSet<ObjectId>,
    next_enum_id: u32,
    next_port_id: u32,
}

impl ElaborationRegistry {
    /// An empty registry. Port IDs start at 1, enum IDs at 0.
    pub fn new() -> Self {
        Self {
            next_port_id: 1,
            ..Self::default()
        }
    }

    /// Node previously built for `obj`.
    pub fn memo(&self, obj: ObjectId) -> Option<NodeId> {
        self.memo.get(&obj).copied()
    }

    /// Records the node built for `obj`. The first registration wins; later
    /// calls for the same object are ignored.
    pub fn remember(&mut self, obj: ObjectId, node: NodeId) {
        self.memo.entry(obj).or_insert(node);
    }

    /// Points `obj` at `node`, replacing any earlier registration.
    pub fn rebind(&mut self, obj: ObjectId, node: NodeId) {
        self.memo.insert(obj, node);
    }

    /// Marks `obj` as being translated. Returns `false` if it already was,
    /// which means traversal came back to it before any node was registered.
    pub fn begin_visit(&mut self, obj: ObjectId) -> bool {
        self.visiting.insert(obj)
    }

    /// Clears the mark set by [`begin_visit`](Self::begin_visit).
    pub fn end_visit(&mut self, obj: ObjectId) {
        self.visiting.remove(&obj);
    }

    /// Number of memoized objects.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Registers the canonical node for `name`.
    pub fn register_template(&mut self, name: &str, node: NodeId) -> UhdmResult<()> {
        if self.definitions.contains_key(name) {
            return Err(InternalError::new(format!(
                "definition `{name}` registered twice"
            )));
        }
        self.definitions
            .insert(name.to_string(), Definition::Template { node });
        Ok(())
    }

    /// Registers a specialized clone of `of` under `name`.
    pub fn register_specialized(
        &mut self,
        name: &str,
        of: &str,
        node: NodeId,
        overrides: Vec<String>,
    ) -> UhdmResult<()> {
        if self.definitions.contains_key(name) {
            return Err(InternalError::new(format!(
                "definition `{name}` registered twice"
            )));
        }
        self.definitions.insert(
            name.to_string(),
            Definition::Specialized {
                of: of.to_string(),
                node,
                overrides,
            },
        );
        Ok(())
    }

    /// Looks up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// The template node for a canonical name.
    pub fn template(&self, name: &str) -> Option<NodeId> {
        match self.definitions.get(name)? {
            Definition::Template { node } => Some(*node),
            Definition::Specialized { .. } => None,
        }
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Definition nodes not yet attached to any design, in registration order.
    /// Each is marked attached.
    pub fn take_unattached(&mut self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for def in self.definitions.values() {
            let node = def.node();
            if self.attached.insert(node) {
                out.push(node);
            }
        }
        out
    }

    /// Registers the qualified name of a type-defining node.
    pub fn register_type(&mut self, node: NodeId, qualified: impl Into<String>) {
        self.type_names.insert(node, qualified.into());
    }

    /// Qualified name of a type-defining node.
    pub fn type_name(&self, node: NodeId) -> Option<&str> {
        self.type_names.get(&node).map(String::as_str)
    }

    /// Finds a type node by name: the exact qualified name first, then the
    /// first registered type with the same unqualified name.
    pub fn lookup_type(&self, name: &str) -> Option<NodeId> {
        if let Some((&node, _)) = self.type_names.iter().find(|(_, q)| q.as_str() == name) {
            return Some(node);
        }
        let tail = unqualified(name);
        self.type_names
            .iter()
            .find(|(_, q)| unqualified(q) == tail)
            .map(|(&node, _)| node)
    }

    /// Next synthetic enum number.
    pub fn alloc_enum_id(&mut self) -> u32 {
        let id = self.next_enum_id;
        self.next_enum_id += 1;
        id
    }

    /// Next port number.
    pub fn alloc_port_id(&mut self) -> u32 {
        let id = self.next_port_id;
        self.next_port_id += 1;
        id
    }
}

/// The part of a type name after the last `::`, without a leading `\`.
pub fn unqualified(name: &str) -> &str {
    let tail = name.rsplit("::").next().unwrap_or(name);
    tail.trim_start_matches('\\')
}
