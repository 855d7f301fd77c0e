//! The translation output handed to the elaboration engine.

use crate::ast::Ast;
use crate::ids::NodeId;
use crate::kind::AstKind;
use serde::{Deserialize, Serialize};
use uhdm_source::SourceDb;

/// All nodes of one run plus one [`AstKind::Design`] root per translated design.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Forest {
    /// Node storage.
    pub ast: Ast,
    /// Paths referenced by node locations.
    pub files: SourceDb,
    /// Design roots, in the order the designs were supplied.
    pub designs: Vec<NodeId>,
}

impl Forest {
    /// Definitions (modules, interfaces, packages) of every design, in order.
    pub fn definitions(&self) -> Vec<NodeId> {
        self.designs
            .iter()
            .flat_map(|&d| self.ast.children(d).iter().copied())
            .filter(|&c| {
                matches!(
                    self.ast.kind(c),
                    AstKind::Module | AstKind::Interface | AstKind::Package
                )
            })
            .collect()
    }

    /// First definition with the given sanitized name.
    pub fn definition(&self, name: &str) -> Option<NodeId> {
        self.definitions()
            .into_iter()
            .find(|&d| self.ast.name(d) == name)
    }

    /// Text rendering of every design root.
    pub fn dump(&self) -> String {
        self.designs.iter().map(|&d| self.ast.dump(d)).collect()
    }
}
