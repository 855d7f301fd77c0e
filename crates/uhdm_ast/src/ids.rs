//! Opaque ID for AST nodes.

use uhdm_common::define_id;

define_id!(
    /// Identity of a node in an [`Ast`](crate::Ast).
    NodeId
);
