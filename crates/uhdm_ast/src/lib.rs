//! Elaboration-ready abstract syntax tree produced by the UHDM translator.
//!
//! Nodes live in an [`Ast`] arena and are addressed by [`NodeId`]; a node's ID
//! is its identity. Every node carries an [`AstKind`] from a closed set, a
//! sanitized symbol name, ordered children, a [`SourceLoc`](uhdm_source::SourceLoc),
//! a handful of [`NodeFlags`] and a string attribute map. A [`Forest`] bundles
//! the arena with one root per translated design.

#![warn(missing_docs)]

pub mod ast;
pub mod dump;
pub mod forest;
pub mod ids;
pub mod kind;
pub mod node;

pub use ast::Ast;
pub use forest::Forest;
pub use ids::NodeId;
pub use kind::AstKind;
pub use node::{AstNode, ConstValue, NodeFlags};
