//! The read-only design object model the translator consumes.
//!
//! Objects are opaque [`ObjectId`] handles. Everything about an object is
//! reached through the [`ObjectModel`] trait: its [`ObjectKind`], name
//! metadata, integer [`Property`] values, constant text, and related objects
//! along typed [`Relation`] edges. The graph may alias (one object reachable
//! along several paths) and may contain cycles.
//!
//! [`ObjectGraph`] is an in-memory implementation with a builder API, used by
//! tests and by callers that assemble a design programmatically.

#![warn(missing_docs)]

pub mod graph;
pub mod ids;
pub mod kind;
pub mod model;
pub mod property;
pub mod relation;

pub use graph::{ObjectBuilder, ObjectGraph};
pub use ids::ObjectId;
pub use kind::ObjectKind;
pub use model::ObjectModel;
pub use property::{AlwaysType, CaseType, ConstType, Direction, NetType, OpType, Property};
pub use relation::Relation;
