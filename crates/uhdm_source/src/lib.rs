//! Source file identity and line locations for translated nodes and diagnostics.
//!
//! The object model only records a file path and a line per object, so
//! locations here are line-granular: a [`SourceLoc`] pairs a [`FileId`] from
//! the [`SourceDb`] path table with a 1-indexed line number.

#![warn(missing_docs)]

pub mod file_id;
pub mod loc;
pub mod resolved_loc;
pub mod source_db;

pub use file_id::FileId;
pub use loc::SourceLoc;
pub use resolved_loc::ResolvedLoc;
pub use source_db::SourceDb;
