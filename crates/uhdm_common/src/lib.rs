//! Shared foundational types for the UHDM frontend.
//!
//! This crate provides the append-only [`Arena`] both graphs are stored in,
//! interned identifiers for object-model names, four-state constant bit vectors
//! used by folded literals, and the internal error type.

#![warn(missing_docs)]

pub mod arena;
pub mod bits;
pub mod ident;
pub mod result;

pub use arena::{Arena, ArenaId};
pub use bits::{Bit, BitsError, ConstBits};
pub use ident::{Ident, Interner};
pub use result::{InternalError, UhdmResult};
