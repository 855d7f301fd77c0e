//! Interned names of source objects.

use lasso::Rodeo;
use serde::{Deserialize, Serialize};

/// A name stored once per object graph.
///
/// Instance names, `work@`-prefixed definition names and file paths repeat on
/// nearly every object of an elaborated design.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// The raw table index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `try_from_usize` only produces values that round-trip through
// `into_usize`, since both go through a checked `u32` conversion.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Name table owned by one object graph.
pub struct Interner {
    names: Rodeo<Ident>,
}

impl Interner {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            names: Rodeo::new(),
        }
    }

    /// Stores `name` if new and returns its identity.
    pub fn get_or_intern(&mut self, name: &str) -> Ident {
        self.names.get_or_intern(name)
    }

    /// The text of `ident`. Panics on an ident from another table.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.names.resolve(&ident)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no name was stored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
