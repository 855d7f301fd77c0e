//! Append-only storage for the object graph and the translated AST.
//!
//! Entities are never removed, so the `u32` index an entity is allocated at is
//! its identity for the rest of the run. The memo that keeps translation
//! cycle-safe is keyed by these indices.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A typed index into an [`Arena`].
pub trait ArenaId: Copy {
    /// Wraps a raw index.
    fn from_raw(index: u32) -> Self;

    /// The raw index.
    fn as_raw(self) -> u32;

    /// The raw index as a `Vec` position.
    fn slot(self) -> usize {
        self.as_raw() as usize
    }
}

/// Declares a `u32` identity newtype usable as an [`ArenaId`].
///
/// The declaring crate must depend on `serde`.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw index. Meant for tests and deserialized handles.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }
        }

        impl $crate::arena::ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

/// Entities indexed by `I`, in allocation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _id: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            _id: PhantomData,
        }
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `item` and returns its identity.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// The entity at `id`. Panics on an ID from another arena.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.slot()]
    }

    /// The entity at `id`, mutably.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.slot()]
    }

    /// Whether `id` was allocated here. Handles from outside the run, such as
    /// caller-supplied design roots, are checked with this before use.
    pub fn contains(&self, id: I) -> bool {
        id.slot() < self.items.len()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_id!(
        /// Test-only ID.
        SlotId
    );

    #[test]
    fn ids_follow_allocation_order() {
        let mut arena: Arena<SlotId, &str> = Arena::new();
        let top = arena.alloc("top");
        let sub = arena.alloc("sub");
        assert_eq!(arena[top], "top");
        assert_eq!(arena[sub], "sub");
        assert_eq!(sub, SlotId::from_raw(1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn foreign_ids_are_not_contained() {
        let mut arena: Arena<SlotId, u32> = Arena::default();
        assert!(!arena.contains(SlotId::from_raw(0)));
        let id = arena.alloc(7);
        arena[id] += 1;
        assert!(arena.contains(id));
        assert!(!arena.contains(SlotId::from_raw(5)));
        assert_eq!(arena[id], 8);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut arena: Arena<SlotId, String> = Arena::new();
        arena.alloc("a".to_string());
        arena.alloc("b".to_string());
        let json = serde_json::to_string(&arena).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let back: Arena<SlotId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[SlotId::from_raw(1)], "b");
    }
}
