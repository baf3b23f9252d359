//! `Diffable` implementation.

use crate::{
    CompoundKeyMap, DefaultHashBuilder,
    support::alloc::{Allocator, Global},
};
use core::{fmt, hash::BuildHasher};
use daft::{Diffable, Leaf};

impl<V, S: Clone + BuildHasher, A: Clone + Allocator> Diffable
    for CompoundKeyMap<V, S, A>
{
    type Diff<'daft>
        = Diff<'daft, V, S, A>
    where
        V: 'daft,
        S: 'daft,
        A: 'daft;

    fn diff<'daft>(&'daft self, other: &'daft Self) -> Self::Diff<'daft> {
        let mut diff =
            Diff::with_hasher_in(self.hasher().clone(), self.allocator().clone());
        for (a, b, before) in self {
            if let Some(after) = other.get(a, b) {
                diff.common.insert(a, b, Leaf { before, after });
            } else {
                diff.removed.insert(a, b, before);
            }
        }
        for (a, b, after) in other {
            if !self.contains_key(a, b) {
                diff.added.insert(a, b, after);
            }
        }
        diff
    }
}

/// A diff of two [`CompoundKeyMap`]s.
pub struct Diff<'daft, V, S = DefaultHashBuilder, A: Allocator = Global> {
    /// Entries whose key pair is present in both maps.
    pub common: CompoundKeyMap<Leaf<&'daft V>, S, A>,

    /// Entries only present in the second map.
    pub added: CompoundKeyMap<&'daft V, S, A>,

    /// Entries only present in the first map.
    pub removed: CompoundKeyMap<&'daft V, S, A>,
}

#[cfg(feature = "default-hasher")]
impl<V> Diff<'_, V> {
    /// Creates a new, empty `Diff`.
    pub fn new() -> Self {
        Self::with_hasher_in(DefaultHashBuilder::default(), Global::default())
    }
}

impl<'daft, V, S: Clone + BuildHasher, A: Clone + Allocator> Diff<'daft, V, S, A> {
    /// Creates a new, empty `Diff` with the given hasher and allocator.
    pub fn with_hasher_in(hasher: S, alloc: A) -> Self {
        Self {
            common: CompoundKeyMap::with_hasher_in(hasher.clone(), alloc.clone()),
            added: CompoundKeyMap::with_hasher_in(hasher.clone(), alloc.clone()),
            removed: CompoundKeyMap::with_hasher_in(hasher, alloc),
        }
    }
}

impl<'daft, V: Eq, S: BuildHasher, A: Allocator> Diff<'daft, V, S, A> {
    /// Returns an iterator over entries whose value is unchanged.
    pub fn unchanged(
        &self,
    ) -> impl Iterator<Item = (i32, i32, &'daft V)> + '_ {
        self.common.iter().filter_map(|(a, b, leaf)| {
            (leaf.before == leaf.after).then_some((a, b, leaf.before))
        })
    }

    /// Returns true if `(key_part_a, key_part_b)` is in both maps with the
    /// same value.
    pub fn is_unchanged(&self, key_part_a: i32, key_part_b: i32) -> bool {
        self.common
            .get(key_part_a, key_part_b)
            .is_some_and(|leaf| leaf.before == leaf.after)
    }

    /// Returns the value for `(key_part_a, key_part_b)` if it is unchanged,
    /// otherwise `None`.
    pub fn get_unchanged(
        &self,
        key_part_a: i32,
        key_part_b: i32,
    ) -> Option<&'daft V> {
        self.common
            .get(key_part_a, key_part_b)
            .and_then(|leaf| (leaf.before == leaf.after).then_some(leaf.before))
    }

    /// Returns an iterator over entries whose value changed.
    pub fn modified(
        &self,
    ) -> impl Iterator<Item = (i32, i32, Leaf<&'daft V>)> + '_ {
        self.common.iter().filter_map(|(a, b, leaf)| {
            (leaf.before != leaf.after).then_some((
                a,
                b,
                Leaf { before: leaf.before, after: leaf.after },
            ))
        })
    }

    /// Returns true if `(key_part_a, key_part_b)` is in both maps with
    /// different values.
    pub fn is_modified(&self, key_part_a: i32, key_part_b: i32) -> bool {
        self.common
            .get(key_part_a, key_part_b)
            .is_some_and(|leaf| leaf.before != leaf.after)
    }

    /// Returns the before and after values for `(key_part_a, key_part_b)` if
    /// it is modified, otherwise `None`.
    pub fn get_modified(
        &self,
        key_part_a: i32,
        key_part_b: i32,
    ) -> Option<Leaf<&'daft V>> {
        self.common.get(key_part_a, key_part_b).and_then(|leaf| {
            (leaf.before != leaf.after)
                .then_some(Leaf { before: leaf.before, after: leaf.after })
        })
    }
}

// Not deriving Default, so that S and A don't need to be Default for the
// non-default-hasher case.
#[cfg(feature = "default-hasher")]
impl<V> Default for Diff<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug, S: BuildHasher, A: Allocator> fmt::Debug
    for Diff<'_, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diff")
            .field("common", &self.common)
            .field("added", &self.added)
            .field("removed", &self.removed)
            .finish()
    }
}
