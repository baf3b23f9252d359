//! A `u64`-keyed hash map with explicit capacity and load factor.

use super::alloc::{AllocWrapper, Allocator};
use crate::{
    config::{MIN_CAPACITY, MapConfig, capacity_for, resize_threshold},
    internal::TableValidationError,
};
use alloc::format;
use core::hash::BuildHasher;
use hashbrown::{HashMap, TryReserveError, hash_map};

/// Storage for compound-keyed maps.
///
/// Lookups, probing and rehashing are hashbrown's. On top of that this type
/// tracks a logical capacity (always a power of two) and a resize threshold
/// derived from the load factor, and doubles the capacity once the number of
/// entries exceeds the threshold.
#[derive(Clone)]
pub(crate) struct U64Map<V, S, A: Allocator> {
    items: HashMap<u64, V, S, AllocWrapper<A>>,
    // Kept apart from `items` so that it can be updated while an entry
    // borrows `items`.
    sizing: Sizing,
}

/// Logical sizing of a `U64Map`.
///
/// Invariant: capacity is a power of two no larger than `MAX_CAPACITY`,
/// resize_threshold is resize_threshold(capacity, load_factor), and the
/// map's length is at most resize_threshold.
#[derive(Clone, Copy, Debug)]
struct Sizing {
    capacity: usize,
    load_factor: f64,
    resize_threshold: usize,
}

impl Sizing {
    fn new(config: MapConfig) -> Self {
        Self {
            capacity: config.capacity(),
            load_factor: config.load_factor(),
            resize_threshold: config.resize_threshold(),
        }
    }

    /// Doubles the capacity as many times as needed to hold `len` entries.
    #[inline]
    fn grow_to_hold(&mut self, len: usize) {
        if len > self.resize_threshold {
            let capacity = capacity_for(self.capacity, self.load_factor, len);
            self.set_capacity(capacity);
        }
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.resize_threshold = resize_threshold(capacity, self.load_factor);
    }
}

impl<V, S: BuildHasher + Default, A: Allocator + Default> Default
    for U64Map<V, S, A>
{
    fn default() -> Self {
        Self::with_hasher_in(S::default(), A::default())
    }
}

impl<V, S: BuildHasher, A: Allocator> U64Map<V, S, A> {
    /// Creates an empty map with the default configuration, without
    /// allocating.
    pub(crate) fn with_hasher_in(hasher: S, alloc: A) -> Self {
        Self {
            items: HashMap::with_hasher_in(hasher, AllocWrapper(alloc)),
            sizing: Sizing::new(MapConfig::default()),
        }
    }

    /// Creates an empty map, trying to preallocate room for
    /// `config.resize_threshold()` entries.
    ///
    /// If that fails the map starts out unallocated, and grows on demand.
    pub(crate) fn with_config_and_hasher_in(
        config: MapConfig,
        hasher: S,
        alloc: A,
    ) -> Self {
        let mut map = Self {
            items: HashMap::with_hasher_in(hasher, AllocWrapper(alloc)),
            sizing: Sizing::new(config),
        };
        _ = map.items.try_reserve(config.resize_threshold());
        map
    }

    /// Creates an empty map with room for `config.resize_threshold()`
    /// entries, or returns the error from allocating that room.
    pub(crate) fn try_with_config_and_hasher_in(
        config: MapConfig,
        hasher: S,
        alloc: A,
    ) -> Result<Self, TryReserveError> {
        let mut map = Self {
            items: HashMap::with_hasher_in(hasher, AllocWrapper(alloc)),
            sizing: Sizing::new(config),
        };
        map.items.try_reserve(config.resize_threshold())?;
        Ok(map)
    }

    pub(crate) fn hasher(&self) -> &S {
        self.items.hasher()
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.items.allocator().0
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.sizing.capacity
    }

    #[inline]
    pub(crate) fn load_factor(&self) -> f64 {
        self.sizing.load_factor
    }

    #[inline]
    pub(crate) fn resize_threshold(&self) -> usize {
        self.sizing.resize_threshold
    }

    #[inline]
    pub(crate) fn contains_key(&self, key: u64) -> bool {
        self.items.contains_key(&key)
    }

    #[inline]
    pub(crate) fn get(&self, key: u64) -> Option<&V> {
        self.items.get(&key)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        self.items.get_mut(&key)
    }

    /// Inserts `value`, returning the value previously stored under `key`.
    pub(crate) fn insert(&mut self, key: u64, value: V) -> Option<V> {
        let previous = self.items.insert(key, value);
        if previous.is_none() {
            self.sizing.grow_to_hold(self.items.len());
        }
        previous
    }

    /// Inserts `value` if `key` is absent. Otherwise hands `value` back
    /// along with the value already stored, leaving the map unchanged.
    pub(crate) fn insert_unique(
        &mut self,
        key: u64,
        value: V,
    ) -> Result<(), (V, &V)> {
        let len_after = self.items.len() + 1;
        match self.items.entry(key) {
            hash_map::Entry::Occupied(entry) => {
                Err((value, &*entry.into_mut()))
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(value);
                self.sizing.grow_to_hold(len_after);
                Ok(())
            }
        }
    }

    pub(crate) fn get_or_insert_with<F>(&mut self, key: u64, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let len_after = self.items.len() + 1;
        match self.items.entry(key) {
            hash_map::Entry::Occupied(entry) => entry.into_mut(),
            hash_map::Entry::Vacant(entry) => {
                self.sizing.grow_to_hold(len_after);
                entry.insert(f())
            }
        }
    }

    #[inline]
    pub(crate) fn remove(&mut self, key: u64) -> Option<V> {
        self.items.remove(&key)
    }

    pub(crate) fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&u64, &mut V) -> bool,
    {
        self.items.retain(f);
    }

    /// Removes every entry, keeping the capacity.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Shrinks the capacity to the smallest power of two (at least
    /// `MIN_CAPACITY`) whose resize threshold holds the current entries,
    /// and releases storage beyond that.
    pub(crate) fn compact(&mut self) {
        let len = self.items.len();
        let capacity = capacity_for(MIN_CAPACITY, self.sizing.load_factor, len);
        self.sizing.set_capacity(capacity);
        // A no-op if the threshold is beyond what the table can hold.
        self.items.shrink_to(self.sizing.resize_threshold);
    }

    #[inline]
    pub(crate) fn iter(&self) -> hash_map::Iter<'_, u64, V> {
        self.items.iter()
    }

    #[inline]
    pub(crate) fn iter_mut(&mut self) -> hash_map::IterMut<'_, u64, V> {
        self.items.iter_mut()
    }

    #[inline]
    pub(crate) fn keys(&self) -> hash_map::Keys<'_, u64, V> {
        self.items.keys()
    }

    #[inline]
    pub(crate) fn values(&self) -> hash_map::Values<'_, u64, V> {
        self.items.values()
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> hash_map::ValuesMut<'_, u64, V> {
        self.items.values_mut()
    }

    #[inline]
    pub(crate) fn into_iter(
        self,
    ) -> hash_map::IntoIter<u64, V, AllocWrapper<A>> {
        self.items.into_iter()
    }

    pub(crate) fn validate(&self) -> Result<(), TableValidationError> {
        let Sizing { capacity, load_factor, resize_threshold: threshold } =
            self.sizing;
        if !capacity.is_power_of_two() {
            return Err(TableValidationError::new(format!(
                "capacity {capacity} is not a power of two"
            )));
        }

        let expected = resize_threshold(capacity, load_factor);
        if threshold != expected {
            return Err(TableValidationError::new(format!(
                "expected resize threshold {expected} for capacity \
                 {capacity} and load factor {load_factor}, was {threshold}"
            )));
        }

        if self.items.len() > threshold {
            return Err(TableValidationError::new(format!(
                "length {} exceeds resize threshold {threshold}",
                self.items.len(),
            )));
        }

        Ok(())
    }
}
