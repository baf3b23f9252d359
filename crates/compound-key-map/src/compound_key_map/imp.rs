use super::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::{
    CompoundKey, DefaultHashBuilder, MapConfig,
    errors::{ConfigError, DuplicateEntry},
    internal::ValidationError,
    support::{
        alloc::{Allocator, Global, global_alloc},
        u64_map::U64Map,
    },
};
use core::{fmt, hash::BuildHasher};
use hashbrown::TryReserveError;

/// A hash map keyed by a pair of `i32`s.
///
/// Each pair is packed into a single [`CompoundKey`] (part A in the high 32
/// bits, part B in the low 32 bits), and the map stores values in a hash
/// table keyed by that 64-bit value. Every `(i32, i32)` pair is a valid key,
/// including negative and boundary values.
///
/// Iteration order is unspecified, and may change as the map is modified.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use compound_key_map::CompoundKeyMap;
///
/// let mut map = CompoundKeyMap::new();
/// map.insert(5, 10, "x");
/// map.insert(5, 11, "y");
/// map.insert(6, 10, "z");
/// assert_eq!(map.len(), 3);
///
/// assert_eq!(map.get(5, 10), Some(&"x"));
/// assert_eq!(map.remove(5, 11), Some("y"));
/// assert_eq!(map.get(5, 11), None);
/// assert_eq!(map.len(), 2);
///
/// // Iteration recovers both key parts.
/// let mut entries: Vec<_> = map.iter().collect();
/// entries.sort();
/// assert_eq!(entries, [(5, 10, &"x"), (6, 10, &"z")]);
/// # }
/// ```
#[derive(Clone)]
pub struct CompoundKeyMap<V, S = DefaultHashBuilder, A: Allocator = Global> {
    map: U64Map<V, S, A>,
}

impl<V, S: BuildHasher + Default, A: Allocator + Default> Default
    for CompoundKeyMap<V, S, A>
{
    fn default() -> Self {
        Self { map: U64Map::default() }
    }
}

#[cfg(feature = "default-hasher")]
impl<V> CompoundKeyMap<V> {
    /// Creates a new, empty `CompoundKeyMap` with the default configuration.
    ///
    /// The map does not allocate until the first insertion.
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new `CompoundKeyMap` with the given configuration.
    pub fn with_config(config: MapConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }

    /// Creates a new `CompoundKeyMap` with the given initial capacity and
    /// load factor.
    ///
    /// This is [`MapConfig::new`] followed by
    /// [`try_with_config_and_hasher_in`]. It fails if the configuration is
    /// out of range, or if storage for the initial capacity can't be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "default-hasher")] {
    /// use compound_key_map::{CompoundKeyMap, errors::ConfigError};
    ///
    /// let map =
    ///     CompoundKeyMap::<u32>::with_capacity_and_load_factor(100, 0.5)
    ///         .unwrap();
    /// assert_eq!(map.capacity(), 128);
    /// assert_eq!(map.load_factor(), 0.5);
    ///
    /// let error = CompoundKeyMap::<u32>::with_capacity_and_load_factor(16, 1.5)
    ///     .unwrap_err();
    /// assert_eq!(error, ConfigError::LoadFactorOutOfRange { load_factor: 1.5 });
    /// # }
    /// ```
    ///
    /// [`try_with_config_and_hasher_in`]: Self::try_with_config_and_hasher_in
    pub fn with_capacity_and_load_factor(
        initial_capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        let config = MapConfig::new(initial_capacity, load_factor)?;
        Self::try_with_config_and_hasher_in(
            config,
            DefaultHashBuilder::default(),
            global_alloc(),
        )
    }
}

impl<V, S: BuildHasher> CompoundKeyMap<V, S> {
    /// Creates a new, empty `CompoundKeyMap` with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_hasher_in(hasher, global_alloc())
    }

    /// Creates a new `CompoundKeyMap` with the given configuration and
    /// hasher.
    pub fn with_config_and_hasher(config: MapConfig, hasher: S) -> Self {
        Self::with_config_and_hasher_in(config, hasher, global_alloc())
    }
}

#[cfg(feature = "default-hasher")]
impl<V, A: Allocator> CompoundKeyMap<V, DefaultHashBuilder, A> {
    /// Creates a new, empty `CompoundKeyMap` using the given allocator.
    pub fn new_in(alloc: A) -> Self {
        Self::with_hasher_in(DefaultHashBuilder::default(), alloc)
    }

    /// Creates a new `CompoundKeyMap` with the given configuration, using
    /// the given allocator.
    pub fn with_config_in(config: MapConfig, alloc: A) -> Self {
        Self::with_config_and_hasher_in(
            config,
            DefaultHashBuilder::default(),
            alloc,
        )
    }
}

impl<V, S: BuildHasher, A: Allocator> CompoundKeyMap<V, S, A> {
    /// Creates a new, empty `CompoundKeyMap` with the given hasher and
    /// allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(all(feature = "allocator-api2", feature = "default-hasher"))] {
    /// use compound_key_map::{CompoundKeyMap, DefaultHashBuilder};
    /// # use compound_key_map_test_utils::bumpalo;
    ///
    /// let bump = bumpalo::Bump::new();
    /// let mut map =
    ///     CompoundKeyMap::with_hasher_in(DefaultHashBuilder::default(), &bump);
    /// map.insert(-1, i32::MAX, "bump");
    /// assert_eq!(map.get(-1, i32::MAX), Some(&"bump"));
    /// # }
    /// ```
    pub fn with_hasher_in(hasher: S, alloc: A) -> Self {
        Self { map: U64Map::with_hasher_in(hasher, alloc) }
    }

    /// Creates a new `CompoundKeyMap` with the given configuration, hasher,
    /// and allocator.
    ///
    /// The map tries to preallocate room for
    /// [`MapConfig::resize_threshold`] entries. If that allocation fails, the
    /// map starts out empty and allocates as entries are inserted. Use
    /// [`try_with_config_and_hasher_in`] to get an error instead.
    ///
    /// [`try_with_config_and_hasher_in`]: Self::try_with_config_and_hasher_in
    pub fn with_config_and_hasher_in(
        config: MapConfig,
        hasher: S,
        alloc: A,
    ) -> Self {
        Self { map: U64Map::with_config_and_hasher_in(config, hasher, alloc) }
    }

    /// Creates a new `CompoundKeyMap` with the given configuration, hasher,
    /// and allocator, with room for [`MapConfig::resize_threshold`] entries.
    ///
    /// Returns [`ConfigError::CapacityOverflow`] if that many entries can't
    /// fit in a single table, and [`ConfigError::AllocationFailed`] if the
    /// allocator refuses the request.
    pub fn try_with_config_and_hasher_in(
        config: MapConfig,
        hasher: S,
        alloc: A,
    ) -> Result<Self, ConfigError> {
        let requested = config.capacity();
        match U64Map::try_with_config_and_hasher_in(config, hasher, alloc) {
            Ok(map) => Ok(Self { map }),
            Err(TryReserveError::CapacityOverflow) => {
                Err(ConfigError::CapacityOverflow { requested })
            }
            Err(TryReserveError::AllocError { .. }) => {
                Err(ConfigError::AllocationFailed { requested })
            }
        }
    }

    /// Returns the hasher.
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Returns the allocator.
    pub fn allocator(&self) -> &A {
        self.map.allocator()
    }

    /// Returns the capacity of the map.
    ///
    /// This is the power-of-two slot count the load factor applies to, not
    /// the number of entries that fit: see
    /// [`resize_threshold`](Self::resize_threshold) for that.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the load factor the map was configured with.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.map.load_factor()
    }

    /// Returns the number of entries the map holds before its capacity
    /// doubles.
    #[inline]
    pub fn resize_threshold(&self) -> usize {
        self.map.resize_threshold()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of distinct key pairs in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Iterates over `(key_part_a, key_part_b, &value)` triples.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.map.iter())
    }

    /// Iterates over `(key_part_a, key_part_b, &mut value)` triples.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(self.map.iter_mut())
    }

    /// Iterates over `(key_part_a, key_part_b)` pairs.
    #[inline]
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.map.keys())
    }

    /// Iterates over the values.
    #[inline]
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.map.values())
    }

    /// Iterates over the values, allowing for mutation.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self.map.values_mut())
    }

    /// Calls `f` on every value, in iteration order.
    ///
    /// The map is borrowed for the duration of the call, so `f` can't modify
    /// it.
    pub fn for_each_value<F>(&self, f: F)
    where
        F: FnMut(&V),
    {
        self.map.values().for_each(f);
    }

    /// Calls `f` with `(key_part_a, key_part_b, &value)` for every entry, in
    /// iteration order.
    ///
    /// The map is borrowed for the duration of the call, so `f` can't modify
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "default-hasher")] {
    /// use compound_key_map::CompoundKeyMap;
    ///
    /// let mut map = CompoundKeyMap::new();
    /// map.insert(i32::MIN, -1, 1);
    /// map.insert(-1, i32::MIN, 2);
    ///
    /// let mut seen = Vec::new();
    /// map.for_each_entry(|a, b, value| seen.push((a, b, *value)));
    /// seen.sort();
    /// assert_eq!(seen, [(i32::MIN, -1, 1), (-1, i32::MIN, 2)]);
    /// # }
    /// ```
    pub fn for_each_entry<F>(&self, mut f: F)
    where
        F: FnMut(i32, i32, &V),
    {
        for (&key, value) in self.map.iter() {
            let (a, b) = CompoundKey::from_raw(key).unpack();
            f(a, b, value);
        }
    }

    /// Checks general invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.map.validate().map_err(|error| ValidationError::Table {
            name: "compound_key_to_value",
            error,
        })?;

        let count = self.iter().count();
        if count != self.len() {
            return Err(ValidationError::general(alloc::format!(
                "iteration yielded {count} entries, but len is {}",
                self.len()
            )));
        }

        Ok(())
    }

    /// Inserts `value` under `(key_part_a, key_part_b)`, returning the value
    /// that was previously stored there, if any.
    #[inline]
    pub fn insert(
        &mut self,
        key_part_a: i32,
        key_part_b: i32,
        value: V,
    ) -> Option<V> {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.insert(key.as_raw(), value)
    }

    /// Inserts `value` under `(key_part_a, key_part_b)`, returning an error
    /// if the pair is already present.
    ///
    /// On error, the map is unchanged.
    pub fn insert_unique(
        &mut self,
        key_part_a: i32,
        key_part_b: i32,
        value: V,
    ) -> Result<(), DuplicateEntry<V, &V>> {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.insert_unique(key.as_raw(), value).map_err(|(new, existing)| {
            DuplicateEntry::__internal_new(key, new, existing)
        })
    }

    /// Returns true if the map contains `(key_part_a, key_part_b)`.
    #[inline]
    pub fn contains_key(&self, key_part_a: i32, key_part_b: i32) -> bool {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.contains_key(key.as_raw())
    }

    /// Gets a reference to the value stored under `(key_part_a,
    /// key_part_b)`.
    #[inline]
    pub fn get(&self, key_part_a: i32, key_part_b: i32) -> Option<&V> {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.get(key.as_raw())
    }

    /// Gets a mutable reference to the value stored under `(key_part_a,
    /// key_part_b)`.
    #[inline]
    pub fn get_mut(
        &mut self,
        key_part_a: i32,
        key_part_b: i32,
    ) -> Option<&mut V> {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.get_mut(key.as_raw())
    }

    /// Returns the value stored under `(key_part_a, key_part_b)`, inserting
    /// the result of `f` first if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "default-hasher")] {
    /// use compound_key_map::CompoundKeyMap;
    ///
    /// let mut counts = CompoundKeyMap::new();
    /// for (a, b) in [(1, 2), (3, 4), (1, 2)] {
    ///     *counts.get_or_insert_with(a, b, || 0) += 1;
    /// }
    /// assert_eq!(counts.get(1, 2), Some(&2));
    /// assert_eq!(counts.get(3, 4), Some(&1));
    /// # }
    /// ```
    pub fn get_or_insert_with<F>(
        &mut self,
        key_part_a: i32,
        key_part_b: i32,
        f: F,
    ) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.get_or_insert_with(key.as_raw(), f)
    }

    /// Removes the entry for `(key_part_a, key_part_b)`, returning its value
    /// if it was present.
    #[inline]
    pub fn remove(&mut self, key_part_a: i32, key_part_b: i32) -> Option<V> {
        let key = CompoundKey::pack(key_part_a, key_part_b);
        self.map.remove(key.as_raw())
    }

    /// Retains only the entries for which `f(key_part_a, key_part_b, &mut
    /// value)` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(i32, i32, &mut V) -> bool,
    {
        self.map.retain(|&key, value| {
            let (a, b) = CompoundKey::from_raw(key).unpack();
            f(a, b, value)
        });
    }

    /// Removes all entries. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Shrinks the capacity to the smallest power of two that holds the
    /// current entries under the load factor, releasing memory.
    ///
    /// The capacity never drops below [`MIN_CAPACITY`] or grows past
    /// [`MAX_CAPACITY`].
    ///
    /// [`MIN_CAPACITY`]: crate::config::MIN_CAPACITY
    /// [`MAX_CAPACITY`]: crate::config::MAX_CAPACITY
    pub fn compact(&mut self) {
        self.map.compact();
    }
}

impl<V: fmt::Debug, S: BuildHasher, A: Allocator> fmt::Debug
    for CompoundKeyMap<V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(a, b, value)| ((a, b), value)))
            .finish()
    }
}

impl<V: PartialEq, S: BuildHasher, A: Allocator> PartialEq
    for CompoundKeyMap<V, S, A>
{
    fn eq(&self, other: &Self) -> bool {
        // Two maps are equal if they hold the same key pairs with equal
        // values, regardless of iteration order.
        if self.len() != other.len() {
            return false;
        }

        self.iter().all(|(a, b, value)| other.get(a, b) == Some(value))
    }
}

// The Eq bound on V ensures that the CompoundKeyMap forms an equivalence
// class.
impl<V: Eq, S: BuildHasher, A: Allocator> Eq for CompoundKeyMap<V, S, A> {}

/// The `Extend` implementation overwrites existing entries.
impl<V, S: BuildHasher, A: Allocator> Extend<(i32, i32, V)>
    for CompoundKeyMap<V, S, A>
{
    fn extend<I: IntoIterator<Item = (i32, i32, V)>>(&mut self, iter: I) {
        for (a, b, value) in iter {
            self.insert(a, b, value);
        }
    }
}

impl<'a, V, S: BuildHasher, A: Allocator> IntoIterator
    for &'a CompoundKeyMap<V, S, A>
{
    type Item = (i32, i32, &'a V);
    type IntoIter = Iter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, S: BuildHasher, A: Allocator> IntoIterator
    for &'a mut CompoundKeyMap<V, S, A>
{
    type Item = (i32, i32, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<V, S: BuildHasher, A: Allocator> IntoIterator for CompoundKeyMap<V, S, A> {
    type Item = (i32, i32, V);
    type IntoIter = IntoIter<V, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.map.into_iter())
    }
}

/// The `FromIterator` implementation overwrites duplicate entries: the last
/// value for each key pair wins.
impl<V, S: BuildHasher + Default, A: Allocator + Default>
    FromIterator<(i32, i32, V)> for CompoundKeyMap<V, S, A>
{
    fn from_iter<I: IntoIterator<Item = (i32, i32, V)>>(iter: I) -> Self {
        let mut map = CompoundKeyMap::default();
        map.extend(iter);
        map
    }
}
