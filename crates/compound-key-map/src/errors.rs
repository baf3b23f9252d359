//! Error types for this crate.

use crate::CompoundKey;
use core::fmt;

/// A map was configured with an out-of-range capacity or load factor, or
/// its initial storage could not be allocated.
///
/// Returned by [`MapConfig::new`](crate::MapConfig::new) and the map
/// constructors that accept a capacity and a load factor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The initial capacity was zero.
    ZeroCapacity,

    /// The initial capacity can't be rounded up to a power of two without
    /// overflowing `usize`, or its storage would exceed the largest table
    /// that can be allocated.
    CapacityOverflow {
        /// The capacity that was requested.
        requested: usize,
    },

    /// Storage for the initial capacity could not be allocated.
    AllocationFailed {
        /// The capacity that was requested.
        requested: usize,
    },

    /// The load factor was not strictly between 0 and 1, or was NaN.
    LoadFactorOutOfRange {
        /// The load factor that was requested.
        load_factor: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => {
                f.write_str("initial capacity must be greater than zero")
            }
            Self::CapacityOverflow { requested } => write!(
                f,
                "initial capacity {requested} is too large"
            ),
            Self::AllocationFailed { requested } => write!(
                f,
                "failed to allocate storage for initial capacity {requested}"
            ),
            Self::LoadFactorOutOfRange { load_factor } => write!(
                f,
                "load factor {load_factor} must be greater than 0 and \
                 less than 1"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// A value was inserted under a key pair that is already present.
///
/// `V` is the new value and `D` is the existing one: `insert_unique` returns
/// a borrowed `D = &V`, which [`into_owned`](Self::into_owned) turns into an
/// error that can outlive the map.
#[derive(Debug)]
pub struct DuplicateEntry<V, D = V> {
    key: CompoundKey,
    new: V,
    existing: D,
}

impl<V, D> DuplicateEntry<V, D> {
    /// Creates a new `DuplicateEntry` error.
    #[doc(hidden)]
    pub fn __internal_new(key: CompoundKey, new: V, existing: D) -> Self {
        Self { key, new, existing }
    }

    /// Returns the key pair that was already present.
    #[inline]
    pub fn key(&self) -> CompoundKey {
        self.key
    }

    /// Returns `(key_part_a, key_part_b)` for the conflicting entry.
    #[inline]
    pub fn key_parts(&self) -> (i32, i32) {
        self.key.unpack()
    }

    /// Returns the value that was attempted to be inserted.
    #[inline]
    pub fn new_value(&self) -> &V {
        &self.new
    }

    /// Returns the value already stored under the key pair.
    #[inline]
    pub fn existing(&self) -> &D {
        &self.existing
    }

    /// Converts self into its constituent parts.
    pub fn into_parts(self) -> (CompoundKey, V, D) {
        (self.key, self.new, self.existing)
    }
}

impl<V: Clone> DuplicateEntry<V, &V> {
    /// Converts self to an owned `DuplicateEntry` by cloning the existing
    /// value.
    ///
    /// If `V` is `'static`, the owned form is suitable for conversion to
    /// `Box<dyn std::error::Error>`, `anyhow::Error`, and so on.
    pub fn into_owned(self) -> DuplicateEntry<V> {
        DuplicateEntry {
            key: self.key,
            new: self.new,
            existing: self.existing.clone(),
        }
    }
}

impl<V: fmt::Debug, D: fmt::Debug> fmt::Display for DuplicateEntry<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.key.unpack();
        write!(
            f,
            "new value {:?} for key ({a}, {b}) conflicts with existing \
             value {:?}",
            self.new, self.existing
        )
    }
}

impl<V: fmt::Debug, D: fmt::Debug> core::error::Error for DuplicateEntry<V, D> {}
