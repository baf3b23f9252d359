//! Sizing configuration for maps.

use crate::errors::ConfigError;

/// Initial capacity used by [`MapConfig::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

/// Load factor used by [`MapConfig::default`].
pub const DEFAULT_LOAD_FACTOR: f64 = 0.6;

/// The smallest capacity [`compact`](crate::CompoundKeyMap::compact) shrinks
/// a map to.
pub const MIN_CAPACITY: usize = 8;

/// The largest capacity a map grows to.
///
/// A map at this capacity never grows again, whatever its load factor: its
/// resize threshold is `usize::MAX`.
pub const MAX_CAPACITY: usize = 1 << (usize::BITS - 1);

/// Validated initial capacity and load factor for a map.
///
/// The capacity is a slot count and is rounded up to the next power of two.
/// The map grows (doubling its capacity) once the number of entries exceeds
/// `capacity * load_factor`.
///
/// # Examples
///
/// ```
/// use compound_key_map::{MapConfig, errors::ConfigError};
///
/// let config = MapConfig::new(100, 0.5).unwrap();
/// assert_eq!(config.capacity(), 128);
/// assert_eq!(config.resize_threshold(), 64);
///
/// assert_eq!(MapConfig::new(0, 0.5), Err(ConfigError::ZeroCapacity));
/// assert!(MapConfig::new(16, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapConfig {
    capacity: usize,
    load_factor: f64,
}

impl MapConfig {
    /// Validates an initial capacity and a load factor.
    ///
    /// `initial_capacity` must be non-zero, and must round up to a power of
    /// two that fits in `usize`. `load_factor` must be strictly between 0
    /// and 1.
    pub fn new(
        initial_capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        if initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let Some(capacity) = initial_capacity.checked_next_power_of_two()
        else {
            return Err(ConfigError::CapacityOverflow {
                requested: initial_capacity,
            });
        };
        // Written this way round so that NaN is rejected too.
        if !(load_factor > 0.0 && load_factor < 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange { load_factor });
        }

        Ok(Self { capacity, load_factor })
    }

    /// The initial capacity, rounded up to a power of two.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The load factor.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// The number of entries the initial capacity holds before the map
    /// grows.
    #[inline]
    pub fn resize_threshold(&self) -> usize {
        resize_threshold(self.capacity, self.load_factor)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

#[inline]
pub(crate) fn resize_threshold(capacity: usize, load_factor: f64) -> usize {
    if capacity >= MAX_CAPACITY {
        return usize::MAX;
    }
    // The float-to-int cast saturates, and load_factor < 1 keeps the result
    // below capacity.
    (capacity as f64 * load_factor) as usize
}

/// Returns the smallest power of two, at least `start`, whose resize
/// threshold is at least `len`.
///
/// `start` must be a power of two. The result is at most `MAX_CAPACITY`.
pub(crate) fn capacity_for(
    start: usize,
    load_factor: f64,
    len: usize,
) -> usize {
    let mut capacity = start;
    // Stops at MAX_CAPACITY at the latest, since its threshold is usize::MAX.
    while resize_threshold(capacity, load_factor) < len {
        capacity *= 2;
    }
    capacity
}
