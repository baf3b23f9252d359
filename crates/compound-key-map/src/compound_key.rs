//! Packing two 32-bit key parts into one 64-bit key.

use core::fmt;

/// Two 32-bit key parts packed into a single 64-bit value.
///
/// Part A occupies the high 32 bits and part B the low 32 bits. Both parts
/// are treated as raw bit patterns: a negative part B is *not* sign-extended
/// into the high half, so every `(i32, i32)` pair maps to a distinct key and
/// can be recovered exactly.
///
/// # Examples
///
/// ```
/// use compound_key_map::CompoundKey;
///
/// let key = CompoundKey::pack(-1, 0);
/// assert_eq!(key.as_raw(), 0xffff_ffff_0000_0000);
/// assert_eq!(key.unpack(), (-1, 0));
///
/// // Mixed signs never collide.
/// assert_ne!(CompoundKey::pack(-1, 0), CompoundKey::pack(0, -1));
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CompoundKey(u64);

impl CompoundKey {
    /// Packs `key_part_a` into the high half and `key_part_b` into the low
    /// half.
    #[inline]
    pub const fn pack(key_part_a: i32, key_part_b: i32) -> Self {
        Self(((key_part_a as u32 as u64) << 32) | (key_part_b as u32 as u64))
    }

    /// Wraps an already-packed value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the packed 64-bit value.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Splits the key back into `(key_part_a, key_part_b)`.
    #[inline]
    pub const fn unpack(self) -> (i32, i32) {
        (self.key_part_a(), self.key_part_b())
    }

    /// The high 32 bits, reinterpreted as an `i32`.
    #[inline]
    pub const fn key_part_a(self) -> i32 {
        (self.0 >> 32) as u32 as i32
    }

    /// The low 32 bits, reinterpreted as an `i32`.
    #[inline]
    pub const fn key_part_b(self) -> i32 {
        self.0 as u32 as i32
    }
}

impl From<(i32, i32)> for CompoundKey {
    #[inline]
    fn from((key_part_a, key_part_b): (i32, i32)) -> Self {
        Self::pack(key_part_a, key_part_b)
    }
}

impl From<CompoundKey> for (i32, i32) {
    #[inline]
    fn from(key: CompoundKey) -> Self {
        key.unpack()
    }
}

impl From<CompoundKey> for u64 {
    #[inline]
    fn from(key: CompoundKey) -> Self {
        key.0
    }
}

impl fmt::Debug for CompoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The raw value is rarely interesting: show the parts.
        f.debug_tuple("CompoundKey")
            .field(&self.key_part_a())
            .field(&self.key_part_b())
            .finish()
    }
}
