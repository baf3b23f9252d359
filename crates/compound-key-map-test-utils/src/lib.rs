pub mod eq_props;
pub mod naive_map;
#[cfg(feature = "serde")]
pub mod serde_utils;
pub mod test_entry;

/// Re-exports the `bumpalo` crate if the `allocator-api2` feature is enabled,
/// for use by doctests.
#[cfg(feature = "allocator-api2")]
pub use bumpalo;
