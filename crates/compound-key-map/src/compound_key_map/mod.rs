//! A hash map keyed by pairs of `i32`s.
//!
//! See [`CompoundKeyMap`] for details.

#[cfg(feature = "daft")]
mod daft_impls;
pub(crate) mod imp;
mod iter;
#[cfg(feature = "proptest")]
mod proptest_impls;
#[cfg(feature = "serde")]
mod serde_impls;

#[cfg(feature = "daft")]
pub use daft_impls::Diff;
pub use imp::CompoundKeyMap;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
