//! A hash map keyed by pairs of 32-bit integers.
//!
//! # Motivation
//!
//! Many tables are naturally indexed by two small integers: a grid cell by
//! `(x, y)`, an edge by `(from, to)`, a versioned record by `(id, version)`.
//! The obvious way to store these is a `HashMap<(i32, i32), V>`:
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut map: HashMap<(i32, i32), &str> = HashMap::new();
//! map.insert((5, 10), "x");
//! ```
//!
//! That works, but every lookup hashes a tuple, and the map can't take
//! advantage of the fact that the whole key fits in a single machine word.
//!
//! [`CompoundKeyMap`] packs each pair into one `u64` (part A in the high 32
//! bits, part B in the low 32 bits) and stores values in a hash table keyed
//! by that integer. The packing is a bijection, so every `(i32, i32)` pair,
//! including negative and boundary values, maps to a distinct key, and
//! iteration recovers both parts exactly.
//!
//! ```
//! # #[cfg(feature = "default-hasher")] {
//! use compound_key_map::CompoundKeyMap;
//!
//! let mut map = CompoundKeyMap::new();
//! map.insert(5, 10, "x");
//! map.insert(5, 11, "y");
//! map.insert(6, 10, "z");
//!
//! assert_eq!(map.get(5, 10), Some(&"x"));
//! assert_eq!(map.get(10, 5), None);
//! assert_eq!(map.len(), 3);
//! # }
//! ```
//!
//! # Sizing
//!
//! Maps are created with a [`MapConfig`]: an initial capacity, rounded up to
//! a power of two, and a load factor strictly between 0 and 1. The map
//! doubles its capacity once the number of entries exceeds `capacity *
//! load_factor`, and [`CompoundKeyMap::compact`] shrinks it back down.
//!
//! # Optional features
//!
//! - `allocator-api2` (default): support for custom allocators through the
//!   [`allocator-api2`](https://docs.rs/allocator-api2) crate.
//! - `default-hasher` (default): use [foldhash] as the default hasher. With
//!   this feature off, a hasher must be passed in.
//! - `std` (default): enable `std` support in dependencies. Without it the
//!   crate is `no_std` and only requires `alloc`.
//! - `serde`: `Serialize` and `Deserialize` impls, as a list of `(key_part_a,
//!   key_part_b, value)` triples.
//! - `daft`: [`Diffable`](daft::Diffable) impls for comparing maps.
//! - `proptest`: [`Arbitrary`](proptest::arbitrary::Arbitrary) impls for
//!   property-based testing.
//!
//! [foldhash]: https://docs.rs/foldhash

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]

extern crate alloc;

pub mod compound_key;
pub mod compound_key_map;
pub mod config;
pub mod errors;
#[doc(hidden)]
pub mod internal;
mod support;

pub use compound_key::CompoundKey;
pub use compound_key_map::CompoundKeyMap;
pub use config::MapConfig;
pub use support::hash_builder::DefaultHashBuilder;
