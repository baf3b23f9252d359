mod compound_key_map;
#[cfg(feature = "serde")]
mod serde_roundtrip;
