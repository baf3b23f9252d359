pub(crate) mod alloc;
pub(crate) mod hash_builder;
pub(crate) mod u64_map;
