/// The hasher used by [`CompoundKeyMap`](crate::CompoundKeyMap) unless
/// another one is supplied.
///
/// Compound keys are plain `u64`s, so a fast non-cryptographic hasher is the
/// right default.
#[cfg(feature = "default-hasher")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

#[cfg(not(feature = "default-hasher"))]
mod uninhabited {
    use core::hash::{BuildHasher, Hasher};

    /// Placeholder default hasher, used when the `default-hasher` feature is
    /// disabled.
    ///
    /// This type has no values, so maps using it as the hasher can't be
    /// constructed. Pass your own hasher through `with_hasher` or
    /// `with_hasher_in` instead.
    #[derive(Clone, Copy, Debug)]
    pub enum DefaultHashBuilder {}

    impl BuildHasher for DefaultHashBuilder {
        type Hasher = Self;

        fn build_hasher(&self) -> Self::Hasher {
            match *self {}
        }
    }

    impl Hasher for DefaultHashBuilder {
        fn write(&mut self, _bytes: &[u8]) {
            match *self {}
        }

        fn finish(&self) -> u64 {
            match *self {}
        }
    }
}

#[cfg(not(feature = "default-hasher"))]
pub use uninhabited::DefaultHashBuilder;
