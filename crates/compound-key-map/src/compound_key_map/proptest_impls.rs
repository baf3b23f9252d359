//! Proptest strategies for generating [`CompoundKeyMap`]s.

use crate::{CompoundKeyMap, support::alloc::Allocator};
use core::{fmt, hash::BuildHasher};
use proptest::{
    arbitrary::{Arbitrary, any, any_with},
    collection::{SizeRange, vec},
    strategy::{BoxedStrategy, Strategy},
};

/// Generates maps with arbitrary key pairs and values.
///
/// The parameters are the range of the number of generated triples, and the
/// parameters for the value type. Triples that repeat a key pair overwrite
/// the earlier value, so the map may be smaller than the number of triples.
impl<V, S, A> Arbitrary for CompoundKeyMap<V, S, A>
where
    V: Arbitrary + fmt::Debug + 'static,
    S: BuildHasher + Default + 'static,
    A: Allocator + Default + 'static,
{
    type Parameters = (SizeRange, V::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((size, args): Self::Parameters) -> Self::Strategy {
        vec((any::<i32>(), any::<i32>(), any_with::<V>(args)), size)
            .prop_map(|triples| triples.into_iter().collect())
            .boxed()
    }
}
