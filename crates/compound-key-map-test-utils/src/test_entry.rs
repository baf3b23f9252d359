use compound_key_map::{CompoundKeyMap, MapConfig};
use proptest::{prelude::*, sample::SizeRange};
use test_strategy::Arbitrary;

#[cfg(feature = "default-hasher")]
pub type HashBuilder = compound_key_map::DefaultHashBuilder;

#[cfg(not(feature = "default-hasher"))]
pub type HashBuilder = std::hash::RandomState;

#[cfg(feature = "allocator-api2")]
pub type Alloc = hugealloc::HugeAlloc;

#[cfg(not(feature = "allocator-api2"))]
pub type Alloc = compound_key_map::internal::Global;

/// The map type under test, with the hasher and allocator selected by this
/// crate's features.
pub type TestMap = CompoundKeyMap<String, HashBuilder, Alloc>;

pub fn make_new() -> TestMap {
    CompoundKeyMap::with_hasher_in(HashBuilder::default(), Alloc::default())
}

pub fn make_with_config(config: MapConfig) -> TestMap {
    CompoundKeyMap::with_config_and_hasher_in(
        config,
        HashBuilder::default(),
        Alloc::default(),
    )
}

/// A strategy for map configurations.
///
/// Capacities are small so that maps grow often. Load factors cover the open
/// interval, including values so close to 0 that the resize threshold stays
/// at 0 until the capacity can't grow any further.
pub fn map_config() -> impl Strategy<Value = MapConfig> {
    let load_factor = prop_oneof![
        1 => Just(1e-20),
        1 => Just(f64::MIN_POSITIVE),
        1 => Just(1.0 - f64::EPSILON),
        6 => 0.001..0.999f64,
    ];
    (1usize..64, load_factor).prop_map(|(capacity, load_factor)| {
        MapConfig::new(capacity, load_factor)
            .expect("capacity and load factor are in range")
    })
}

/// A strategy for a single key part.
///
/// Uniformly random `i32`s almost never collide, so this mostly picks from a
/// small range around zero, plus the values where packing bugs show up: the
/// extremes and -1 (all bits set).
pub fn key_part() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => -4..4i32,
        1 => Just(i32::MIN),
        1 => Just(i32::MAX),
        1 => Just(-1),
        1 => any::<i32>(),
    ]
}

/// A key pair drawn from [`key_part`].
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Arbitrary)]
pub struct TestKey {
    #[strategy(key_part())]
    pub a: i32,
    #[strategy(key_part())]
    pub b: i32,
}

/// An entry to insert into a [`TestMap`].
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Arbitrary)]
pub struct TestEntry {
    #[strategy(key_part())]
    pub a: i32,
    #[strategy(key_part())]
    pub b: i32,
    pub value: String,
}

impl TestEntry {
    pub fn new(a: i32, b: i32, value: impl Into<String>) -> Self {
        Self { a, b, value: value.into() }
    }

    pub fn as_triple(&self) -> (i32, i32, &String) {
        (self.a, self.b, &self.value)
    }
}

/// Asserts that every way of iterating over `map` yields exactly `expected`.
///
/// `expected` must be sorted.
pub fn assert_iter_eq(mut map: TestMap, expected: Vec<(i32, i32, &String)>) {
    let mut iter = map.iter().collect::<Vec<_>>();
    iter.sort();
    assert_eq!(iter, expected, ".iter() entries match naive ones");

    let mut for_each_owned = Vec::new();
    map.for_each_entry(|a, b, value| for_each_owned.push((a, b, value.clone())));
    let mut for_each = for_each_owned
        .iter()
        .map(|(a, b, value)| (*a, *b, value))
        .collect::<Vec<_>>();
    for_each.sort();
    assert_eq!(for_each, expected, ".for_each_entry() entries match");

    let mut keys = map.keys().collect::<Vec<_>>();
    keys.sort();
    let expected_keys =
        expected.iter().map(|&(a, b, _)| (a, b)).collect::<Vec<_>>();
    assert_eq!(keys, expected_keys, ".keys() match naive ones");

    let mut values = map.values().collect::<Vec<_>>();
    values.sort();
    let mut expected_values =
        expected.iter().map(|&(_, _, value)| value).collect::<Vec<_>>();
    expected_values.sort();
    assert_eq!(values, expected_values, ".values() match naive ones");

    let mut iter_mut = map
        .iter_mut()
        .map(|(a, b, value)| (a, b, value.clone()))
        .collect::<Vec<_>>();
    iter_mut.sort();
    let expected_owned = expected
        .iter()
        .map(|&(a, b, value)| (a, b, value.clone()))
        .collect::<Vec<_>>();
    assert_eq!(iter_mut, expected_owned, ".iter_mut() entries match");

    let mut into_iter = map.into_iter().collect::<Vec<_>>();
    into_iter.sort();
    assert_eq!(into_iter, expected_owned, ".into_iter() entries match");
}

/// Returns two permutations of a set of entries with distinct key pairs.
pub fn entry_permutation_strategy(
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = (Vec<TestEntry>, Vec<TestEntry>)> {
    prop::collection::vec(any::<TestEntry>(), size.into()).prop_perturb(
        |entries, mut rng| {
            // Drop entries with repeated key pairs by letting the map reject
            // them.
            let mut map = make_new();
            for entry in entries {
                _ = map.insert_unique(entry.a, entry.b, entry.value);
            }
            let set: Vec<_> = map
                .into_iter()
                .map(|(a, b, value)| TestEntry { a, b, value })
                .collect();

            // Fisher-Yates shuffle.
            let mut shuffled = set.clone();
            for i in (1..shuffled.len()).rev() {
                let j = rng.random_range(0..=i);
                shuffled.swap(i, j);
            }

            (set, shuffled)
        },
    )
}
