use compound_key_map::{
    CompoundKey, CompoundKeyMap, MapConfig,
    config::{
        DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_CAPACITY,
        MIN_CAPACITY,
    },
    errors::ConfigError,
};
use compound_key_map_test_utils::{
    eq_props::{assert_eq_props, assert_ne_props},
    naive_map::NaiveMap,
    test_entry::{
        Alloc, HashBuilder, TestEntry, TestKey, TestMap, assert_iter_eq,
        entry_permutation_strategy, make_new, make_with_config, map_config,
    },
};
use proptest::prelude::*;
use test_strategy::{Arbitrary, proptest};

#[test]
fn insert_get_remove() {
    let mut map = make_new();
    assert!(map.is_empty());

    assert_eq!(map.insert(5, 10, "x".to_owned()), None);
    assert_eq!(map.insert(5, 11, "y".to_owned()), None);
    assert_eq!(map.insert(6, 10, "z".to_owned()), None);
    assert_eq!(map.len(), 3);
    assert!(!map.is_empty());

    assert_eq!(map.get(5, 10).map(String::as_str), Some("x"));
    assert_eq!(map.get(5, 11).map(String::as_str), Some("y"));
    assert_eq!(map.get(6, 10).map(String::as_str), Some("z"));
    // The order of key parts matters.
    assert_eq!(map.get(10, 5), None);
    assert_eq!(map.get(6, 11), None);

    assert_eq!(map.remove(5, 11).as_deref(), Some("y"));
    assert_eq!(map.get(5, 11), None);
    assert_eq!(map.remove(5, 11), None);
    assert_eq!(map.len(), 2);

    map.validate().expect("map is valid");
}

#[test]
fn insert_overwrites() {
    let mut map = make_new();
    assert_eq!(map.insert(1, 2, "a".to_owned()), None);
    assert_eq!(map.insert(1, 2, "b".to_owned()).as_deref(), Some("a"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(1, 2).map(String::as_str), Some("b"));
}

#[test]
fn boundary_key_parts() {
    let parts = [i32::MIN, -1, 0, 1, i32::MAX];
    let mut map = make_new();
    for a in parts {
        for b in parts {
            map.insert(a, b, format!("{a},{b}"));
        }
    }
    assert_eq!(map.len(), parts.len() * parts.len());
    map.validate().expect("map is valid");

    for a in parts {
        for b in parts {
            assert_eq!(map.get(a, b), Some(&format!("{a},{b}")));
        }
    }

    // Sign extension of part B would make these collide.
    map.clear();
    map.insert(-1, 0, "a".to_owned());
    map.insert(0, -1, "b".to_owned());
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(-1, 0).map(String::as_str), Some("a"));
    assert_eq!(map.get(0, -1).map(String::as_str), Some("b"));
    assert_ne!(CompoundKey::pack(-1, 0), CompoundKey::pack(0, -1));
}

#[test]
fn iteration_recovers_key_parts() {
    let entries = [
        TestEntry::new(i32::MIN, i32::MAX, "a"),
        TestEntry::new(-1, -1, "b"),
        TestEntry::new(3, -7, "c"),
    ];
    let mut map = make_new();
    map.extend(entries.iter().map(|e| (e.a, e.b, e.value.clone())));

    let mut expected =
        entries.iter().map(TestEntry::as_triple).collect::<Vec<_>>();
    expected.sort();
    assert_iter_eq(map.clone(), expected);

    let mut values = Vec::new();
    map.for_each_value(|value| values.push(value.clone()));
    values.sort();
    assert_eq!(values, ["a", "b", "c"]);
}

#[test]
fn insert_unique() {
    let mut map = make_new();
    map.insert_unique(-3, 4, "first".to_owned()).unwrap();

    let error = map.insert_unique(-3, 4, "second".to_owned()).unwrap_err();
    assert_eq!(error.key_parts(), (-3, 4));
    assert_eq!(error.key(), CompoundKey::pack(-3, 4));
    assert_eq!(error.new_value(), "second");
    assert_eq!(*error.existing(), "first");
    assert_eq!(
        error.to_string(),
        "new value \"second\" for key (-3, 4) conflicts with existing value \
         \"first\""
    );

    // The failed insert leaves the map unchanged.
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(-3, 4).map(String::as_str), Some("first"));

    map.insert_unique(4, -3, "swapped".to_owned()).unwrap();
    assert_eq!(map.len(), 2);
}

#[test]
fn mutation_through_references() {
    let mut map = make_new();
    map.insert(1, 1, "a".to_owned());
    map.insert(2, 2, "b".to_owned());

    map.get_mut(1, 1).unwrap().push('!');
    assert_eq!(map.get(1, 1).map(String::as_str), Some("a!"));
    assert_eq!(map.get_mut(3, 3), None);

    for value in map.values_mut() {
        value.push('?');
    }
    for (a, _, value) in &mut map {
        if a == 2 {
            value.clear();
        }
    }
    assert_eq!(map.get(1, 1).map(String::as_str), Some("a!?"));
    assert_eq!(map.get(2, 2).map(String::as_str), Some(""));

    let value = map.get_or_insert_with(7, -7, || "new".to_owned());
    value.push('.');
    assert_eq!(map.get(7, -7).map(String::as_str), Some("new."));
    let value = map.get_or_insert_with(7, -7, || unreachable!());
    assert_eq!(value, "new.");
    map.validate().expect("map is valid");
}

#[test]
fn retain_sees_key_parts() {
    let mut map = make_new();
    for a in -5..5 {
        for b in -5..5 {
            map.insert(a, b, String::new());
        }
    }
    map.retain(|a, b, value| {
        value.push_str("kept");
        a < 0 && b >= 0
    });
    assert_eq!(map.len(), 25);
    assert!(map.keys().all(|(a, b)| a < 0 && b >= 0));
    assert!(map.values().all(|value| value == "kept"));
    map.validate().expect("map is valid");
}

#[test]
fn default_config() {
    let map = make_new();
    assert_eq!(map.capacity(), DEFAULT_INITIAL_CAPACITY);
    assert_eq!(map.load_factor(), DEFAULT_LOAD_FACTOR);
    assert_eq!(map.resize_threshold(), 4);
}

#[test]
fn config_errors() {
    assert_eq!(MapConfig::new(0, 0.5), Err(ConfigError::ZeroCapacity));
    assert_eq!(
        MapConfig::new(usize::MAX, 0.5),
        Err(ConfigError::CapacityOverflow { requested: usize::MAX })
    );
    for load_factor in [0.0, 1.0, -0.5, 1.5, f64::INFINITY] {
        assert_eq!(
            MapConfig::new(16, load_factor),
            Err(ConfigError::LoadFactorOutOfRange { load_factor }),
        );
    }
    let error = MapConfig::new(16, f64::NAN).unwrap_err();
    assert!(
        matches!(
            error,
            ConfigError::LoadFactorOutOfRange { load_factor }
                if load_factor.is_nan()
        ),
        "NaN is rejected, got {error:?}"
    );

    assert_eq!(
        ConfigError::ZeroCapacity.to_string(),
        "initial capacity must be greater than zero"
    );
    assert_eq!(
        ConfigError::LoadFactorOutOfRange { load_factor: 2.0 }.to_string(),
        "load factor 2 must be greater than 0 and less than 1"
    );
}

#[test]
fn growth_and_compact() {
    let config = MapConfig::new(5, 0.75).unwrap();
    let mut map = TestMap::with_config_and_hasher_in(
        config,
        HashBuilder::default(),
        Alloc::default(),
    );
    assert_eq!(map.capacity(), 8);
    assert_eq!(map.resize_threshold(), 6);

    for i in 0..6 {
        map.insert(i, -i, i.to_string());
    }
    assert_eq!(map.capacity(), 8, "at the threshold");
    map.insert(6, -6, "6".to_owned());
    assert_eq!(map.capacity(), 16);
    assert_eq!(map.resize_threshold(), 12);

    for i in 7..1000 {
        map.insert(i, -i, i.to_string());
    }
    assert_eq!(map.capacity(), 2048);
    map.validate().expect("map is valid");

    // Clearing keeps the capacity, compacting releases it.
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 2048);
    map.compact();
    assert_eq!(map.capacity(), MIN_CAPACITY);
    assert_eq!(map.load_factor(), 0.75);
    map.validate().expect("map is valid");

    // The map is usable after compacting.
    map.insert(1, 2, "again".to_owned());
    assert_eq!(map.get(1, 2).map(String::as_str), Some("again"));
}

#[test]
fn tiny_load_factor() {
    let config = MapConfig::new(8, 1e-20).unwrap();
    assert_eq!(config.resize_threshold(), 0);
    let mut map = make_with_config(config);

    for i in -50..50 {
        map.insert(i, i * 2, i.to_string());
    }
    // Growth stops at the largest capacity, whose threshold is unbounded.
    assert_eq!(map.capacity(), MAX_CAPACITY);
    assert_eq!(map.resize_threshold(), usize::MAX);
    assert_eq!(map.len(), 100);
    map.validate().expect("map is valid");

    for i in -50..50 {
        assert_eq!(map.get(i, i * 2), Some(&i.to_string()));
    }
    map.insert_unique(1000, 1000, "unique".to_owned()).unwrap();

    map.compact();
    assert_eq!(map.capacity(), MAX_CAPACITY);
    assert_eq!(map.len(), 101);
    map.validate().expect("map is valid");

    map.retain(|_, _, _| false);
    map.compact();
    assert_eq!(map.capacity(), MIN_CAPACITY);
    map.validate().expect("map is valid");
}

#[test]
fn oversized_initial_capacity() {
    let config = MapConfig::new(MAX_CAPACITY, 0.5).unwrap();
    assert_eq!(config.resize_threshold(), usize::MAX);
    assert_eq!(
        TestMap::try_with_config_and_hasher_in(
            config,
            HashBuilder::default(),
            Alloc::default(),
        )
        .err(),
        Some(ConfigError::CapacityOverflow { requested: MAX_CAPACITY }),
    );

    // The infallible constructor skips preallocation instead.
    let mut map = make_with_config(config);
    assert_eq!(map.capacity(), MAX_CAPACITY);
    map.insert(1, 2, "fits".to_owned());
    assert_eq!(map.get(1, 2).map(String::as_str), Some("fits"));
    map.validate().expect("map is valid");

    assert_eq!(
        ConfigError::CapacityOverflow { requested: 1 }.to_string(),
        "initial capacity 1 is too large"
    );
    assert_eq!(
        ConfigError::AllocationFailed { requested: 64 }.to_string(),
        "failed to allocate storage for initial capacity 64"
    );
}

#[cfg(all(feature = "default-hasher", target_pointer_width = "64"))]
#[test]
fn with_capacity_and_load_factor_too_large() {
    let requested = 1usize << 62;
    assert_eq!(
        CompoundKeyMap::<u8>::with_capacity_and_load_factor(requested, 0.5)
            .err(),
        Some(ConfigError::CapacityOverflow { requested }),
    );

    let mut map = CompoundKeyMap::<u8>::with_config(
        MapConfig::new(requested, 0.5).unwrap(),
    );
    assert_eq!(map.capacity(), requested);
    map.insert(-1, -1, 1);
    assert_eq!(map.get(-1, -1), Some(&1));
}

#[test]
fn debug_impl() {
    let mut map = make_new();
    map.insert(-1, 2, "v".to_owned());
    assert_eq!(format!("{map:?}"), r#"{(-1, 2): "v"}"#);
}

#[test]
fn from_iterator_last_value_wins() {
    let map: CompoundKeyMap<&str, HashBuilder, Alloc> =
        [(1, 1, "a"), (2, 2, "b"), (1, 1, "c")].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(1, 1), Some(&"c"));
}

#[derive(Debug, Arbitrary)]
enum Operation {
    // Make inserts more common to fill up the map.
    #[weight(3)]
    Insert(TestEntry),
    #[weight(2)]
    InsertUnique(TestEntry),
    Get(TestKey),
    GetMut(TestKey),
    ContainsKey(TestKey),
    Remove(TestKey),
    RetainNegativeA,
    Clear,
    Compact,
}

#[proptest(cases = 32)]
fn proptest_ops(
    #[strategy(prop::collection::vec(any::<Operation>(), 0..1024))] ops: Vec<
        Operation,
    >,
) {
    run_ops(make_new(), ops);
}

#[proptest(cases = 32)]
fn proptest_ops_with_config(
    #[strategy(map_config())] config: MapConfig,
    #[strategy(prop::collection::vec(any::<Operation>(), 0..256))] ops: Vec<
        Operation,
    >,
) {
    let map = make_with_config(config);
    assert_eq!(map.capacity(), config.capacity());
    assert_eq!(map.load_factor(), config.load_factor());
    run_ops(map, ops);
}

fn run_ops(mut map: TestMap, ops: Vec<Operation>) {
    let load_factor = map.load_factor();
    let mut naive_map = NaiveMap::new();

    for op in ops {
        match op {
            Operation::Insert(entry) => {
                let map_res = map.insert(entry.a, entry.b, entry.value.clone());
                let naive_res = naive_map.insert(entry);
                assert_eq!(map_res, naive_res, "previous values match");
                map.validate().expect("map is valid");
            }
            Operation::InsertUnique(entry) => {
                let map_res =
                    map.insert_unique(entry.a, entry.b, entry.value.clone());
                let naive_res = naive_map.insert_unique(entry);
                match (map_res, naive_res) {
                    (Ok(()), Ok(())) => {}
                    (Err(map_err), Err(naive_err)) => {
                        assert_eq!(map_err.key(), naive_err.key());
                        assert_eq!(map_err.new_value(), naive_err.new_value());
                        assert_eq!(map_err.existing(), naive_err.existing());
                    }
                    (map_res, naive_res) => panic!(
                        "map and naive map disagree on insert_unique: \
                         {map_res:?} vs {naive_res:?}"
                    ),
                }
                map.validate().expect("map is valid");
            }
            Operation::Get(key) => {
                assert_eq!(map.get(key.a, key.b), naive_map.get(key.a, key.b));
            }
            Operation::GetMut(key) => {
                let map_res = map.get_mut(key.a, key.b).map(|value| {
                    value.push('+');
                    value.clone()
                });
                let naive_res = naive_map.get_mut(key.a, key.b).map(|value| {
                    value.push('+');
                    value.clone()
                });
                assert_eq!(map_res, naive_res);
            }
            Operation::ContainsKey(key) => {
                assert_eq!(
                    map.contains_key(key.a, key.b),
                    naive_map.get(key.a, key.b).is_some(),
                );
            }
            Operation::Remove(key) => {
                assert_eq!(
                    map.remove(key.a, key.b),
                    naive_map.remove(key.a, key.b),
                );
                map.validate().expect("map is valid");
            }
            Operation::RetainNegativeA => {
                map.retain(|a, _, _| a < 0);
                naive_map.retain(|a, _, _| a < 0);
                map.validate().expect("map is valid");
            }
            Operation::Clear => {
                let capacity = map.capacity();
                map.clear();
                naive_map.clear();
                assert_eq!(map.capacity(), capacity, "clear keeps capacity");
                map.validate().expect("map is valid");
            }
            Operation::Compact => {
                map.compact();
                map.validate().expect("map is valid");
            }
        }

        assert_eq!(map.len(), naive_map.len());
        assert_eq!(map.is_empty(), naive_map.is_empty());
        assert_eq!(map.load_factor(), load_factor, "load factor is fixed");
        assert_iter_eq(map.clone(), naive_map.sorted_triples());
    }
}

#[proptest(cases = 64)]
fn proptest_permutation_eq(
    #[strategy(entry_permutation_strategy(0..256))] entries: (
        Vec<TestEntry>,
        Vec<TestEntry>,
    ),
) {
    let (entries1, entries2) = entries;
    let mut map1 = make_new();
    let mut map2 = make_new();

    for entry in entries1 {
        map1.insert_unique(entry.a, entry.b, entry.value).unwrap();
    }
    for entry in entries2 {
        map2.insert_unique(entry.a, entry.b, entry.value).unwrap();
    }

    assert_eq_props(map1, map2);
}

#[test]
fn permutation_ne_examples() {
    let mut map1 = make_new();
    let mut map2 = make_new();
    assert_eq_props(map1.clone(), map2.clone());

    map1.insert(1, 2, "a".to_owned());
    assert_ne_props(map1.clone(), map2.clone());

    // Same key pair, different value.
    map2.insert(1, 2, "b".to_owned());
    assert_ne_props(map1.clone(), map2.clone());

    // Same value, swapped key parts.
    map2.clear();
    map2.insert(2, 1, "a".to_owned());
    assert_ne_props(map1.clone(), map2.clone());

    map2.clear();
    map2.insert(1, 2, "a".to_owned());
    assert_eq_props(map1, map2);
}
