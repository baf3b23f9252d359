//! Serde-related test utilities.

use crate::test_entry::{TestEntry, TestMap, make_new};

/// Serializes a map built from `entries` and checks that it deserializes to
/// the same map. Then checks that deserializing `entries` directly fails
/// with the same error as the first rejected `insert_unique`, if any.
pub fn assert_serialize_roundtrip(entries: Vec<TestEntry>) {
    let mut map = make_new();
    let mut first_error = None;
    for entry in entries.iter().cloned() {
        if let Err(error) = map.insert_unique(entry.a, entry.b, entry.value) {
            if first_error.is_none() {
                first_error = Some(error.into_owned());
            }
        }
    }

    let serialized = serde_json::to_string(&map).unwrap();
    let deserialized = deserialize(&serialized).unwrap();
    deserialized.validate().expect("deserialized map is valid");
    assert_eq!(map, deserialized, "entries match");

    // A map serializes as a plain list of triples, so the entries can be
    // serialized directly.
    let triples =
        entries.iter().map(TestEntry::as_triple).collect::<Vec<_>>();
    let serialized = serde_json::to_string(&triples).unwrap();
    match (first_error, deserialize(&serialized)) {
        (None, Ok(_)) => {}
        (Some(first_error), Ok(_)) => {
            panic!(
                "expected error ({first_error}), but deserialization succeeded"
            )
        }
        (None, Err(error)) => {
            panic!(
                "unexpected error: {error}, deserialization should have \
                 succeeded"
            )
        }
        (Some(first_error), Err(error)) => {
            let expected = first_error.to_string();
            let actual = error.to_string();

            // serde_json appends the position to custom errors.
            let Some((actual_prefix, _)) = actual.rsplit_once(" at line ")
            else {
                panic!(
                    "error does not contain line number at the end: {actual}"
                );
            };
            assert_eq!(actual_prefix, expected, "error matches");
        }
    }
}

fn deserialize(s: &str) -> Result<TestMap, serde_json::Error> {
    TestMap::deserialize_with_hasher_in(
        &mut serde_json::Deserializer::from_str(s),
        Default::default(),
        Default::default(),
    )
}
