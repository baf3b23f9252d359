use crate::{CompoundKeyMap, support::alloc::Allocator};
use core::{fmt, hash::BuildHasher, marker::PhantomData};
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
};

/// A `CompoundKeyMap` serializes to a list of `(key_part_a, key_part_b,
/// value)` triples, in arbitrary order.
///
/// Serializing as a list rather than as a map works around the lack of
/// non-string keys in formats like JSON.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use compound_key_map::CompoundKeyMap;
///
/// let mut map = CompoundKeyMap::new();
/// map.insert(-1, 7, "value".to_string());
///
/// let serialized = serde_json::to_string(&map).unwrap();
/// assert_eq!(serialized, r#"[[-1,7,"value"]]"#);
///
/// let deserialized: CompoundKeyMap<String> =
///     serde_json::from_str(&serialized).unwrap();
/// assert_eq!(deserialized, map);
/// # }
/// ```
impl<V, S: BuildHasher, A: Allocator> Serialize for CompoundKeyMap<V, S, A>
where
    V: Serialize,
{
    fn serialize<Ser: Serializer>(
        &self,
        serializer: Ser,
    ) -> Result<Ser::Ok, Ser::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

/// The `Deserialize` impl for `CompoundKeyMap` deserializes the list of
/// triples, producing an error if a key pair appears more than once.
///
/// The `fmt::Debug` bound on `V` ensures better error reporting.
impl<
    'de,
    V: fmt::Debug,
    S: BuildHasher + Default,
    A: Allocator + Default,
> Deserialize<'de> for CompoundKeyMap<V, S, A>
where
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor {
            _marker: PhantomData,
            hasher: S::default(),
            alloc: A::default(),
        })
    }
}

impl<'de, V: fmt::Debug + Deserialize<'de>, S: BuildHasher, A: Allocator>
    CompoundKeyMap<V, S, A>
{
    /// Deserializes from a list of triples, allocating new storage within
    /// the provided allocator.
    pub fn deserialize_in<D: Deserializer<'de>>(
        deserializer: D,
        alloc: A,
    ) -> Result<Self, D::Error>
    where
        S: Default,
    {
        deserializer.deserialize_seq(SeqVisitor {
            _marker: PhantomData,
            hasher: S::default(),
            alloc,
        })
    }

    /// Deserializes from a list of triples, with the given hasher, using the
    /// default allocator.
    pub fn deserialize_with_hasher<D: Deserializer<'de>>(
        deserializer: D,
        hasher: S,
    ) -> Result<Self, D::Error>
    where
        A: Default,
    {
        deserializer.deserialize_seq(SeqVisitor {
            _marker: PhantomData,
            hasher,
            alloc: A::default(),
        })
    }

    /// Deserializes from a list of triples, with the given hasher, and
    /// allocating new storage within the provided allocator.
    pub fn deserialize_with_hasher_in<D: Deserializer<'de>>(
        deserializer: D,
        hasher: S,
        alloc: A,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor {
            _marker: PhantomData,
            hasher,
            alloc,
        })
    }
}

struct SeqVisitor<V, S, A> {
    _marker: PhantomData<fn() -> V>,
    hasher: S,
    alloc: A,
}

impl<'de, V, S, A> Visitor<'de> for SeqVisitor<V, S, A>
where
    V: Deserialize<'de> + fmt::Debug,
    S: BuildHasher,
    A: Allocator,
{
    type Value = CompoundKeyMap<V, S, A>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(
            "a sequence of (key_part_a, key_part_b, value) triples \
             representing a CompoundKeyMap",
        )
    }

    fn visit_seq<Access>(
        self,
        mut seq: Access,
    ) -> Result<Self::Value, Access::Error>
    where
        Access: SeqAccess<'de>,
    {
        let mut map = CompoundKeyMap::with_hasher_in(self.hasher, self.alloc);

        while let Some(element) = seq.next_element::<(i32, i32, V)>()? {
            let (a, b, value) = element;
            map.insert_unique(a, b, value)
                .map_err(serde_core::de::Error::custom)?;
        }

        Ok(map)
    }
}

#[cfg(all(test, feature = "default-hasher"))]
mod tests {
    use super::*;

    #[test]
    fn boundary_keys_roundtrip() {
        let mut map = CompoundKeyMap::<u8>::new();
        map.insert(i32::MIN, i32::MAX, 1);
        map.insert(i32::MAX, i32::MIN, 2);
        map.insert(-1, 0, 3);
        map.insert(0, -1, 4);

        let serialized = serde_json::to_string(&map).unwrap();
        let deserialized: CompoundKeyMap<u8> =
            serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.get(i32::MIN, i32::MAX), Some(&1));
        assert_eq!(deserialized.get(i32::MAX, i32::MIN), Some(&2));
        assert_eq!(deserialized.get(-1, 0), Some(&3));
        assert_eq!(deserialized.get(0, -1), Some(&4));
    }

    #[test]
    fn rejects_non_sequence() {
        let error = serde_json::from_str::<CompoundKeyMap<u8>>(r#"{"a": 1}"#)
            .unwrap_err();
        assert!(
            error.to_string().contains("sequence of (key_part_a"),
            "unexpected error: {error}"
        );
    }
}
