use crate::{
    support::comparer::KeyComparer, KeyKind, Triple, TwoKeyError, TwoKeyMap,
};
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use serde_core::{
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
    ser::{SerializeSeq, SerializeStruct},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// A `Triple` serializes as a struct with `key_a`, `key_b` and `value`
/// fields.
impl<A: Serialize, B: Serialize, V: Serialize> Serialize for Triple<A, B, V> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Triple", 3)?;
        state.serialize_field("key_a", self.key_a())?;
        state.serialize_field("key_b", self.key_b())?;
        state.serialize_field("value", self.value())?;
        state.end()
    }
}

/// A `Triple` deserializes from a struct, or from a sequence of three
/// elements.
///
/// A missing key is reported as [`TwoKeyError::NullKey`], and a missing value
/// as [`TwoKeyError::MissingData`].
impl<'de, A, B, V> Deserialize<'de> for Triple<A, B, V>
where
    A: Deserialize<'de>,
    B: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_struct(
            "Triple",
            TRIPLE_FIELDS,
            TripleVisitor { _marker: PhantomData },
        )
    }
}

const TRIPLE_FIELDS: &[&str] = &["key_a", "key_b", "value"];

enum TripleField {
    KeyA,
    KeyB,
    Value,
    Other,
}

impl<'de> Deserialize<'de> for TripleField {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = TripleField;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a triple field name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(match v {
                    "key_a" => TripleField::KeyA,
                    "key_b" => TripleField::KeyB,
                    "value" => TripleField::Value,
                    _ => TripleField::Other,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct TripleVisitor<A, B, V> {
    _marker: PhantomData<fn() -> Triple<A, B, V>>,
}

impl<'de, A, B, V> Visitor<'de> for TripleVisitor<A, B, V>
where
    A: Deserialize<'de>,
    B: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = Triple<A, B, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a triple with key_a, key_b and value")
    }

    fn visit_seq<S: SeqAccess<'de>>(
        self,
        mut seq: S,
    ) -> Result<Self::Value, S::Error> {
        let key_a = seq.next_element()?.ok_or_else(|| {
            de::Error::custom(TwoKeyError::NullKey(Some(KeyKind::A)))
        })?;
        let key_b = seq.next_element()?.ok_or_else(|| {
            de::Error::custom(TwoKeyError::NullKey(Some(KeyKind::B)))
        })?;
        let value = seq.next_element()?.ok_or_else(|| {
            de::Error::custom(TwoKeyError::MissingData("a triple value"))
        })?;
        Ok(Triple::new(key_a, key_b, value))
    }

    fn visit_map<M: MapAccess<'de>>(
        self,
        mut map: M,
    ) -> Result<Self::Value, M::Error> {
        let mut key_a = None;
        let mut key_b = None;
        let mut value = None;
        while let Some(field) = map.next_key()? {
            match field {
                TripleField::KeyA => {
                    if key_a.is_some() {
                        return Err(de::Error::duplicate_field("key_a"));
                    }
                    key_a = Some(map.next_value()?);
                }
                TripleField::KeyB => {
                    if key_b.is_some() {
                        return Err(de::Error::duplicate_field("key_b"));
                    }
                    key_b = Some(map.next_value()?);
                }
                TripleField::Value => {
                    if value.is_some() {
                        return Err(de::Error::duplicate_field("value"));
                    }
                    value = Some(map.next_value()?);
                }
                TripleField::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let key_a = key_a.ok_or_else(|| {
            de::Error::custom(TwoKeyError::NullKey(Some(KeyKind::A)))
        })?;
        let key_b = key_b.ok_or_else(|| {
            de::Error::custom(TwoKeyError::NullKey(Some(KeyKind::B)))
        })?;
        let value = value.ok_or_else(|| {
            de::Error::custom(TwoKeyError::MissingData("a triple value"))
        })?;
        Ok(Triple::new(key_a, key_b, value))
    }
}

/// A `TwoKeyMap` serializes as a struct holding its version stamp, its
/// capacity, and its triples in iteration order.
///
/// Comparers are not serialized. They are supplied again on deserialization
/// (see [`TwoKeyMap::deserialize_with_comparers`]).
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use twokey::TwoKeyMap;
/// # use twokey_test_utils::serde_json;
///
/// let mut map = TwoKeyMap::new();
/// map.add("Fern", 48, 0xFF71BC78_u32).unwrap();
///
/// let serialized = serde_json::to_string(&map).unwrap();
/// assert_eq!(
///     serialized,
///     r#"{"version":1,"capacity":3,"triples":[{"key_a":"Fern","key_b":48,"value":4285643896}]}"#,
/// );
/// # }
/// ```
impl<A, B, V, CA, CB> Serialize for TwoKeyMap<A, B, V, CA, CB>
where
    A: Serialize,
    B: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        struct Triples<'a, A, B, V, CA, CB>(&'a TwoKeyMap<A, B, V, CA, CB>);

        impl<A, B, V, CA, CB> Serialize for Triples<'_, A, B, V, CA, CB>
        where
            A: Serialize,
            B: Serialize,
            V: Serialize,
        {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
                for triple in self.0 {
                    seq.serialize_element(triple)?;
                }
                seq.end()
            }
        }

        let mut state = serializer.serialize_struct("TwoKeyMap", 3)?;
        state.serialize_field("version", &self.version())?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("triples", &Triples(self))?;
        state.end()
    }
}

/// The `Deserialize` impl for `TwoKeyMap` re-adds every triple through
/// [`TwoKeyMap::add`], failing on the first duplicate key. The stored version
/// stamp is restored afterwards.
///
/// The stored capacity is a hint: it is restored when it is at most 1024 or
/// at most four times the number of triples, and clamped otherwise.
///
/// A bare sequence of triples is also accepted.
impl<'de, A, B, V, CA, CB> Deserialize<'de> for TwoKeyMap<A, B, V, CA, CB>
where
    A: Deserialize<'de>,
    B: Deserialize<'de>,
    V: Deserialize<'de>,
    CA: Default + KeyComparer<A>,
    CB: Default + KeyComparer<B>,
{
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Self::deserialize_with_comparers(
            deserializer,
            CA::default(),
            CB::default(),
        )
    }
}

impl<'de, A, B, V, CA, CB> TwoKeyMap<A, B, V, CA, CB>
where
    A: Deserialize<'de>,
    B: Deserialize<'de>,
    V: Deserialize<'de>,
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    /// Deserializes a map, hashing and comparing keys with the given
    /// comparers.
    pub fn deserialize_with_comparers<D: Deserializer<'de>>(
        deserializer: D,
        comparer_a: CA,
        comparer_b: CB,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_struct(
            "TwoKeyMap",
            MAP_FIELDS,
            MapVisitor { comparer_a, comparer_b, _marker: PhantomData },
        )
    }
}

const MAP_FIELDS: &[&str] = &["version", "capacity", "triples"];

// Stored capacities up to this many triples are restored as-is.
const CAPACITY_HINT_FLOOR: usize = 1024;

enum MapField {
    Version,
    Capacity,
    Triples,
    Other,
}

impl<'de> Deserialize<'de> for MapField {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = MapField;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map field name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(match v {
                    "version" => MapField::Version,
                    "capacity" => MapField::Capacity,
                    "triples" => MapField::Triples,
                    _ => MapField::Other,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct MapVisitor<A, B, V, CA, CB> {
    comparer_a: CA,
    comparer_b: CB,
    _marker: PhantomData<fn() -> Triple<A, B, V>>,
}

impl<A, B, V, CA, CB> MapVisitor<A, B, V, CA, CB>
where
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    fn build<E: de::Error>(
        self,
        version: Option<u64>,
        capacity: usize,
        triples: Vec<Triple<A, B, V>>,
    ) -> Result<TwoKeyMap<A, B, V, CA, CB>, E> {
        // The stored capacity is a hint, capped relative to the triple count.
        let capacity = capacity
            .min(triples.len().saturating_mul(4).max(CAPACITY_HINT_FLOOR))
            .max(triples.len());
        let mut map = TwoKeyMap::try_with_capacity_and_comparers(
            capacity,
            self.comparer_a,
            self.comparer_b,
        )
        .map_err(de::Error::custom)?;
        for triple in triples {
            map.add_triple(triple)
                .map_err(|error| de::Error::custom(TwoKeyError::from(error)))?;
        }
        if let Some(version) = version {
            map.set_version(version);
        }
        Ok(map)
    }
}

impl<'de, A, B, V, CA, CB> Visitor<'de> for MapVisitor<A, B, V, CA, CB>
where
    A: Deserialize<'de>,
    B: Deserialize<'de>,
    V: Deserialize<'de>,
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    type Value = TwoKeyMap<A, B, V, CA, CB>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a TwoKeyMap, or a sequence of triples")
    }

    fn visit_seq<S: SeqAccess<'de>>(
        self,
        mut seq: S,
    ) -> Result<Self::Value, S::Error> {
        let mut triples = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(triple) = seq.next_element()? {
            triples.push(triple);
        }
        self.build(None, 0, triples)
    }

    fn visit_map<M: MapAccess<'de>>(
        self,
        mut map: M,
    ) -> Result<Self::Value, M::Error> {
        let mut version = None;
        let mut capacity = None;
        let mut triples = None;
        while let Some(field) = map.next_key()? {
            match field {
                MapField::Version => {
                    if version.is_some() {
                        return Err(de::Error::duplicate_field("version"));
                    }
                    version = Some(map.next_value()?);
                }
                MapField::Capacity => {
                    if capacity.is_some() {
                        return Err(de::Error::duplicate_field("capacity"));
                    }
                    capacity = Some(map.next_value()?);
                }
                MapField::Triples => {
                    if triples.is_some() {
                        return Err(de::Error::duplicate_field("triples"));
                    }
                    triples = Some(map.next_value::<Vec<Triple<A, B, V>>>()?);
                }
                MapField::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let triples = triples.ok_or_else(|| {
            de::Error::custom(TwoKeyError::MissingData("the triples field"))
        })?;
        self.build(version, capacity.unwrap_or(0), triples)
    }
}
