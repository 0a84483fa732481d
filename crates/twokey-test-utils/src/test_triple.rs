use test_strategy::Arbitrary;
use twokey::{HashComparer, Triple, TwoKeyMap};

#[cfg(feature = "default-hasher")]
pub type HashBuilder = twokey::DefaultHashBuilder;

#[cfg(not(feature = "default-hasher"))]
pub type HashBuilder = std::hash::RandomState;

/// The comparer used for both key spaces of [`TestMap`].
pub type TestComparer = HashComparer<HashBuilder>;

/// The map type exercised by property-based tests.
pub type TestMap = TwoKeyMap<u8, char, String, TestComparer, TestComparer>;

/// Creates an empty [`TestMap`].
pub fn new_test_map() -> TestMap {
    new_map()
}

/// Creates an empty map of any key and value types, hashing both key spaces
/// with [`TestComparer`].
pub fn new_map<A, B, V>() -> TwoKeyMap<A, B, V, TestComparer, TestComparer> {
    TwoKeyMap::with_comparers(TestComparer::default(), TestComparer::default())
}

/// A triple with arbitrary keys, for property-based tests.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestTriple {
    // u8 has only 256 values, so A-key collisions are likely.
    pub key_a: u8,
    // The Arbitrary impl for char is biased towards ASCII, so B-key
    // collisions happen often too.
    pub key_b: char,
    pub value: String,
}

impl TestTriple {
    pub fn new(key_a: u8, key_b: char, value: impl Into<String>) -> Self {
        Self { key_a, key_b, value: value.into() }
    }

    pub fn into_triple(self) -> Triple<u8, char, String> {
        Triple::new(self.key_a, self.key_b, self.value)
    }
}

impl From<TestTriple> for Triple<u8, char, String> {
    fn from(triple: TestTriple) -> Self {
        triple.into_triple()
    }
}

impl From<&Triple<u8, char, String>> for TestTriple {
    fn from(triple: &Triple<u8, char, String>) -> Self {
        Self::new(*triple.key_a(), *triple.key_b(), triple.value().clone())
    }
}

impl PartialEq<Triple<u8, char, String>> for TestTriple {
    fn eq(&self, other: &Triple<u8, char, String>) -> bool {
        self.key_a == *other.key_a()
            && self.key_b == *other.key_b()
            && self.value == *other.value()
    }
}

/// Collects the triples of `map` as `TestTriple`s, sorted.
pub fn sorted_triples(map: &TestMap) -> Vec<TestTriple> {
    let mut triples: Vec<_> = map.iter().map(TestTriple::from).collect();
    triples.sort();
    triples
}
