//! Serde-related test utilities.

use crate::test_triple::{new_test_map, TestMap, TestTriple};
use twokey::{Triple, TwoKeyError};

/// Builds a map from `values`, serializes it, and checks that it
/// deserializes to an identical map.
///
/// Also deserializes `values` directly as a bare sequence, and checks that
/// the first duplicate key among them (if any) is reported the same way
/// `add` reports it.
pub fn assert_serialize_roundtrip(values: Vec<TestTriple>) {
    let mut map = new_test_map();
    let mut first_error = None;
    for value in values.clone() {
        // Duplicates are likely here. Ignore them, but remember the first one
        // so that deserialization can be checked to fail the same way.
        if let Err(error) = map.add_triple(value.into_triple()) {
            if first_error.is_none() {
                first_error = Some(TwoKeyError::from(error));
            }
        }
    }

    let serialized = serde_json::to_string(&map).unwrap();
    let deserialized: TestMap = serde_json::from_str(&serialized).unwrap();
    deserialized.validate().expect("deserialized map is valid");

    // Triples come back in the same slot order, with the same bookkeeping.
    assert!(map.iter().eq(deserialized.iter()), "triples match in order");
    assert_eq!(map.version(), deserialized.version(), "versions match");
    assert_eq!(map.capacity(), deserialized.capacity(), "capacities match");
    assert_eq!(map, deserialized);

    let triples: Vec<Triple<u8, char, String>> =
        values.into_iter().map(TestTriple::into_triple).collect();
    let serialized = serde_json::to_string(&triples).unwrap();
    let res: Result<TestMap, _> = serde_json::from_str(&serialized);
    match (first_error, res) {
        (None, Ok(deserialized)) => {
            deserialized.validate().expect("deserialized map is valid");
            assert!(map.iter().eq(deserialized.iter()), "triples match");
        }
        (Some(first_error), Ok(_)) => {
            panic!(
                "expected error ({first_error}), but deserialization succeeded"
            )
        }
        (None, Err(error)) => {
            panic!(
                "unexpected error: {error}, deserialization should have succeeded"
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
