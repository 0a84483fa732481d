use proptest::prelude::*;
use test_strategy::{proptest, Arbitrary};
use twokey::{
    two_key_map, KeyKind, Triple, TwoKeyError, TwoKeyMap, MAX_PRIME_CAPACITY,
};
use twokey_test_utils::{
    comparers::{CaseInsensitive, Colliding, Poisoned},
    eq_props::{assert_eq_props, assert_ne_props},
    naive_map::NaiveMap,
    test_triple::{
        new_map, new_test_map, sorted_triples, TestComparer, TestTriple,
    },
    unwind::catch_panic,
};

#[test]
fn debug_impls() {
    let mut map = new_map();
    map.add(1, 'a', "x").unwrap();
    map.add(20, 'b', "y").unwrap();
    map.add(10, 'c', "z").unwrap();

    // Iteration follows slot order, which is insertion order here.
    assert_eq!(
        format!("{map:?}"),
        "{{a: 1, b: 'a'}: \"x\", {a: 20, b: 'b'}: \"y\", \
          {a: 10, b: 'c'}: \"z\"}",
    );
    assert_eq!(
        format!("{:?}", map.get_triple_a(&20).unwrap()),
        "Triple { key_a: 20, key_b: 'b', value: \"y\" }",
    );
}

#[test]
fn add_rejects_duplicate_b_key() {
    let mut map = new_map();
    map.add(1, "x", "v1").unwrap();

    let error = map.add(2, "x", "v2").unwrap_err();
    assert_eq!(error.kind(), KeyKind::B);
    assert_eq!(error.new_triple(), &Triple::new(2, "x", "v2"));
    assert_eq!(
        error.to_string(),
        "duplicate B-key \"x\" (while adding A-key 2)"
    );
    assert_eq!(
        TwoKeyError::from(error),
        TwoKeyError::DuplicateKey(KeyKind::B)
    );

    assert_eq!(map.len(), 1);
    assert_eq!(map.get_a(&1), Some(&"v1"));
    assert!(!map.contains_key_a(&2));
}

#[test]
fn add_checks_both_keys_before_mutating() {
    let mut map = new_map();
    map.add(1, 'a', "v1").unwrap();
    map.add(2, 'b', "v2").unwrap();
    let version = map.version();

    // Both keys collide: the A-key is reported.
    let error = map.add(1, 'b', "v3").unwrap_err();
    assert_eq!(error.kind(), KeyKind::A);
    assert_eq!(error.into_triple().into_parts(), (1, 'b', "v3"));

    // Only the A-key collides.
    let error = map.add(1, 'c', "v3").unwrap_err();
    assert_eq!(error.kind(), KeyKind::A);
    // The B-key was not added on the side.
    assert!(!map.contains_key_b(&'c'));

    assert_eq!(map.len(), 2);
    assert_eq!(map.version(), version, "failed adds don't bump the version");
    map.validate().expect("map is valid");
}

#[test]
fn remove_cascades_to_the_other_key() {
    let mut map = new_map();
    map.add("one", 1, 'x').unwrap();
    map.add("two", 2, 'y').unwrap();
    map.add("three", 3, 'z').unwrap();

    assert!(map.remove_b(&2));
    assert!(!map.contains_key_a("two"));
    assert!(!map.remove_b(&2), "second removal finds nothing");
    assert!(!map.remove_a("two"));

    let triple = map.take_a("three").unwrap();
    assert_eq!(triple.into_parts(), ("three", 3, 'z'));
    assert!(!map.contains_key_b(&3));

    assert_eq!(map.len(), 1);
    assert_eq!(map.key_b_for("one"), Some(&1));
    assert_eq!(map.key_a_for(&1), Some(&"one"));
    map.validate().expect("map is valid");
}

#[test]
fn value_accessors() {
    let mut map = new_map();
    map.add(1, 'a', String::from("v1")).unwrap();
    let version = map.version();

    assert_eq!(map.value_a(&1).map(String::as_str), Ok("v1"));
    assert_eq!(map.value_b(&'a').map(String::as_str), Ok("v1"));
    assert_eq!(map.value_a(&2), Err(TwoKeyError::KeyNotFound(KeyKind::A)));
    assert_eq!(map.value_b(&'b'), Err(TwoKeyError::KeyNotFound(KeyKind::B)));

    assert_eq!(map.set_a(&1, "v2".to_owned()), Ok("v1".to_owned()));
    assert_eq!(map.set_b(&'a', "v3".to_owned()), Ok("v2".to_owned()));
    assert_eq!(
        map.set_a(&2, "nope".to_owned()),
        Err(TwoKeyError::KeyNotFound(KeyKind::A))
    );
    assert_eq!(
        map.set_b(&'b', "nope".to_owned()),
        Err(TwoKeyError::KeyNotFound(KeyKind::B))
    );
    map.get_b_mut(&'a').unwrap().push('!');

    assert_eq!(map.get_a(&1).map(String::as_str), Some("v3!"));
    assert_eq!(map.len(), 1, "setting never adds");
    assert_eq!(map.version(), version, "setting values isn't structural");
}

#[test]
fn contains_and_remove_triple_match_b_key_and_value() {
    let mut map = new_map();
    map.add(1, 'a', "v1").unwrap();

    assert!(map.contains(&Triple::new(1, 'a', "v1")));
    // The A-key of the probe is not consulted.
    assert!(map.contains(&Triple::new(99, 'a', "v1")));
    assert!(!map.contains(&Triple::new(1, 'a', "other")));
    assert!(!map.contains(&Triple::new(1, 'b', "v1")));
    assert!(map.contains_value(&"v1"));
    assert!(!map.contains_value(&"v2"));

    assert!(!map.remove_triple(&Triple::new(1, 'a', "other")));
    assert_eq!(map.len(), 1);
    assert!(map.remove_triple(&Triple::new(1, 'a', "v1")));
    assert!(map.is_empty());
    assert!(!map.contains_key_a(&1));
}

#[test]
fn growth_follows_prime_sequence() {
    let mut map = new_map();
    assert_eq!(map.capacity(), 0, "new maps don't allocate");

    let mut capacities = Vec::new();
    for i in 0..150_u32 {
        map.add(i, i64::from(i) * -7, i).unwrap();
        if capacities.last() != Some(&map.capacity()) {
            capacities.push(map.capacity());
        }
    }
    assert_eq!(capacities, [3, 7, 17, 37, 89, 197]);

    // Every triple is still reachable by both keys after the resizes, in
    // the same order.
    for (i, triple) in map.iter().enumerate() {
        let i = i as u32;
        assert_eq!(*triple.key_a(), i);
        assert_eq!(map.get_a(&i), Some(&i));
        assert_eq!(map.get_b(&(i64::from(i) * -7)), Some(&i));
    }
    map.validate().expect("map is valid");
}

#[test]
fn with_capacity() {
    let map = TwoKeyMap::<u8, u8, u8, _, _>::with_capacity_and_comparers(
        100,
        TestComparer::default(),
        TestComparer::default(),
    );
    assert_eq!(map.capacity(), 107);
    assert!(map.is_empty());

    let error = TwoKeyMap::<u8, u8, u8, _, _>::try_with_capacity_and_comparers(
        MAX_PRIME_CAPACITY + 1,
        TestComparer::default(),
        TestComparer::default(),
    )
    .unwrap_err();
    assert!(
        matches!(error, TwoKeyError::InvalidArgument(_)),
        "unexpected error: {error}"
    );

    let mut map = new_test_map();
    map.reserve(10);
    assert_eq!(map.capacity(), 11);
    let version = map.version();
    assert!(map.try_reserve(usize::MAX).is_err());
    assert_eq!(map.capacity(), 11, "failed reserve leaves capacity alone");
    assert_eq!(map.version(), version);
}

#[test]
#[should_panic(expected = "exceeds the maximum")]
fn with_capacity_panics_past_max() {
    let _map = TwoKeyMap::<u8, u8, u8, _, _>::with_capacity_and_comparers(
        MAX_PRIME_CAPACITY + 1,
        TestComparer::default(),
        TestComparer::default(),
    );
}

#[test]
fn freed_slots_are_reused_last_freed_first() {
    let mut map = new_map();
    for (key_a, key_b) in [("a", 0), ("b", 1), ("c", 2)] {
        map.add(key_a, key_b, ()).unwrap();
    }
    fn keys<'k, CA, CB>(map: &TwoKeyMap<&'k str, i32, (), CA, CB>) -> Vec<&'k str> {
        map.keys_a().iter().copied().collect()
    }

    // "d" takes the slot "b" left behind.
    map.remove_a("b");
    map.add("d", 3, ()).unwrap();
    assert_eq!(keys(&map), ["a", "d", "c"]);

    // "c" was freed last, so "e" goes there and "f" takes "a"'s slot.
    map.remove_a("a");
    map.remove_a("c");
    map.add("e", 4, ()).unwrap();
    map.add("f", 5, ()).unwrap();
    assert_eq!(keys(&map), ["f", "d", "e"]);

    // Reusing slots doesn't grow the map.
    assert_eq!(map.capacity(), 3);
    map.validate().expect("map is valid");
}

#[test]
fn clear_retain_and_drain() {
    let mut map = new_test_map();
    let version = map.version();
    map.clear();
    assert_eq!(map.version(), version, "clearing an empty map is a no-op");

    for i in 0..10_u8 {
        map.add(i, char::from(b'a' + i), i.to_string()).unwrap();
    }
    let capacity = map.capacity();

    let version = map.version();
    map.retain(|key_a, _, value| {
        value.push('!');
        key_a % 2 == 0
    });
    assert_eq!(map.len(), 5);
    assert_eq!(map.version(), version + 1, "one bump per retain");
    assert_eq!(map.get_a(&4).map(String::as_str), Some("4!"));
    assert!(!map.contains_key_b(&'b'));
    map.validate().expect("map is valid");

    let version = map.version();
    map.retain(|_, _, _| true);
    assert_eq!(map.version(), version, "retaining everything is a no-op");

    let drained: Vec<_> = map.drain().map(|t| *t.key_a()).collect();
    assert_eq!(drained, [0, 2, 4, 6, 8]);
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity, "drain keeps capacity");
    map.validate().expect("map is valid");

    map.add(1, 'a', "again".to_owned()).unwrap();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity, "clear keeps capacity");
    map.validate().expect("map is valid");
}

#[test]
fn shrink_to_fit_compacts() {
    let mut map = new_test_map();
    for i in 0..20_u8 {
        map.add(i, char::from(b'a' + i), i.to_string()).unwrap();
    }
    map.retain(|key_a, _, _| key_a % 4 == 1);
    let before = map.to_vec();
    let version = map.version();

    map.shrink_to_fit();
    assert_eq!(map.capacity(), 7);
    assert_eq!(map.to_vec(), before, "order is preserved");
    assert_ne!(map.version(), version, "moving triples is structural");
    map.validate().expect("map is valid");

    // Already compact and minimal.
    let version = map.version();
    map.shrink_to_fit();
    assert_eq!(map.version(), version);

    map.clear();
    map.shrink_to_fit();
    assert_eq!(map.capacity(), 0);
    map.validate().expect("map is valid");
}

#[test]
fn copy_to() {
    let map = two_key_map! {
        comparers = (TestComparer::default(), TestComparer::default());
        1, 'a' => 10,
        2, 'b' => 20,
    };

    let mut dest = vec![Triple::default(); 4];
    map.copy_to(&mut dest, 1).unwrap();
    assert_eq!(dest[0], Triple::default());
    assert_eq!(dest[1..3], map.to_vec());

    let mut small = vec![Triple::default(); 2];
    for index in [1, 2, 3] {
        let error = map.copy_to(&mut small, index).unwrap_err();
        assert!(
            matches!(error, TwoKeyError::InvalidArgument(_)),
            "index {index}: unexpected error {error}"
        );
    }
    assert_eq!(small, vec![Triple::default(); 2], "nothing is written");

    // An empty map fits anywhere up to the end.
    let empty = new_map::<i32, char, i32>();
    empty.copy_to(&mut small, 2).unwrap();
}

#[test]
fn test_extend() {
    let mut map = new_test_map();
    let triples = vec![
        TestTriple::new(1, 'a', "x"),
        TestTriple::new(2, 'b', "y"),
        TestTriple::new(3, 'c', "z"),
        TestTriple::new(1, 'c', "overwrote a-key 1 and b-key 'c'"),
        TestTriple::new(4, 'b', "overwrote b-key 'b'"),
        TestTriple::new(5, 'x', "new"),
    ];
    map.extend(triples.into_iter().map(TestTriple::into_triple));

    assert_eq!(
        sorted_triples(&map),
        vec![
            TestTriple::new(1, 'c', "overwrote a-key 1 and b-key 'c'"),
            TestTriple::new(4, 'b', "overwrote b-key 'b'"),
            TestTriple::new(5, 'x', "new"),
        ]
    );
    map.validate().expect("map is valid");
}

#[test]
fn test_insert_overwrite() {
    let mut map = new_test_map();

    let removed = map.insert_overwrite(20, 'a', "v".to_owned());
    assert_eq!(removed, Vec::new());

    // Same keys, new value.
    let removed = map.insert_overwrite(20, 'a', "w".to_owned());
    assert_eq!(removed, vec![Triple::new(20, 'a', "v".to_owned())]);

    // Collides with two different triples: A-key match first.
    map.add(30, 'b', "x".to_owned()).unwrap();
    let removed = map.insert_overwrite(30, 'a', "y".to_owned());
    assert_eq!(
        removed,
        vec![
            Triple::new(30, 'b', "x".to_owned()),
            Triple::new(20, 'a', "w".to_owned()),
        ]
    );
    assert_eq!(map.len(), 1);

    map.validate().expect("map is valid");
}

#[test]
fn custom_comparers() {
    let mut map = TwoKeyMap::with_comparers(CaseInsensitive, TestComparer::default());
    map.add("Fern".to_owned(), 48, 0xFF71BC78_u32).unwrap();

    assert_eq!(map.get_a("FERN"), Some(&0xFF71BC78));
    assert!(map.contains_key_a("fern"));
    let error = map.add("fERN".to_owned(), 49, 0).unwrap_err();
    assert_eq!(error.kind(), KeyKind::A);

    // Lookups by B-key are unaffected.
    assert_eq!(map.key_a_for(&48).map(String::as_str), Some("Fern"));
    map.validate().expect("map is valid");
}

#[test]
fn copy_under_new_comparers() {
    let mut exact = new_map();
    exact.add("Fern".to_owned(), 48, 0xFF71BC78_u32).unwrap();
    exact.add("Shadow".to_owned(), 30, 0xFF8A795D).unwrap();
    exact.remove_a("Fern");
    exact.add("Sepia".to_owned(), 11, 0xFFA5694F).unwrap();

    let folded = TwoKeyMap::from_map_with_comparers(
        &exact,
        CaseInsensitive,
        TestComparer::default(),
    )
    .unwrap();
    assert_eq!(folded.len(), 2);
    assert_eq!(folded.get_a("SEPIA"), Some(&0xFFA5694F));
    assert!(folded.iter().eq(exact.iter()), "iteration order is kept");
    assert_eq!(exact.len(), 2, "source is untouched");
    folded.validate().expect("map is valid");

    // Keys that were distinct before can collide under the new comparers.
    exact.add("SHADOW".to_owned(), 31, 0).unwrap();
    let error = TwoKeyMap::from_map_with_comparers(
        &exact,
        CaseInsensitive,
        TestComparer::default(),
    )
    .unwrap_err();
    assert_eq!(error.kind(), KeyKind::A);
    assert_eq!(error.new_triple().key_a(), "SHADOW");
}

#[test]
fn colliding_hashes_share_one_chain() {
    let mut map = TwoKeyMap::with_comparers(Colliding, Colliding);
    for i in 0..50_u32 {
        map.add(i, u64::from(i) + 1000, i).unwrap();
    }
    for i in (0..50_u32).step_by(3) {
        assert!(map.remove_b(&(u64::from(i) + 1000)));
    }
    for i in 0..50_u32 {
        assert_eq!(map.contains_key_a(&i), i % 3 != 0, "key {i}");
    }
    map.validate().expect("map is valid");
}

#[test]
fn panicking_comparer_leaves_map_intact() {
    let mut map = TwoKeyMap::with_comparers(
        Poisoned::new("Abyss".to_owned()),
        TestComparer::default(),
    );
    map.add("AbaloneShell".to_owned(), 0, 0xFFDBC7BD_u32).unwrap();
    map.add("AbbeyWhite".to_owned(), 1, 0xFFECE5D0).unwrap();
    let version = map.version();

    let result = catch_panic(|| map.add("Abyss".to_owned(), 2, 0xFFE0E6EB));
    assert!(result.is_none(), "the comparer panicked");

    assert_eq!(map.len(), 2);
    assert_eq!(map.version(), version);
    assert!(!map.contains_key_b(&2));
    map.validate().expect("map is valid after a panic");

    map.comparer_a().disarm();
    map.add("Abyss".to_owned(), 2, 0xFFE0E6EB).unwrap();
    assert_eq!(map.len(), 3);
    map.validate().expect("map is valid");
}

#[test]
fn rehash_keeps_everything_reachable() {
    let mut map = new_test_map();
    for i in 0..30_u8 {
        map.add(i, char::from(b'0' + i), i.to_string()).unwrap();
    }
    let version = map.version();
    map.rehash();
    assert_eq!(map.version(), version);
    for i in 0..30_u8 {
        assert_eq!(map.get_b(&char::from(b'0' + i)), Some(&i.to_string()));
    }
    map.validate().expect("map is valid");
}

#[test]
fn into_iter_and_iter_mut() {
    let mut map = new_test_map();
    map.add(1, 'a', "x".to_owned()).unwrap();
    map.add(2, 'b', "y".to_owned()).unwrap();

    for (_, key_b, value) in &mut map {
        value.push(*key_b);
    }
    assert_eq!(map.iter().len(), 2);

    let triples: Vec<_> =
        map.into_iter().map(Triple::into_parts).collect();
    assert_eq!(
        triples,
        [(1, 'a', "xa".to_owned()), (2, 'b', "yb".to_owned())]
    );
}

#[derive(Debug, Arbitrary)]
enum Operation {
    // Make adds a bit more common to try and fill up the map.
    #[weight(4)]
    Add(TestTriple),
    #[weight(2)]
    InsertOverwrite(TestTriple),
    GetA(u8),
    GetB(char),
    SetA(u8, String),
    SetB(char, String),
    RemoveA(u8),
    RemoveB(char),
    RemoveTriple(TestTriple),
    Retain(u8),
    Clear,
    ShrinkToFit,
}

#[proptest(cases = 16)]
fn proptest_ops(
    #[strategy(prop::collection::vec(any::<Operation>(), 0..1024))] ops: Vec<
        Operation,
    >,
) {
    let mut map = new_test_map();
    let mut naive_map = NaiveMap::new();

    for op in ops {
        let version = map.version();
        let mut structural = false;

        match op {
            Operation::Add(triple) => {
                let map_res = map.add_triple(triple.clone().into_triple());
                let naive_res = naive_map.add(triple.clone());

                match (map_res, naive_res) {
                    (Ok(()), Ok(())) => structural = true,
                    (Err(map_err), Err(naive_kind)) => {
                        assert_eq!(map_err.kind(), naive_kind);
                        assert_eq!(triple, map_err.into_triple());
                    }
                    (map_res, naive_res) => panic!(
                        "map and naive map disagree on add: \
                         {map_res:?} vs {naive_res:?}"
                    ),
                }
            }
            Operation::InsertOverwrite(triple) => {
                let map_dups: Vec<TestTriple> = map
                    .insert_overwrite(triple.key_a, triple.key_b, triple.value.clone())
                    .iter()
                    .map(TestTriple::from)
                    .collect();
                let naive_dups = naive_map.insert_overwrite(triple);
                assert_eq!(map_dups, naive_dups);
                structural = true;
            }
            Operation::GetA(key_a) => {
                let map_res = map.get_triple_a(&key_a).map(TestTriple::from);
                assert_eq!(map_res.as_ref(), naive_map.get_a(key_a));
            }
            Operation::GetB(key_b) => {
                let map_res = map.get_triple_b(&key_b).map(TestTriple::from);
                assert_eq!(map_res.as_ref(), naive_map.get_b(key_b));
            }
            Operation::SetA(key_a, value) => {
                let map_res = map.set_a(&key_a, value.clone()).ok();
                assert_eq!(map_res, naive_map.set_a(key_a, value));
            }
            Operation::SetB(key_b, value) => {
                let map_res = map.set_b(&key_b, value.clone()).ok();
                assert_eq!(map_res, naive_map.set_b(key_b, value));
            }
            Operation::RemoveA(key_a) => {
                let map_res = map.take_a(&key_a).map(|t| TestTriple::from(&t));
                let naive_res = naive_map.remove_a(key_a);
                structural = naive_res.is_some();
                assert_eq!(map_res, naive_res);
            }
            Operation::RemoveB(key_b) => {
                let map_res = map.take_b(&key_b).map(|t| TestTriple::from(&t));
                let naive_res = naive_map.remove_b(key_b);
                structural = naive_res.is_some();
                assert_eq!(map_res, naive_res);
            }
            Operation::RemoveTriple(triple) => {
                let map_res = map.remove_triple(&triple.clone().into_triple());
                let naive_res = naive_map.remove_triple(&triple);
                structural = naive_res;
                assert_eq!(map_res, naive_res);
            }
            Operation::Retain(modulus) => {
                let keep = |key_a: u8| key_a % 4 != modulus % 4;
                let len = naive_map.len();
                map.retain(|key_a, _, _| keep(*key_a));
                naive_map.retain(|triple| keep(triple.key_a));
                structural = naive_map.len() != len;
            }
            Operation::Clear => {
                structural = !naive_map.is_empty();
                map.clear();
                naive_map.clear();
            }
            Operation::ShrinkToFit => {
                let before = map.to_vec();
                map.shrink_to_fit();
                assert_eq!(map.to_vec(), before, "shrinking keeps order");
                assert!(map.capacity() >= map.len());
                // Free slots aren't observable from here, so accept either
                // outcome.
                structural = map.version() != version;
            }
        }

        assert_eq!(
            map.version() != version,
            structural,
            "version changes exactly on structural modification"
        );
        map.validate().expect("map should be valid");
        assert_eq!(map.len(), naive_map.len());
        assert_eq!(sorted_triples(&map), naive_map.sorted());
    }
}

#[proptest(cases = 64)]
fn proptest_permutation_eq(
    triples: Vec<TestTriple>,
    #[strategy(0..64_usize)] rotate: usize,
) {
    // Keep only the triples that can coexist.
    let mut naive_map = NaiveMap::new();
    for triple in triples {
        let _ = naive_map.add(triple);
    }
    let triples: Vec<_> = naive_map.iter().cloned().collect();

    let mut permuted = triples.clone();
    permuted.reverse();
    if !permuted.is_empty() {
        let mid = rotate % permuted.len();
        permuted.rotate_left(mid);
    }

    let mut map1 = new_test_map();
    let mut map2 = new_test_map();
    for triple in triples {
        map1.add_triple(triple.into_triple()).unwrap();
    }
    for triple in permuted {
        map2.add_triple(triple.into_triple()).unwrap();
    }

    assert_eq_props(map1, map2);
}

// Mutations are hard to capture in a proptest, so non-equality is checked
// with examples.
#[test]
fn test_permutation_eq_examples() {
    let mut map1 = new_test_map();
    let mut map2 = new_test_map();

    // Two empty maps are equal.
    assert_eq!(map1, map2);

    let triple = TestTriple::new(0, 'a', "v");
    map1.add_triple(triple.clone().into_triple()).unwrap();
    assert_ne_props(&map1, &map2);

    map2.add_triple(triple.into_triple()).unwrap();
    assert_eq_props(&map1, &map2);

    {
        // Same B-key and value, different A-key.
        let mut map1 = map1.clone();
        map1.add(1, 'b', "x".to_owned()).unwrap();
        let mut map2 = map2.clone();
        map2.add(2, 'b', "x".to_owned()).unwrap();
        assert_ne_props(&map1, &map2);
    }

    {
        // Same A-key and value, different B-key.
        let mut map1 = map1.clone();
        map1.add(1, 'b', "x".to_owned()).unwrap();
        let mut map2 = map2.clone();
        map2.add(1, 'c', "x".to_owned()).unwrap();
        assert_ne_props(&map1, &map2);
    }

    {
        // Same keys, different value.
        let mut map1 = map1.clone();
        map1.add(1, 'b', "x".to_owned()).unwrap();
        let mut map2 = map2.clone();
        map2.add(1, 'b', "y".to_owned()).unwrap();
        assert_ne_props(&map1, &map2);
    }

    {
        // The keys are paired differently.
        let mut map1 = map1.clone();
        map1.add(1, 'b', "x".to_owned()).unwrap();
        map1.add(2, 'c', "x".to_owned()).unwrap();
        let mut map2 = map2.clone();
        map2.add(1, 'c', "x".to_owned()).unwrap();
        map2.add(2, 'b', "x".to_owned()).unwrap();
        assert_ne_props(&map1, &map2);
    }

    {
        // Removing and re-adding moves the triple to another slot, but the
        // maps stay equal.
        let mut map1 = map1.clone();
        map1.add(1, 'b', "x".to_owned()).unwrap();
        map1.add(2, 'c', "y".to_owned()).unwrap();
        map1.remove_a(&0);
        map1.add(0, 'a', "v".to_owned()).unwrap();
        let mut map2 = map2.clone();
        map2.add(1, 'b', "x".to_owned()).unwrap();
        map2.add(2, 'c', "y".to_owned()).unwrap();
        assert_eq_props(&map1, &map2);
    }
}

mod macro_tests {
    use super::*;

    #[cfg(feature = "default-hasher")]
    #[test]
    fn macro_basic() {
        let map = two_key_map! {
            "Alice", 1 => "admin",
            "Bob", 2 => "user",
        };

        assert_eq!(map.len(), 2);
        assert_eq!(map.get_a("Alice"), Some(&"admin"));
        assert_eq!(map.get_b(&2), Some(&"user"));
    }

    #[test]
    fn macro_with_comparers() {
        let map = two_key_map! {
            comparers = (CaseInsensitive, TestComparer::default());
            "Charlie".to_owned(), 3 => 'c',
            "David".to_owned(), 4 => 'd'
        };

        assert_eq!(map.len(), 2);
        assert_eq!(map.get_a("charlie"), Some(&'c'));
        assert_eq!(map.key_a_for(&4).map(String::as_str), Some("David"));
    }

    #[cfg(feature = "default-hasher")]
    #[test]
    fn macro_empty() {
        let empty_map: TwoKeyMap<u8, u8, u8> = two_key_map! {};
        assert!(empty_map.is_empty());
        assert_eq!(empty_map.capacity(), 0);
    }

    #[cfg(feature = "default-hasher")]
    #[test]
    #[should_panic(expected = "two_key_map! literal has a duplicate A-key")]
    fn macro_duplicate_key_a() {
        let _map = two_key_map! {
            "Alice", 1 => (),
            "Alice", 2 => (),
        };
    }

    #[test]
    #[should_panic(expected = "two_key_map! literal has a duplicate B-key")]
    fn macro_duplicate_key_b() {
        let _map = two_key_map! {
            comparers = (TestComparer::default(), TestComparer::default());
            "Alice", 1 => (),
            "Bob", 1 => (),
        };
    }
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;
    use twokey_test_utils::{
        serde_utils::assert_serialize_roundtrip, test_triple::TestMap,
    };

    #[proptest]
    fn proptest_serialize_roundtrip(values: Vec<TestTriple>) {
        assert_serialize_roundtrip(values);
    }

    #[test]
    fn persisted_form() {
        let mut map = new_test_map();
        map.add(7, 'q', "seven".to_owned()).unwrap();
        map.add(8, 'r', "eight".to_owned()).unwrap();
        map.remove_a(&7);

        let serialized = serde_json::to_value(&map).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({
                "version": 3,
                "capacity": 3,
                "triples": [{ "key_a": 8, "key_b": "r", "value": "eight" }],
            })
        );
    }

    #[test]
    fn triples_deserialize_from_sequences() {
        let map: TestMap = serde_json::from_str(
            r#"{"version": 41, "triples": [[1, "a", "x"], {"value": "y", "key_b": "b", "key_a": 2}]}"#,
        )
        .unwrap();
        assert_eq!(map.version(), 41);
        assert_eq!(map.get_a(&1).map(String::as_str), Some("x"));
        assert_eq!(map.get_b(&'b').map(String::as_str), Some("y"));
        map.validate().expect("map is valid");
    }

    #[test]
    fn deserialize_errors() {
        let expect_error = |json: &str, expected: TwoKeyError| {
            let error = serde_json::from_str::<TestMap>(json).unwrap_err();
            let message = error.to_string();
            assert!(
                message.starts_with(&expected.to_string()),
                "for {json}: expected {expected}, got {message}"
            );
        };

        expect_error(
            r#"{"version": 1}"#,
            TwoKeyError::MissingData("the triples field"),
        );
        expect_error(
            r#"{"triples": [{"key_b": "a", "value": "x"}]}"#,
            TwoKeyError::NullKey(Some(KeyKind::A)),
        );
        expect_error(
            r#"[{"key_a": 1, "value": "x"}]"#,
            TwoKeyError::NullKey(Some(KeyKind::B)),
        );
        expect_error(
            r#"[[1, "a"]]"#,
            TwoKeyError::MissingData("a triple value"),
        );
        expect_error(
            r#"[[1, "a", "x"], [2, "a", "y"]]"#,
            TwoKeyError::DuplicateKey(KeyKind::B),
        );
    }

    #[test]
    fn stored_capacity_is_only_a_hint() {
        // A huge stored capacity must not be honored for a tiny document.
        let map: TestMap = serde_json::from_str(
            r#"{"version": 0, "capacity": 2000000000, "triples": []}"#,
        )
        .unwrap();
        assert!(map.is_empty());
        assert!(map.capacity() <= 1103, "capacity {}", map.capacity());
        map.validate().expect("map is valid");

        let map: TestMap = serde_json::from_str(&format!(
            r#"{{"capacity": {MAX_PRIME_CAPACITY}, "triples": [[1, "a", "x"]]}}"#,
        ))
        .unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.capacity() <= 1103, "capacity {}", map.capacity());

        // Small stored capacities survive, even well above the length.
        let map: TestMap = serde_json::from_str(
            r#"{"capacity": 37, "triples": [[1, "a", "x"]]}"#,
        )
        .unwrap();
        assert_eq!(map.capacity(), 37);
        map.validate().expect("map is valid");
    }

    #[test]
    fn deserialize_with_comparers() {
        let json = r#"[["Fern", 48, 1], ["FERN", 49, 2]]"#;

        // Distinct under exact comparison.
        let map = TwoKeyMap::<String, u16, u32, _, _>::deserialize_with_comparers(
            &mut serde_json::Deserializer::from_str(json),
            TestComparer::default(),
            TestComparer::default(),
        )
        .unwrap();
        assert_eq!(map.len(), 2);

        // Duplicates once case is ignored.
        let error =
            TwoKeyMap::<String, u16, u32, _, _>::deserialize_with_comparers(
                &mut serde_json::Deserializer::from_str(json),
                CaseInsensitive,
                TestComparer::default(),
            )
            .unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("an entry with the same A-key already exists"),
            "unexpected error: {error}"
        );
    }
}

#[cfg(feature = "proptest")]
#[proptest(cases = 16)]
fn proptest_arbitrary_map(map: twokey_test_utils::test_triple::TestMap) {
    // The generated map is valid.
    map.validate().expect("map should be valid");

    let len = map.len();
    assert_eq!(map.is_empty(), len == 0);

    // Each triple can be found by both keys.
    let mut count = 0;
    for triple in &map {
        count += 1;
        assert_eq!(map.get_triple_a(triple.key_a()), Some(triple));
        assert_eq!(map.get_triple_b(triple.key_b()), Some(triple));
    }
    assert_eq!(count, len);
}
