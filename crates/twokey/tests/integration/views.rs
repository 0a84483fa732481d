use twokey::{
    Enumerable, KeyKind, KeyLookup, MutableContainer, Triple, TwoKeyError,
};
use twokey_test_utils::colors::{loaded_map, KNOWN_EXTENDED_COLORS};

#[test]
fn views_track_the_map() {
    let map = loaded_map(11);
    assert_eq!(map.keys_a().len(), 11);
    assert_eq!(map.keys_b().len(), 11);
    assert_eq!(map.values().len(), 11);

    let mut map = map;
    map.add("AdaptiveShade".to_owned(), 11, 0xFF867E70).unwrap();
    map.add("Admiralty".to_owned(), 12, 0xFF404D62).unwrap();
    assert_eq!(map.keys_a().len(), 13);
    assert_eq!(map.keys_b().len(), 13);
    assert_eq!(map.values().len(), 13);

    let ids: Vec<i32> = map.keys_b().iter().copied().collect();
    assert_eq!(ids, (0..13).collect::<Vec<_>>());
    assert!(map
        .values()
        .into_iter()
        .eq(KNOWN_EXTENDED_COLORS.iter().map(|c| &c.argb)));

    let empty = loaded_map(0);
    assert!(empty.keys_a().is_empty());
    assert_eq!(empty.values().iter().next(), None);
}

#[test]
fn view_contains_and_lookup() {
    let map = loaded_map(13);

    assert!(map.keys_a().contains("Acier"));
    assert!(!map.keys_a().contains("Zinc"));
    assert!(map.keys_b().contains(&12));
    assert!(!map.keys_b().contains(&13));
    assert!(map.values().contains(&0xFFFFDF37));
    assert!(!map.values().contains(&0));

    let keys_a = map.keys_a();
    assert!(KeyLookup::<str, u32>::contains_key(&keys_a, "Acier"));
    assert_eq!(KeyLookup::<str, u32>::lookup(&keys_a, "Acier"), Some(&0xFF9E9991));
    let keys_b = map.keys_b();
    assert_eq!(keys_b.lookup(&6), Some(&0xFF8092A3));
    assert_eq!(keys_b.lookup(&60), None);
}

#[test]
fn views_are_read_only() {
    let map = loaded_map(3);

    let mut keys_a = map.keys_a();
    assert!(keys_a.is_read_only());
    assert!(matches!(
        keys_a.insert_item("Abyss".to_owned()),
        Err(TwoKeyError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        keys_a.remove_item(&"Abyss".to_owned()),
        Err(TwoKeyError::UnsupportedOperation(_))
    ));

    let mut keys_b = map.keys_b();
    assert!(matches!(
        keys_b.clear_items(),
        Err(TwoKeyError::UnsupportedOperation(_))
    ));

    let mut values = map.values();
    let error = values.insert_item(0).unwrap_err();
    assert_eq!(
        error.to_string(),
        "unsupported operation: cannot add to the value view of a map"
    );

    // Nothing changed.
    assert_eq!(map.len(), 3);
}

#[test]
fn view_copy_to() {
    let map = loaded_map(4);

    let mut ids = [-1; 6];
    map.keys_b().copy_to(&mut ids, 2).unwrap();
    assert_eq!(ids, [-1, -1, 0, 1, 2, 3]);

    let mut names = vec![String::new(); 3];
    let error = map.keys_a().copy_to(&mut names, 0).unwrap_err();
    assert!(matches!(error, TwoKeyError::InvalidArgument(_)), "{error}");
    let error = map.values().copy_to(&mut [0; 8], 9).unwrap_err();
    assert!(matches!(error, TwoKeyError::InvalidArgument(_)), "{error}");

    // Through the trait, generically.
    fn total<E: Enumerable<u32>>(e: &E) -> u64 {
        e.items().map(|&v| u64::from(v)).sum()
    }
    let expected: u64 =
        KNOWN_EXTENDED_COLORS[..4].iter().map(|c| u64::from(c.argb)).sum();
    assert_eq!(total(&map.values()), expected);
}

#[test]
fn map_as_mutable_container() {
    let mut map = loaded_map(2);
    assert!(!map.is_read_only());

    let error = map
        .insert_item(Triple::new("Abyss".to_owned(), 1, 0xFFE0E6EB))
        .unwrap_err();
    assert_eq!(error, TwoKeyError::DuplicateKey(KeyKind::B));

    map.insert_item(Triple::new("Abyss".to_owned(), 2, 0xFFE0E6EB)).unwrap();
    assert_eq!(Enumerable::len(&map), 3);

    let abyss = Triple::new("Abyss".to_owned(), 2, 0xFFE0E6EB);
    assert_eq!(map.remove_item(&abyss), Ok(true));
    assert_eq!(map.remove_item(&abyss), Ok(false));

    map.clear_items().unwrap();
    assert!(map.is_empty());
}

#[test]
fn view_debug() {
    let map = loaded_map(2);
    assert_eq!(
        format!("{:?}", map.keys_a()),
        r#"["AbaloneShell", "AbbeyWhite"]"#
    );
    assert_eq!(format!("{:?}", map.keys_b()), "[0, 1]");
}
