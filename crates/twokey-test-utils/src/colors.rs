//! A small table of named colors, used as realistic fixture data.

use crate::test_triple::TestComparer;
use twokey::{KeyComparer, TwoKeyMap};

/// A named color: its name is the A-key, its id the B-key and its ARGB
/// value the value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KnownColor {
    pub name: &'static str,
    pub id: i32,
    pub argb: u32,
}

impl KnownColor {
    const fn new(name: &'static str, id: i32, argb: u32) -> Self {
        Self { name, id, argb }
    }
}

pub const KNOWN_EXTENDED_COLORS: [KnownColor; 13] = [
    KnownColor::new("AbaloneShell", 0, 0xFFDBC7BD),
    KnownColor::new("AbbeyWhite", 1, 0xFFECE5D0),
    KnownColor::new("Abyss", 2, 0xFFE0E6EB),
    KnownColor::new("AcaciaHaze", 3, 0xFF969C92),
    KnownColor::new("Acanthus", 4, 0xFFCDCDB4),
    KnownColor::new("AcapulcoCliffs", 5, 0xFF4B99A9),
    KnownColor::new("Acceleration", 6, 0xFF8092A3),
    KnownColor::new("AccessibleBeige", 7, 0xFFD1C7B8),
    KnownColor::new("Accolade", 8, 0xFFF2EEE2),
    KnownColor::new("Acier", 9, 0xFF9E9991),
    KnownColor::new("AcornSquash", 10, 0xFFFFDF37),
    KnownColor::new("AdaptiveShade", 11, 0xFF867E70),
    KnownColor::new("Admiralty", 12, 0xFF404D62),
];

/// A map from color names and ids to ARGB values.
pub type ColorMap<CA = TestComparer, CB = TestComparer> =
    TwoKeyMap<String, i32, u32, CA, CB>;

/// Returns a map loaded with the first `size` known colors.
///
/// # Panics
///
/// Panics if `size` is larger than the table.
pub fn loaded_map(size: usize) -> ColorMap {
    loaded_map_with(size, TestComparer::default(), TestComparer::default())
}

/// Returns a map loaded with the first `size` known colors, using the given
/// comparers.
pub fn loaded_map_with<CA, CB>(
    size: usize,
    comparer_a: CA,
    comparer_b: CB,
) -> ColorMap<CA, CB>
where
    CA: KeyComparer<String>,
    CB: KeyComparer<i32>,
{
    let mut map = TwoKeyMap::with_comparers(comparer_a, comparer_b);
    for color in &KNOWN_EXTENDED_COLORS[..size] {
        map.add(color.name.to_owned(), color.id, color.argb)
            .unwrap_or_else(|error| {
                panic!("known colors are unique, but got {}", error.kind())
            });
    }
    map
}
