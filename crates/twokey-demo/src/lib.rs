//! A small demo of [`TwoKeyMap`]: Crayola crayons, addressable by name or
//! by crayon.

use std::{fmt, io};
use twokey::{TwoKeyError, TwoKeyMap};

mod crayons;

pub use crayons::Crayon;

/// Crayon name, crayon, and ARGB hex color.
pub type CrayonMap = TwoKeyMap<String, Crayon, String>;

/// Errors reported by the demo.
#[derive(Debug)]
pub enum DemoError {
    /// Writing output failed.
    Io(io::Error),
    /// A map operation failed.
    Map(TwoKeyError),
    /// A lookup key matched neither a name nor a crayon index.
    UnknownCrayon(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Io(error) => write!(f, "I/O error: {error}"),
            DemoError::Map(error) => write!(f, "map error: {error}"),
            DemoError::UnknownCrayon(key) => {
                write!(f, "no crayon is named or numbered {key:?}")
            }
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Io(error) => Some(error),
            DemoError::Map(error) => Some(error),
            DemoError::UnknownCrayon(_) => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(error: io::Error) -> Self {
        DemoError::Io(error)
    }
}

impl From<TwoKeyError> for DemoError {
    fn from(error: TwoKeyError) -> Self {
        DemoError::Map(error)
    }
}

/// The ARGB hex color for a crayon: fully opaque, then the RGB digits.
pub fn argb_hex(crayon: Crayon) -> String {
    format!("FF{}", crayon.rgb_hex())
}

/// Loads every crayon into a new map.
pub fn load_crayons() -> Result<CrayonMap, TwoKeyError> {
    let mut map = CrayonMap::try_with_capacity(Crayon::ALL.len())?;
    for &crayon in Crayon::ALL {
        map.add(crayon.name().to_owned(), crayon, argb_hex(crayon))?;
    }
    tracing::debug!(
        len = map.len(),
        capacity = map.capacity(),
        "loaded crayons"
    );
    Ok(map)
}

/// Finds a crayon by name (the A-key) or, failing that, by table index (the
/// B-key).
pub fn lookup<'m>(
    map: &'m CrayonMap,
    key: &str,
) -> Result<(Crayon, &'m str), DemoError> {
    if let Some(triple) = map.get_triple_a(key) {
        return Ok((*triple.key_b(), triple.value().as_str()));
    }
    tracing::debug!(key, "not a crayon name, trying as an index");
    let crayon = key
        .parse::<usize>()
        .ok()
        .and_then(Crayon::from_index)
        .ok_or_else(|| DemoError::UnknownCrayon(key.to_owned()))?;
    let value = map.value_b(&crayon)?;
    Ok((crayon, value.as_str()))
}

/// Writes every crayon, in the map's iteration order.
pub fn write_list(
    out: &mut dyn io::Write,
    map: &CrayonMap,
) -> Result<(), DemoError> {
    let mut cursor = map.cursor();
    while cursor.move_next(map)? {
        let triple = cursor.current(map)?;
        writeln!(
            out,
            "{:>3}  {:<24} {}",
            triple.key_b().index(),
            triple.key_a(),
            triple.value(),
        )?;
    }
    Ok(())
}

/// Walks through lookups by either key, then a cascading removal.
pub fn write_examples(
    out: &mut dyn io::Write,
    map: &mut CrayonMap,
) -> Result<(), DemoError> {
    writeln!(
        out,
        "Loaded {} crayons into TwoKeyMap<String, Crayon, String>.",
        map.len(),
    )?;
    writeln!(
        out,
        "A-key = crayon name, B-key = crayon, value = ARGB hex color.",
    )?;

    writeln!(out)?;
    writeln!(out, "Example 1: look up by A-key.")?;
    for name in ["AntiqueBrass", "Fern"] {
        let value = map.value_a(name)?;
        let index = map
            .key_b_for(name)
            .ok_or(TwoKeyError::KeyNotFound(twokey::KeyKind::A))?
            .index();
        writeln!(
            out,
            "  map.value_a({name:?}) == {value} (crayon index {index})",
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Example 2: look up by B-key.")?;
    for crayon in [Crayon::Fern, Crayon::AntiqueBrass] {
        let value = map.value_b(&crayon)?;
        writeln!(
            out,
            "  map.value_b(&Crayon::{crayon}) == {value} (crayon index {})",
            crayon.index(),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Example 3: remove by A-key.")?;
    let removed = map.remove_a("Bittersweet");
    writeln!(out, "  map.remove_a(\"Bittersweet\") == {removed}")?;
    writeln!(
        out,
        "  map.contains_key_a(\"Bittersweet\") == {}",
        map.contains_key_a("Bittersweet"),
    )?;
    writeln!(
        out,
        "  map.contains_key_b(&Crayon::Bittersweet) == {}",
        map.contains_key_b(&Crayon::Bittersweet),
    )?;
    writeln!(out, "  map.len() == {}", map.len())?;
    Ok(())
}
