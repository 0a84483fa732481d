//! Detached, version-checked enumeration.
//!
//! A [`Cursor`] remembers a position in a [`TwoKeyMap`] without borrowing
//! it. Every call takes the map as an argument and first checks that the
//! map has not been structurally modified since the cursor was created.

use super::TwoKeyMap;
use crate::{support::arena::SlotHandle, Triple, TwoKeyError};
use core::{fmt, marker::PhantomData};

/// Selects which part of each triple a [`Cursor`] or a
/// [`Projected`](super::Projected) iterator yields.
///
/// This trait is sealed; the implementors are [`Triples`], [`KeyA`],
/// [`KeyB`] and [`Value`].
pub trait Projection: private::Sealed {
    /// The projected item.
    type Output<'a, A: 'a, B: 'a, V: 'a>;

    #[doc(hidden)]
    fn project<'a, A, B, V>(
        triple: &'a Triple<A, B, V>,
    ) -> Self::Output<'a, A, B, V>;
}

/// Yields whole triples.
#[derive(Clone, Copy, Debug)]
pub enum Triples {}

/// Yields A-keys.
#[derive(Clone, Copy, Debug)]
pub enum KeyA {}

/// Yields B-keys.
#[derive(Clone, Copy, Debug)]
pub enum KeyB {}

/// Yields values.
#[derive(Clone, Copy, Debug)]
pub enum Value {}

impl Projection for Triples {
    type Output<'a, A: 'a, B: 'a, V: 'a> = &'a Triple<A, B, V>;

    #[inline]
    fn project<'a, A, B, V>(
        triple: &'a Triple<A, B, V>,
    ) -> Self::Output<'a, A, B, V> {
        triple
    }
}

impl Projection for KeyA {
    type Output<'a, A: 'a, B: 'a, V: 'a> = &'a A;

    #[inline]
    fn project<'a, A, B, V>(
        triple: &'a Triple<A, B, V>,
    ) -> Self::Output<'a, A, B, V> {
        triple.key_a()
    }
}

impl Projection for KeyB {
    type Output<'a, A: 'a, B: 'a, V: 'a> = &'a B;

    #[inline]
    fn project<'a, A, B, V>(
        triple: &'a Triple<A, B, V>,
    ) -> Self::Output<'a, A, B, V> {
        triple.key_b()
    }
}

impl Projection for Value {
    type Output<'a, A: 'a, B: 'a, V: 'a> = &'a V;

    #[inline]
    fn project<'a, A, B, V>(
        triple: &'a Triple<A, B, V>,
    ) -> Self::Output<'a, A, B, V> {
        triple.value()
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Triples {}
    impl Sealed for super::KeyA {}
    impl Sealed for super::KeyB {}
    impl Sealed for super::Value {}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Position {
    BeforeStart,
    At(SlotHandle),
    Finished,
}

/// A restartable cursor over a [`TwoKeyMap`] that fails fast once the map is
/// structurally modified.
///
/// The cursor snapshots the map's [version](TwoKeyMap::version) when it is
/// created. [`move_next`](Self::move_next) and [`current`](Self::current)
/// compare that snapshot against the map they are given, and return
/// [`TwoKeyError::ConcurrentModification`] on mismatch. Replacing values
/// does not count as a modification.
///
/// [`reset`](Self::reset) rewinds the position but keeps the snapshot, so a
/// cursor invalidated by a mutation stays invalid.
///
/// A cursor must only be used with the map (or view's map) that created it.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use twokey::{TwoKeyError, TwoKeyMap};
///
/// let mut map = TwoKeyMap::new();
/// map.add("a", 1, 'x').unwrap();
/// map.add("b", 2, 'y').unwrap();
///
/// let mut cursor = map.cursor();
/// assert_eq!(cursor.move_next(&map), Ok(true));
/// assert_eq!(cursor.current(&map).unwrap().key_a(), &"a");
///
/// map.add("c", 3, 'z').unwrap();
/// assert_eq!(cursor.move_next(&map), Err(TwoKeyError::ConcurrentModification));
/// # }
/// ```
pub struct Cursor<P: Projection = Triples> {
    version: u64,
    // The next physical slot to examine.
    next_slot: usize,
    position: Position,
    _projection: PhantomData<fn() -> P>,
}

impl<P: Projection> Clone for Cursor<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Projection> Copy for Cursor<P> {}

impl<P: Projection> fmt::Debug for Cursor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("version", &self.version)
            .field("next_slot", &self.next_slot)
            .field("position", &self.position)
            .finish()
    }
}

impl<P: Projection> Cursor<P> {
    pub(super) fn new(version: u64) -> Self {
        Self {
            version,
            next_slot: 0,
            position: Position::BeforeStart,
            _projection: PhantomData,
        }
    }

    /// Returns the map version this cursor was created against.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Advances to the next triple. Returns `Ok(false)` once the end is
    /// reached, and keeps returning it until [`reset`](Self::reset).
    pub fn move_next<A, B, V, CA, CB>(
        &mut self,
        map: &TwoKeyMap<A, B, V, CA, CB>,
    ) -> Result<bool, TwoKeyError> {
        self.check_version(map)?;
        if self.position == Position::Finished {
            return Ok(false);
        }
        match map.arena.next_occupied(self.next_slot) {
            Some(handle) => {
                self.next_slot = handle.index().get() + 1;
                self.position = Position::At(handle);
                Ok(true)
            }
            None => {
                self.next_slot = map.arena.high_water();
                self.position = Position::Finished;
                Ok(false)
            }
        }
    }

    /// Returns the item at the cursor.
    ///
    /// Fails with [`TwoKeyError::InvalidOperation`] before the first
    /// [`move_next`](Self::move_next) and after the end.
    pub fn current<'m, A, B, V, CA, CB>(
        &self,
        map: &'m TwoKeyMap<A, B, V, CA, CB>,
    ) -> Result<P::Output<'m, A, B, V>, TwoKeyError> {
        self.check_version(map)?;
        match self.position {
            Position::BeforeStart => Err(TwoKeyError::invalid_operation(
                "enumeration has not started; call move_next first",
            )),
            Position::Finished => Err(TwoKeyError::invalid_operation(
                "enumeration already finished",
            )),
            Position::At(handle) => map
                .arena
                .get_by_handle(handle)
                .map(|triple| P::project(triple))
                .ok_or(TwoKeyError::ConcurrentModification),
        }
    }

    /// Rewinds to before the first triple.
    ///
    /// The version snapshot is kept: a cursor that was invalidated stays
    /// invalid.
    pub fn reset(&mut self) {
        self.next_slot = 0;
        self.position = Position::BeforeStart;
    }

    fn check_version<A, B, V, CA, CB>(
        &self,
        map: &TwoKeyMap<A, B, V, CA, CB>,
    ) -> Result<(), TwoKeyError> {
        if map.version != self.version {
            return Err(TwoKeyError::ConcurrentModification);
        }
        Ok(())
    }
}
