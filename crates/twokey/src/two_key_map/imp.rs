use super::{
    cursor::{Cursor, Triples},
    tables::TwoKeyTables,
    Drain, IntoIter, Iter, IterMut, KeysA, KeysB, Values,
};
use crate::{
    capability::{Enumerable, MutableContainer},
    errors::{DuplicateKey, KeyKind, TwoKeyError},
    internal::ValidationError,
    macros::trace_event,
    support::{
        arena::{Links, SlotArena, SlotIndex},
        comparer::{HashComparer, KeyComparer},
        fmt_utils::Label,
        primes::{expand_prime, get_prime, MAX_PRIME_CAPACITY},
    },
    Triple,
};
use alloc::{format, vec::Vec};
use core::{borrow::Borrow, fmt};

/// A hash map from two independent keys to one value.
///
/// Every record is a [`Triple`] `(key_a, key_b, value)`. A-keys are unique
/// among A-keys and B-keys are unique among B-keys, and either key finds the
/// record. Removing a record by one key removes the other key with it.
///
/// # Storage
///
/// Triples live in a slot arena. Two chained hash indexes, one per key kind,
/// thread through the same slots, so each value is stored exactly once.
/// Removed slots go onto a free list and are reused, most recently freed
/// first, before the arena grows. The bucket count is always a prime, and
/// grows to the next prime at least twice as large when the arena is full.
///
/// Iteration visits triples in physical slot order. That is insertion order
/// until a triple is removed; after that, new triples fill the freed slots.
///
/// # Comparers
///
/// Each key kind is hashed and compared with its own [`KeyComparer`]. The
/// default, [`HashComparer`], uses the key's [`Hash`](core::hash::Hash) and
/// [`Eq`] impls.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use twokey::{KeyKind, TwoKeyError, TwoKeyMap};
///
/// let mut map = TwoKeyMap::new();
/// map.add(1, "x", "v1").unwrap();
///
/// // "x" is already a B-key.
/// let error = map.add(2, "x", "v2").unwrap_err();
/// assert_eq!(error.kind(), KeyKind::B);
/// assert_eq!(map.len(), 1);
///
/// // Indexer-style access reports missing keys as errors.
/// assert_eq!(map.value_a(&1), Ok(&"v1"));
/// assert_eq!(map.value_a(&2), Err(TwoKeyError::KeyNotFound(KeyKind::A)));
/// # }
/// ```
pub struct TwoKeyMap<A, B, V, CA = HashComparer, CB = HashComparer> {
    pub(super) arena: SlotArena<Triple<A, B, V>>,
    // Invariant: every occupied slot in `arena` is chained exactly once in
    // each table, and no free slot is chained.
    pub(super) tables: TwoKeyTables<CA, CB>,
    // Bumped on every structural change. Cursors compare against it.
    pub(super) version: u64,
}

impl<A: Clone, B: Clone, V: Clone, CA: Clone, CB: Clone> Clone
    for TwoKeyMap<A, B, V, CA, CB>
{
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            tables: self.tables.clone(),
            version: self.version,
        }
    }
}

#[cfg(feature = "default-hasher")]
impl<A, B, V> TwoKeyMap<A, B, V> {
    /// Creates a new, empty `TwoKeyMap`.
    ///
    /// No memory is allocated until the first triple is added.
    #[inline]
    pub fn new() -> Self {
        Self::with_comparers(HashComparer::default(), HashComparer::default())
    }

    /// Creates a new `TwoKeyMap` with room for at least `capacity` triples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_PRIME_CAPACITY`]; see
    /// [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparers(
            capacity,
            HashComparer::default(),
            HashComparer::default(),
        )
    }

    /// Creates a new `TwoKeyMap` with room for at least `capacity` triples,
    /// failing with [`TwoKeyError::InvalidArgument`] if `capacity` exceeds
    /// [`MAX_PRIME_CAPACITY`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TwoKeyError> {
        Self::try_with_capacity_and_comparers(
            capacity,
            HashComparer::default(),
            HashComparer::default(),
        )
    }
}

impl<A, B, V, CA, CB> TwoKeyMap<A, B, V, CA, CB> {
    /// Creates a new, empty `TwoKeyMap` with the given comparers.
    pub const fn with_comparers(comparer_a: CA, comparer_b: CB) -> Self {
        Self {
            arena: SlotArena::new(),
            tables: TwoKeyTables::new(comparer_a, comparer_b),
            version: 0,
        }
    }

    /// Creates a new `TwoKeyMap` with the given capacity and comparers.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_PRIME_CAPACITY`].
    pub fn with_capacity_and_comparers(
        capacity: usize,
        comparer_a: CA,
        comparer_b: CB,
    ) -> Self {
        match Self::try_with_capacity_and_comparers(
            capacity, comparer_a, comparer_b,
        ) {
            Ok(map) => map,
            Err(error) => panic!("{error}"),
        }
    }

    /// Creates a new `TwoKeyMap` with the given capacity and comparers,
    /// failing with [`TwoKeyError::InvalidArgument`] if `capacity` exceeds
    /// [`MAX_PRIME_CAPACITY`].
    pub fn try_with_capacity_and_comparers(
        capacity: usize,
        comparer_a: CA,
        comparer_b: CB,
    ) -> Result<Self, TwoKeyError> {
        let mut map = Self::with_comparers(comparer_a, comparer_b);
        if capacity > 0 {
            map.try_reserve(capacity)?;
        }
        Ok(map)
    }

    /// Returns the comparer used for A-keys.
    #[inline]
    pub fn comparer_a(&self) -> &CA {
        &self.tables.comparer_a
    }

    /// Returns the comparer used for B-keys.
    #[inline]
    pub fn comparer_b(&self) -> &CB {
        &self.tables.comparer_b
    }

    /// Returns the number of triples the map can hold before it next grows.
    ///
    /// This is also the number of buckets in each index, and is always zero
    /// or a prime.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Returns the number of triples in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns the map's version stamp.
    ///
    /// The version changes whenever a triple is added or removed, and on
    /// [`clear`](Self::clear) and [`shrink_to_fit`](Self::shrink_to_fit).
    /// Replacing a value does not change it.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Iterates over the triples in the map, in physical slot order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, A, B, V> {
        Iter::new(&self.arena)
    }

    /// Iterates over the triples in the map, with mutable access to values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, A, B, V> {
        IterMut::new(&mut self.arena)
    }

    /// Returns a detached, version-checked cursor over the triples.
    ///
    /// Unlike [`iter`](Self::iter), a cursor does not borrow the map, so the
    /// map can be mutated while the cursor exists. Once that happens, every
    /// further use of the cursor fails with
    /// [`TwoKeyError::ConcurrentModification`].
    #[inline]
    pub fn cursor(&self) -> Cursor<Triples> {
        Cursor::new(self.version)
    }

    /// Returns a read-only view of the A-keys.
    #[inline]
    pub fn keys_a(&self) -> KeysA<'_, A, B, V, CA, CB> {
        KeysA::new(self)
    }

    /// Returns a read-only view of the B-keys.
    #[inline]
    pub fn keys_b(&self) -> KeysB<'_, A, B, V, CA, CB> {
        KeysB::new(self)
    }

    /// Returns a read-only view of the values.
    #[inline]
    pub fn values(&self) -> Values<'_, A, B, V, CA, CB> {
        Values::new(self)
    }

    /// Copies every triple into `dest`, starting at `index`, in iteration
    /// order.
    ///
    /// Fails with [`TwoKeyError::InvalidArgument`] if `index` is past the end
    /// of `dest` or the triples don't fit. Nothing is written in that case.
    pub fn copy_to(
        &self,
        dest: &mut [Triple<A, B, V>],
        index: usize,
    ) -> Result<(), TwoKeyError>
    where
        A: Clone,
        B: Clone,
        V: Clone,
    {
        Enumerable::copy_to(self, dest, index)
    }

    /// Returns a snapshot of the triples, in iteration order.
    pub fn to_vec(&self) -> Vec<Triple<A, B, V>>
    where
        A: Clone,
        B: Clone,
        V: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns true if the map contains `key_a` as an A-key.
    pub fn contains_key_a<Q>(&self, key_a: &Q) -> bool
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.find_a_index(key_a).is_some()
    }

    /// Returns true if the map contains `key_b` as a B-key.
    pub fn contains_key_b<Q>(&self, key_b: &Q) -> bool
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.find_b_index(key_b).is_some()
    }

    /// Returns true if any triple holds `value`.
    ///
    /// Values are not indexed, so this scans every triple.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|triple| triple.value() == value)
    }

    /// Gets the value for an A-key.
    pub fn get_a<Q>(&self, key_a: &Q) -> Option<&V>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.get_triple_a(key_a).map(Triple::value)
    }

    /// Gets the value for a B-key.
    pub fn get_b<Q>(&self, key_b: &Q) -> Option<&V>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.get_triple_b(key_b).map(Triple::value)
    }

    /// Gets a mutable reference to the value for an A-key.
    pub fn get_a_mut<Q>(&mut self, key_a: &Q) -> Option<&mut V>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        let index = self.find_a_index(key_a)?;
        Some(self.arena.record_mut(index).value_mut())
    }

    /// Gets a mutable reference to the value for a B-key.
    pub fn get_b_mut<Q>(&mut self, key_b: &Q) -> Option<&mut V>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        let index = self.find_b_index(key_b)?;
        Some(self.arena.record_mut(index).value_mut())
    }

    /// Gets the whole triple for an A-key.
    pub fn get_triple_a<Q>(&self, key_a: &Q) -> Option<&Triple<A, B, V>>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        let index = self.find_a_index(key_a)?;
        Some(self.arena.record(index))
    }

    /// Gets the whole triple for a B-key.
    pub fn get_triple_b<Q>(&self, key_b: &Q) -> Option<&Triple<A, B, V>>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        let index = self.find_b_index(key_b)?;
        Some(self.arena.record(index))
    }

    /// Returns the B-key paired with an A-key.
    pub fn key_b_for<Q>(&self, key_a: &Q) -> Option<&B>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.get_triple_a(key_a).map(Triple::key_b)
    }

    /// Returns the A-key paired with a B-key.
    pub fn key_a_for<Q>(&self, key_b: &Q) -> Option<&A>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.get_triple_b(key_b).map(Triple::key_a)
    }

    /// Gets the value for an A-key, failing with
    /// [`TwoKeyError::KeyNotFound`] if it is absent.
    pub fn value_a<Q>(&self, key_a: &Q) -> Result<&V, TwoKeyError>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.get_a(key_a).ok_or(TwoKeyError::KeyNotFound(KeyKind::A))
    }

    /// Gets the value for a B-key, failing with
    /// [`TwoKeyError::KeyNotFound`] if it is absent.
    pub fn value_b<Q>(&self, key_b: &Q) -> Result<&V, TwoKeyError>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.get_b(key_b).ok_or(TwoKeyError::KeyNotFound(KeyKind::B))
    }

    /// Replaces the value for an A-key in place, returning the old value.
    ///
    /// The keys and the triple's position are unchanged, and so is the
    /// map's version. Fails with [`TwoKeyError::KeyNotFound`] if the key is
    /// absent; use [`add`](Self::add) to add new triples.
    pub fn set_a<Q>(&mut self, key_a: &Q, value: V) -> Result<V, TwoKeyError>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        match self.get_a_mut(key_a) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(TwoKeyError::KeyNotFound(KeyKind::A)),
        }
    }

    /// Replaces the value for a B-key in place, returning the old value.
    ///
    /// Fails with [`TwoKeyError::KeyNotFound`] if the key is absent.
    pub fn set_b<Q>(&mut self, key_b: &Q, value: V) -> Result<V, TwoKeyError>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        match self.get_b_mut(key_b) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(TwoKeyError::KeyNotFound(KeyKind::B)),
        }
    }

    /// Removes the triple with the given A-key, along with its B-key.
    ///
    /// Returns false if the key is absent; that is not an error.
    pub fn remove_a<Q>(&mut self, key_a: &Q) -> bool
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.take_a(key_a).is_some()
    }

    /// Removes the triple with the given B-key, along with its A-key.
    ///
    /// Returns false if the key is absent.
    pub fn remove_b<Q>(&mut self, key_b: &Q) -> bool
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.take_b(key_b).is_some()
    }

    /// Removes and returns the triple with the given A-key.
    pub fn take_a<Q>(&mut self, key_a: &Q) -> Option<Triple<A, B, V>>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        let index = self.find_a_index(key_a)?;
        Some(self.remove_at(index))
    }

    /// Removes and returns the triple with the given B-key.
    pub fn take_b<Q>(&mut self, key_b: &Q) -> Option<Triple<A, B, V>>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        let index = self.find_b_index(key_b)?;
        Some(self.remove_at(index))
    }

    /// Keeps only the triples for which `f` returns true.
    ///
    /// `f` may modify values. The version changes once if anything was
    /// removed.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&A, &B, &mut V) -> bool,
    {
        let doomed = self.arena.retain_indexes(|triple| {
            let (key_a, key_b, value) = triple.split_mut();
            f(key_a, key_b, value)
        });
        if doomed.is_empty() {
            return;
        }
        for &index in &doomed {
            self.tables.unlink(&mut self.arena, index);
            self.arena.release(index);
        }
        self.bump_version();
        trace_event!(
            debug,
            removed = doomed.len(),
            len = self.len(),
            "retained triples"
        );
    }

    /// Removes every triple, keeping the allocated capacity.
    ///
    /// The version only changes if the map was non-empty.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        trace_event!(debug, len = self.len(), "clearing map");
        self.arena.clear();
        self.tables.clear();
        self.bump_version();
    }

    /// Removes every triple, returning them in iteration order.
    pub fn drain(&mut self) -> Drain<'_, A, B, V> {
        if !self.is_empty() {
            self.bump_version();
        }
        self.tables.clear();
        Drain::new(self.arena.take_records())
    }

    /// Reserves room for at least `additional` more triples.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity would exceed [`MAX_PRIME_CAPACITY`].
    pub fn reserve(&mut self, additional: usize) {
        if let Err(error) = self.try_reserve(additional) {
            panic!("{error}");
        }
    }

    /// Reserves room for at least `additional` more triples, failing with
    /// [`TwoKeyError::InvalidArgument`] if the new capacity would exceed
    /// [`MAX_PRIME_CAPACITY`].
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TwoKeyError> {
        if additional <= self.capacity() - self.len() {
            return Ok(());
        }
        let needed = self
            .len()
            .checked_add(additional)
            .filter(|&needed| needed <= MAX_PRIME_CAPACITY)
            .ok_or_else(|| {
                TwoKeyError::invalid_argument(format!(
                    "capacity for {} more triples exceeds the maximum of \
                     {MAX_PRIME_CAPACITY}",
                    additional,
                ))
            })?;
        self.resize(get_prime(needed).min(MAX_PRIME_CAPACITY));
        Ok(())
    }

    /// Shrinks the map's capacity as much as possible.
    ///
    /// Triples are moved down to fill freed slots, so this changes the
    /// version if anything had been removed since the map last grew.
    pub fn shrink_to_fit(&mut self) {
        let len = self.len();
        let target = if len == 0 { 0 } else { get_prime(len) };
        let moved = self.arena.high_water() != len;
        if !moved && target == self.capacity() {
            return;
        }
        self.arena.compact();
        self.resize(target);
        if moved {
            self.bump_version();
        }
    }

    /// Checks general invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError>
    where
        CA: KeyComparer<A>,
        CB: KeyComparer<B>,
    {
        self.arena.validate()?;
        self.tables.validate(&self.arena)?;

        for (index, triple, links) in self.arena.iter() {
            if links.hash(KeyKind::A) != self.tables.hash_a(triple.key_a())
                || links.hash(KeyKind::B)
                    != self.tables.hash_b(triple.key_b())
            {
                return Err(ValidationError::general(format!(
                    "triple at slot {index} has stale hashes"
                )));
            }

            let index_a = self.find_a_index(triple.key_a());
            let index_b = self.find_b_index(triple.key_b());
            if index_a != Some(index) || index_b != Some(index) {
                return Err(ValidationError::general(format!(
                    "triple at slot {index} has inconsistent indexes: \
                     {index_a:?}/{index_b:?}"
                )));
            }
        }

        Ok(())
    }

    pub(super) fn find_a_index<Q>(&self, key_a: &Q) -> Option<SlotIndex>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.tables.find_a(&self.arena, key_a)
    }

    pub(super) fn find_b_index<Q>(&self, key_b: &Q) -> Option<SlotIndex>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.tables.find_b(&self.arena, key_b)
    }

    pub(super) fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn remove_at(&mut self, index: SlotIndex) -> Triple<A, B, V> {
        self.tables.unlink(&mut self.arena, index);
        let triple = self.arena.release(index);
        self.bump_version();
        trace_event!(
            trace,
            slot = index.get(),
            len = self.len(),
            "removed triple"
        );
        triple
    }

    /// Resizes to `new_capacity` buckets, relinking every triple from its
    /// stored hashes. Slot positions are preserved.
    fn resize(&mut self, new_capacity: usize) {
        trace_event!(
            debug,
            from = self.capacity(),
            to = new_capacity,
            len = self.len(),
            "resizing map"
        );
        self.arena.set_capacity(new_capacity);
        self.tables.rebuild(&mut self.arena, new_capacity);
    }

    fn grow(&mut self) {
        let old = self.capacity();
        if old >= MAX_PRIME_CAPACITY {
            panic!(
                "TwoKeyMap cannot grow past {MAX_PRIME_CAPACITY} triples"
            );
        }
        self.resize(expand_prime(old).min(MAX_PRIME_CAPACITY));
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl<A, B, V, CA, CB> TwoKeyMap<A, B, V, CA, CB>
where
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    /// Adds a triple.
    ///
    /// Both keys are checked before anything changes. If either is already
    /// present the map is left untouched and the triple is handed back in
    /// the error; when both are present, the error names the A-key.
    pub fn add(
        &mut self,
        key_a: A,
        key_b: B,
        value: V,
    ) -> Result<(), DuplicateKey<A, B, V>> {
        self.add_triple(Triple::new(key_a, key_b, value))
    }

    /// Copies every triple of `other` into a new map that uses the given
    /// comparers, keeping `other`'s iteration order.
    ///
    /// Each triple is re-added through [`add`](Self::add), so keys that were
    /// distinct under `other`'s comparers but are equal under the new ones
    /// fail with the first such duplicate.
    pub fn from_map_with_comparers<OA, OB>(
        other: &TwoKeyMap<A, B, V, OA, OB>,
        comparer_a: CA,
        comparer_b: CB,
    ) -> Result<Self, DuplicateKey<A, B, V>>
    where
        A: Clone,
        B: Clone,
        V: Clone,
    {
        let mut map = Self::with_comparers(comparer_a, comparer_b);
        if !other.is_empty() {
            map.resize(get_prime(other.len()).min(MAX_PRIME_CAPACITY));
        }
        for triple in other {
            map.add_triple(triple.clone())?;
        }
        Ok(map)
    }

    /// Adds a triple. See [`add`](Self::add).
    pub fn add_triple(
        &mut self,
        triple: Triple<A, B, V>,
    ) -> Result<(), DuplicateKey<A, B, V>> {
        self.add_impl(triple).map(|_| ())
    }

    /// Adds a triple, first removing any triples that share its A-key or its
    /// B-key. The removed triples are returned, A-key match first.
    pub fn insert_overwrite(
        &mut self,
        key_a: A,
        key_b: B,
        value: V,
    ) -> Vec<Triple<A, B, V>> {
        let mut duplicates = Vec::new();
        duplicates.extend(self.take_a(&key_a));
        duplicates.extend(self.take_b(&key_b));

        if self.add(key_a, key_b, value).is_err() {
            // We just removed both conflicting triples.
            panic!("add failed after removing duplicates");
        }

        duplicates
    }

    /// Removes a triple if the map holds one with the same B-key and an
    /// equal value.
    ///
    /// The triple's B-key selects the record, and the record is only removed
    /// if its value equals the triple's value. Returns whether a triple was
    /// removed.
    pub fn remove_triple(&mut self, triple: &Triple<A, B, V>) -> bool
    where
        V: PartialEq,
    {
        match self.find_matching(triple) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if the map holds a triple with the same B-key and an
    /// equal value. See [`remove_triple`](Self::remove_triple).
    pub fn contains(&self, triple: &Triple<A, B, V>) -> bool
    where
        V: PartialEq,
    {
        self.find_matching(triple).is_some()
    }

    /// Recomputes every stored hash with the current comparers and rebuilds
    /// both indexes.
    ///
    /// Only needed if a comparer's hashing can change over time. If a
    /// comparer panics, the map is left as it was.
    pub fn rehash(&mut self) {
        let hashes: Vec<_> = self
            .arena
            .iter()
            .map(|(index, triple, _)| {
                (
                    index,
                    self.tables.hash_a(triple.key_a()),
                    self.tables.hash_b(triple.key_b()),
                )
            })
            .collect();
        for (index, hash_a, hash_b) in hashes {
            self.arena.links_mut(index).set_hashes(hash_a, hash_b);
        }
        let capacity = self.capacity();
        self.resize(capacity);
    }

    fn find_matching(&self, triple: &Triple<A, B, V>) -> Option<SlotIndex>
    where
        V: PartialEq,
    {
        let index = self.find_b_index(triple.key_b())?;
        (self.arena.record(index).value() == triple.value()).then_some(index)
    }

    pub(super) fn add_impl(
        &mut self,
        triple: Triple<A, B, V>,
    ) -> Result<SlotIndex, DuplicateKey<A, B, V>> {
        // Hash and check both keys before mutating anything, so that a
        // duplicate (or a panicking comparer) leaves the map untouched.
        let hash_a = self.tables.hash_a(triple.key_a());
        let hash_b = self.tables.hash_b(triple.key_b());
        if self
            .tables
            .find_a_hashed(&self.arena, hash_a, triple.key_a())
            .is_some()
        {
            return Err(DuplicateKey::new(KeyKind::A, triple));
        }
        if self
            .tables
            .find_b_hashed(&self.arena, hash_b, triple.key_b())
            .is_some()
        {
            return Err(DuplicateKey::new(KeyKind::B, triple));
        }

        if self.arena.is_full() {
            self.grow();
        }
        let index = self.arena.allocate(triple, Links::new(hash_a, hash_b));
        self.tables.link(&mut self.arena, index);
        self.bump_version();
        trace_event!(trace, slot = index.get(), len = self.len(), "added triple");

        Ok(index)
    }
}

impl<A, B, V, CA: Default, CB: Default> Default
    for TwoKeyMap<A, B, V, CA, CB>
{
    fn default() -> Self {
        Self::with_comparers(CA::default(), CB::default())
    }
}

impl<A, B, V, CA, CB> fmt::Debug for TwoKeyMap<A, B, V, CA, CB>
where
    A: fmt::Debug,
    B: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct KeyPair<'a, A, B> {
            key_a: &'a A,
            key_b: &'a B,
        }

        impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for KeyPair<'_, A, B> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Showing the keys as a tuple would suggest a map keyed by
                // tuples, so label them instead: {a: "x", b: 1}.
                f.debug_map()
                    .entry(&Label("a"), self.key_a)
                    .entry(&Label("b"), self.key_b)
                    .finish()
            }
        }

        f.debug_map()
            .entries(self.iter().map(|triple| {
                (
                    KeyPair { key_a: triple.key_a(), key_b: triple.key_b() },
                    triple.value(),
                )
            }))
            .finish()
    }
}

impl<A, B, V, CA, CB> PartialEq for TwoKeyMap<A, B, V, CA, CB>
where
    V: PartialEq,
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    fn eq(&self, other: &Self) -> bool {
        // Two maps are equal if they hold the same triples, regardless of
        // slot order. Each triple's keys must find the same slot in the other
        // map, and that slot's value must be equal.
        if self.len() != other.len() {
            return false;
        }

        self.iter().all(|triple| {
            let Some(index_a) = other.find_a_index(triple.key_a()) else {
                return false;
            };
            if other.find_b_index(triple.key_b()) != Some(index_a) {
                return false;
            }
            other.arena.record(index_a).value() == triple.value()
        })
    }
}

// The Eq bound on V ensures that the TwoKeyMap forms an equivalence class.
impl<A, B, V, CA, CB> Eq for TwoKeyMap<A, B, V, CA, CB>
where
    V: Eq,
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
}

impl<'a, A, B, V, CA, CB> IntoIterator for &'a TwoKeyMap<A, B, V, CA, CB> {
    type Item = &'a Triple<A, B, V>;
    type IntoIter = Iter<'a, A, B, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A, B, V, CA, CB> IntoIterator for &'a mut TwoKeyMap<A, B, V, CA, CB> {
    type Item = (&'a A, &'a B, &'a mut V);
    type IntoIter = IterMut<'a, A, B, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<A, B, V, CA, CB> IntoIterator for TwoKeyMap<A, B, V, CA, CB> {
    type Item = Triple<A, B, V>;
    type IntoIter = IntoIter<A, B, V>;

    #[inline]
    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.arena.take_records())
    }
}

/// The `Extend` implementation overwrites duplicates, like
/// [`TwoKeyMap::insert_overwrite`].
impl<A, B, V, CA, CB> Extend<Triple<A, B, V>> for TwoKeyMap<A, B, V, CA, CB>
where
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    fn extend<I: IntoIterator<Item = Triple<A, B, V>>>(&mut self, iter: I) {
        for triple in iter {
            let (key_a, key_b, value) = triple.into_parts();
            self.insert_overwrite(key_a, key_b, value);
        }
    }
}

impl<A, B, V, CA, CB> Extend<(A, B, V)> for TwoKeyMap<A, B, V, CA, CB>
where
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    fn extend<I: IntoIterator<Item = (A, B, V)>>(&mut self, iter: I) {
        for (key_a, key_b, value) in iter {
            self.insert_overwrite(key_a, key_b, value);
        }
    }
}

/// The `FromIterator` implementation overwrites duplicates, like
/// [`TwoKeyMap::insert_overwrite`].
impl<A, B, V, CA, CB> FromIterator<Triple<A, B, V>>
    for TwoKeyMap<A, B, V, CA, CB>
where
    CA: Default + KeyComparer<A>,
    CB: Default + KeyComparer<B>,
{
    fn from_iter<I: IntoIterator<Item = Triple<A, B, V>>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<A, B, V, CA, CB> FromIterator<(A, B, V)> for TwoKeyMap<A, B, V, CA, CB>
where
    CA: Default + KeyComparer<A>,
    CB: Default + KeyComparer<B>,
{
    fn from_iter<I: IntoIterator<Item = (A, B, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<A, B, V, CA, CB> Enumerable<Triple<A, B, V>>
    for TwoKeyMap<A, B, V, CA, CB>
{
    type Items<'a>
        = Iter<'a, A, B, V>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }
}

impl<A, B, V, CA, CB> MutableContainer<Triple<A, B, V>>
    for TwoKeyMap<A, B, V, CA, CB>
where
    V: PartialEq,
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    fn is_read_only(&self) -> bool {
        false
    }

    fn insert_item(
        &mut self,
        item: Triple<A, B, V>,
    ) -> Result<(), TwoKeyError> {
        self.add_triple(item).map_err(TwoKeyError::from)
    }

    fn remove_item(
        &mut self,
        item: &Triple<A, B, V>,
    ) -> Result<bool, TwoKeyError> {
        Ok(self.remove_triple(item))
    }

    fn clear_items(&mut self) -> Result<(), TwoKeyError> {
        self.clear();
        Ok(())
    }
}
