use crate::{
    errors::KeyKind,
    internal::ValidationError,
    support::{
        arena::{SlotArena, SlotIndex},
        chain_table::ChainTable,
        comparer::KeyComparer,
    },
    Triple,
};
use core::borrow::Borrow;

/// The two indexes of a `TwoKeyMap`, along with the comparers that define
/// them.
#[derive(Clone, Debug)]
pub(super) struct TwoKeyTables<CA, CB> {
    pub(super) comparer_a: CA,
    pub(super) comparer_b: CB,
    pub(super) a_to_slot: ChainTable,
    pub(super) b_to_slot: ChainTable,
}

impl<CA, CB> TwoKeyTables<CA, CB> {
    pub(super) const fn new(comparer_a: CA, comparer_b: CB) -> Self {
        Self {
            comparer_a,
            comparer_b,
            a_to_slot: ChainTable::new(KeyKind::A),
            b_to_slot: ChainTable::new(KeyKind::B),
        }
    }

    pub(super) fn validate<A, B, V>(
        &self,
        arena: &SlotArena<Triple<A, B, V>>,
    ) -> Result<(), ValidationError> {
        self.a_to_slot
            .validate(arena, arena.len())
            .map_err(|error| ValidationError::Table { name: "a_to_slot", error })?;
        self.b_to_slot
            .validate(arena, arena.len())
            .map_err(|error| ValidationError::Table { name: "b_to_slot", error })?;
        Ok(())
    }

    pub(super) fn link<T>(&mut self, arena: &mut SlotArena<T>, index: SlotIndex) {
        self.a_to_slot.link(arena, index);
        self.b_to_slot.link(arena, index);
    }

    /// Unlinks a slot from both chains. The slot must be linked into both.
    pub(super) fn unlink<T>(
        &mut self,
        arena: &mut SlotArena<T>,
        index: SlotIndex,
    ) {
        let unlinked_a = self.a_to_slot.unlink(arena, index);
        let unlinked_b = self.b_to_slot.unlink(arena, index);
        assert!(
            unlinked_a && unlinked_b,
            "slot {index} was missing from a chain (a: {unlinked_a}, \
             b: {unlinked_b})",
        );
    }

    pub(super) fn rebuild<T>(
        &mut self,
        arena: &mut SlotArena<T>,
        bucket_count: usize,
    ) {
        self.a_to_slot.rebuild(arena, bucket_count);
        self.b_to_slot.rebuild(arena, bucket_count);
    }

    pub(super) fn clear(&mut self) {
        self.a_to_slot.clear();
        self.b_to_slot.clear();
    }

    #[inline]
    pub(super) fn hash_a<Q: ?Sized>(&self, key: &Q) -> u64
    where
        CA: KeyComparer<Q>,
    {
        self.comparer_a.hash_key(key)
    }

    #[inline]
    pub(super) fn hash_b<Q: ?Sized>(&self, key: &Q) -> u64
    where
        CB: KeyComparer<Q>,
    {
        self.comparer_b.hash_key(key)
    }

    pub(super) fn find_a_hashed<A, B, V, Q>(
        &self,
        arena: &SlotArena<Triple<A, B, V>>,
        hash: u64,
        key: &Q,
    ) -> Option<SlotIndex>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.a_to_slot.find(arena, hash, |triple| {
            self.comparer_a.eq_keys(triple.key_a().borrow(), key)
        })
    }

    pub(super) fn find_b_hashed<A, B, V, Q>(
        &self,
        arena: &SlotArena<Triple<A, B, V>>,
        hash: u64,
        key: &Q,
    ) -> Option<SlotIndex>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.b_to_slot.find(arena, hash, |triple| {
            self.comparer_b.eq_keys(triple.key_b().borrow(), key)
        })
    }

    #[inline]
    pub(super) fn find_a<A, B, V, Q>(
        &self,
        arena: &SlotArena<Triple<A, B, V>>,
        key: &Q,
    ) -> Option<SlotIndex>
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        if arena.len() == 0 {
            return None;
        }
        self.find_a_hashed(arena, self.hash_a(key), key)
    }

    #[inline]
    pub(super) fn find_b<A, B, V, Q>(
        &self,
        arena: &SlotArena<Triple<A, B, V>>,
        key: &Q,
    ) -> Option<SlotIndex>
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        if arena.len() == 0 {
            return None;
        }
        self.find_b_hashed(arena, self.hash_b(key), key)
    }
}
