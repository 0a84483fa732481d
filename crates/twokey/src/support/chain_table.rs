//! Separate-chaining hash index over a [`SlotArena`].
//!
//! The table only stores bucket heads. The chains themselves are threaded
//! through the arena's [`Links`](super::arena::Links), one `next` pointer per
//! key kind, so two tables can index the same arena independently.

use super::arena::{SlotArena, SlotIndex};
use crate::{errors::KeyKind, internal::TableValidationError};
use alloc::{format, vec, vec::Vec};

#[derive(Clone, Debug)]
pub(crate) struct ChainTable {
    kind: KeyKind,
    buckets: Vec<Option<SlotIndex>>,
}

impl ChainTable {
    pub(crate) const fn new(kind: KeyKind) -> Self {
        Self { kind, buckets: Vec::new() }
    }

    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        debug_assert!(!self.buckets.is_empty());
        (hash % self.buckets.len() as u64) as usize
    }

    /// Walks the chain for `hash`, returning the first slot whose stored hash
    /// matches and for which `eq` returns true.
    pub(crate) fn find<T, F>(
        &self,
        arena: &SlotArena<T>,
        hash: u64,
        mut eq: F,
    ) -> Option<SlotIndex>
    where
        F: FnMut(&T) -> bool,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let mut cursor = self.buckets[self.bucket_of(hash)];
        while let Some(index) = cursor {
            let (record, links) = arena.get(index)?;
            if links.hash(self.kind) == hash && eq(record) {
                return Some(index);
            }
            cursor = links.next(self.kind);
        }
        None
    }

    /// Prepends an occupied slot to the chain selected by its stored hash.
    pub(crate) fn link<T>(&mut self, arena: &mut SlotArena<T>, index: SlotIndex) {
        let links = arena.links_mut(index);
        let bucket = self.bucket_of(links.hash(self.kind));
        links.set_next(self.kind, self.buckets[bucket]);
        self.buckets[bucket] = Some(index);
    }

    /// Splices a slot out of its chain. Returns false if it wasn't linked.
    pub(crate) fn unlink<T>(
        &mut self,
        arena: &mut SlotArena<T>,
        index: SlotIndex,
    ) -> bool {
        let links = arena.links(index);
        let bucket = self.bucket_of(links.hash(self.kind));
        let after = links.next(self.kind);

        let mut prev: Option<SlotIndex> = None;
        let mut cursor = self.buckets[bucket];
        while let Some(current) = cursor {
            if current == index {
                match prev {
                    None => self.buckets[bucket] = after,
                    Some(prev) => {
                        arena.links_mut(prev).set_next(self.kind, after)
                    }
                }
                arena.links_mut(index).set_next(self.kind, None);
                return true;
            }
            prev = Some(current);
            cursor = arena.links(current).next(self.kind);
        }
        false
    }

    /// Discards all chains and relinks every occupied slot into
    /// `bucket_count` fresh buckets, in physical slot order.
    pub(crate) fn rebuild<T>(
        &mut self,
        arena: &mut SlotArena<T>,
        bucket_count: usize,
    ) {
        self.buckets = vec![None; bucket_count];
        if bucket_count == 0 {
            debug_assert_eq!(arena.len(), 0);
            return;
        }
        for position in 0..arena.high_water() {
            let index = SlotIndex::new(position);
            if arena.get(index).is_some() {
                self.link(arena, index);
            }
        }
    }

    /// Empties every bucket, keeping the bucket count.
    pub(crate) fn clear(&mut self) {
        self.buckets.fill(None);
    }

    pub(crate) fn validate<T>(
        &self,
        arena: &SlotArena<T>,
        expected_len: usize,
    ) -> Result<(), TableValidationError> {
        if self.bucket_count() != arena.capacity() {
            return Err(TableValidationError::new(format!(
                "bucket count {} differs from arena capacity {}",
                self.bucket_count(),
                arena.capacity(),
            )));
        }

        let mut seen = vec![false; arena.high_water()];
        let mut total = 0;
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut cursor = *head;
            while let Some(index) = cursor {
                let Some((_, links)) = arena.get(index) else {
                    return Err(TableValidationError::new(format!(
                        "bucket {bucket} chains through free slot {index}"
                    )));
                };
                if self.bucket_of(links.hash(self.kind)) != bucket {
                    return Err(TableValidationError::new(format!(
                        "slot {index} is chained in bucket {bucket}, but \
                         its hash selects bucket {}",
                        self.bucket_of(links.hash(self.kind)),
                    )));
                }
                if core::mem::replace(&mut seen[index.get()], true) {
                    return Err(TableValidationError::new(format!(
                        "slot {index} is chained more than once"
                    )));
                }
                total += 1;
                cursor = links.next(self.kind);
            }
        }

        if total != expected_len {
            return Err(TableValidationError::new(format!(
                "expected {expected_len} chained slots, found {total}"
            )));
        }

        Ok(())
    }
}
