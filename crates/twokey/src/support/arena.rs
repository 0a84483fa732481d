//! Slot storage for records, with an embedded free list.

use crate::{
    errors::KeyKind,
    internal::{TableValidationError, ValidationError},
};
use alloc::{format, string::String, vec::Vec};
use core::fmt;

/// The index of a slot in a [`SlotArena`].
///
/// Capacities are capped well below `u32::MAX`, so a `u32` suffices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct SlotIndex(u32);

impl SlotIndex {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "slot index overflow");
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A slot index paired with the generation the slot had when the handle was
/// taken. Handles go stale once the slot is released.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SlotHandle {
    index: SlotIndex,
    generation: u32,
}

impl SlotHandle {
    #[inline]
    pub(crate) fn index(self) -> SlotIndex {
        self.index
    }
}

/// Per-record bookkeeping for the two chain tables.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Links {
    hash_a: u64,
    hash_b: u64,
    next_a: Option<SlotIndex>,
    next_b: Option<SlotIndex>,
}

impl Links {
    #[inline]
    pub(crate) fn new(hash_a: u64, hash_b: u64) -> Self {
        Self { hash_a, hash_b, next_a: None, next_b: None }
    }

    #[inline]
    pub(crate) fn hash(&self, kind: KeyKind) -> u64 {
        match kind {
            KeyKind::A => self.hash_a,
            KeyKind::B => self.hash_b,
        }
    }

    #[inline]
    pub(crate) fn set_hashes(&mut self, hash_a: u64, hash_b: u64) {
        self.hash_a = hash_a;
        self.hash_b = hash_b;
    }

    #[inline]
    pub(crate) fn next(&self, kind: KeyKind) -> Option<SlotIndex> {
        match kind {
            KeyKind::A => self.next_a,
            KeyKind::B => self.next_b,
        }
    }

    #[inline]
    pub(crate) fn set_next(&mut self, kind: KeyKind, next: Option<SlotIndex>) {
        match kind {
            KeyKind::A => self.next_a = next,
            KeyKind::B => self.next_b = next,
        }
    }
}

#[derive(Clone, Debug)]
enum SlotState<T> {
    Occupied { record: T, links: Links },
    Free { next_free: Option<SlotIndex> },
}

#[derive(Clone, Debug)]
struct Slot<T> {
    // Bumped every time the slot is released.
    generation: u32,
    state: SlotState<T>,
}

/// A growable array of slots. Released slots are threaded onto a LIFO free
/// list and handed out again before the array grows.
///
/// The arena tracks a logical capacity separately from the `Vec`'s: the map
/// decides when to grow (and to which prime), and the arena only reports
/// that it is full.
#[derive(Clone, Debug)]
pub(crate) struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<SlotIndex>,
    free_count: usize,
    capacity: usize,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotArena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), free_head: None, free_count: 0, capacity: 0 }
    }

    /// The number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_count
    }

    /// The number of slots ever handed out (occupied or free).
    #[inline]
    pub(crate) fn high_water(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if allocating would need more capacity.
    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.free_head.is_none() && self.slots.len() >= self.capacity
    }

    /// Sets the logical capacity. It must not drop below the high-water mark,
    /// since slot positions are preserved.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.slots.len());
        if capacity > self.slots.len() {
            self.slots.reserve_exact(capacity - self.slots.len());
        } else {
            self.slots.shrink_to_fit();
        }
        self.capacity = capacity;
    }

    /// Stores a record, reusing the most recently released slot if there is
    /// one. The links' `next` pointers are left for the chain tables to fill
    /// in.
    pub(crate) fn allocate(&mut self, record: T, links: Links) -> SlotIndex {
        debug_assert!(!self.is_full(), "allocate called on a full arena");
        let state = SlotState::Occupied { record, links };
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index.get()];
                let SlotState::Free { next_free } = slot.state else {
                    panic!("free list head {index} is occupied");
                };
                slot.state = state;
                self.free_head = next_free;
                self.free_count -= 1;
                index
            }
            None => {
                let index = SlotIndex::new(self.slots.len());
                self.slots.push(Slot { generation: 0, state });
                index
            }
        }
    }

    /// Takes the record out of an occupied slot and pushes the slot onto the
    /// free list.
    ///
    /// The slot must already be unlinked from both chain tables.
    pub(crate) fn release(&mut self, index: SlotIndex) -> T {
        let slot = &mut self.slots[index.get()];
        let state = core::mem::replace(
            &mut slot.state,
            SlotState::Free { next_free: self.free_head },
        );
        let SlotState::Occupied { record, .. } = state else {
            panic!("released slot {index} was not occupied");
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free_head = Some(index);
        self.free_count += 1;
        record
    }

    #[inline]
    pub(crate) fn get(&self, index: SlotIndex) -> Option<(&T, &Links)> {
        match &self.slots.get(index.get())?.state {
            SlotState::Occupied { record, links } => Some((record, links)),
            SlotState::Free { .. } => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(
        &mut self,
        index: SlotIndex,
    ) -> Option<(&mut T, &mut Links)> {
        match &mut self.slots.get_mut(index.get())?.state {
            SlotState::Occupied { record, links } => Some((record, links)),
            SlotState::Free { .. } => None,
        }
    }

    /// Returns the record for the slot at `index`.
    ///
    /// Panics if the slot is free: callers only pass indexes they found
    /// through a chain table.
    #[inline]
    pub(crate) fn record(&self, index: SlotIndex) -> &T {
        match self.get(index) {
            Some((record, _)) => record,
            None => panic!("slot {index} is not occupied"),
        }
    }

    #[inline]
    pub(crate) fn record_mut(&mut self, index: SlotIndex) -> &mut T {
        match self.get_mut(index) {
            Some((record, _)) => record,
            None => panic!("slot {index} is not occupied"),
        }
    }

    #[inline]
    pub(crate) fn links(&self, index: SlotIndex) -> &Links {
        match self.get(index) {
            Some((_, links)) => links,
            None => panic!("slot {index} is not occupied"),
        }
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, index: SlotIndex) -> &mut Links {
        match self.get_mut(index) {
            Some((_, links)) => links,
            None => panic!("slot {index} is not occupied"),
        }
    }

    /// Returns the first occupied slot at or after physical position `from`,
    /// as a handle.
    pub(crate) fn next_occupied(&self, from: usize) -> Option<SlotHandle> {
        let slots = self.slots.get(from..)?;
        slots.iter().enumerate().find_map(|(offset, slot)| match slot.state {
            SlotState::Occupied { .. } => Some(SlotHandle {
                index: SlotIndex::new(from + offset),
                generation: slot.generation,
            }),
            SlotState::Free { .. } => None,
        })
    }

    /// Returns the record behind a handle, or `None` if the handle is stale.
    pub(crate) fn get_by_handle(&self, handle: SlotHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index.get())?;
        match &slot.state {
            SlotState::Occupied { record, .. }
                if slot.generation == handle.generation =>
            {
                Some(record)
            }
            _ => None,
        }
    }

    /// Iterates over occupied slots in physical order.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.slots.iter().enumerate(), remaining: self.len() }
    }

    /// Iterates mutably over occupied slots in physical order.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
        let remaining = self.len();
        IterMut { inner: self.slots.iter_mut(), remaining }
    }

    /// Removes every slot, keeping the logical capacity.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.free_count = 0;
    }

    /// Empties the arena, returning the records in physical order. The
    /// logical capacity is kept.
    pub(crate) fn take_records(&mut self) -> IntoRecords<T> {
        let remaining = self.len();
        self.free_head = None;
        self.free_count = 0;
        let slots = core::mem::take(&mut self.slots);
        IntoRecords { inner: slots.into_iter(), remaining }
    }

    /// Drops every record for which `keep` returns false, returning the
    /// released slot indexes in physical order.
    ///
    /// Chain links of the released slots are left dangling; the caller must
    /// unlink them.
    pub(crate) fn retain_indexes<F>(&mut self, mut keep: F) -> Vec<SlotIndex>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut doomed = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let SlotState::Occupied { record, .. } = &mut slot.state {
                if !keep(record) {
                    doomed.push(SlotIndex::new(i));
                }
            }
        }
        doomed
    }

    /// Moves every occupied slot to the front, preserving relative order, and
    /// empties the free list.
    ///
    /// All chain links are stale afterwards; the caller must rebuild them.
    pub(crate) fn compact(&mut self) {
        self.slots
            .retain(|slot| matches!(slot.state, SlotState::Occupied { .. }));
        self.free_head = None;
        self.free_count = 0;
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        let table_error = |msg: String| ValidationError::Table {
            name: "free_list",
            error: TableValidationError::new(msg),
        };

        if self.slots.len() > self.capacity {
            return Err(ValidationError::general(format!(
                "arena holds {} slots, above its capacity {}",
                self.slots.len(),
                self.capacity,
            )));
        }

        // Walk the free list; it must reach exactly the free slots.
        let mut seen = 0;
        let mut cursor = self.free_head;
        while let Some(index) = cursor {
            if seen > self.free_count {
                return Err(table_error(format!(
                    "free list is longer than free_count {} (cycle?)",
                    self.free_count,
                )));
            }
            match self.slots.get(index.get()).map(|slot| &slot.state) {
                Some(SlotState::Free { next_free }) => cursor = *next_free,
                Some(SlotState::Occupied { .. }) => {
                    return Err(table_error(format!(
                        "slot {index} is on the free list but occupied"
                    )));
                }
                None => {
                    return Err(table_error(format!(
                        "free list points past the end at {index}"
                    )));
                }
            }
            seen += 1;
        }

        let free_slots = self
            .slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Free { .. }))
            .count();
        if seen != self.free_count || free_slots != self.free_count {
            return Err(table_error(format!(
                "free_count is {}, but the free list has {seen} entries \
                 and {free_slots} slots are free",
                self.free_count,
            )));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct Iter<'a, T> {
    inner: core::iter::Enumerate<core::slice::Iter<'a, Slot<T>>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), remaining: self.remaining }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotIndex, &'a T, &'a Links);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for (i, slot) in self.inner.by_ref() {
            if let SlotState::Occupied { record, links } = &slot.state {
                self.remaining -= 1;
                return Some((SlotIndex::new(i), record, links));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[derive(Debug)]
pub(crate) struct IterMut<'a, T> {
    inner: core::slice::IterMut<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let SlotState::Occupied { record, .. } = &mut slot.state {
                self.remaining -= 1;
                return Some(record);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

#[derive(Debug)]
pub(crate) struct IntoRecords<T> {
    inner: alloc::vec::IntoIter<Slot<T>>,
    remaining: usize,
}

impl<T> Iterator for IntoRecords<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let SlotState::Occupied { record, .. } = slot.state {
                self.remaining -= 1;
                return Some(record);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoRecords<T> {}
