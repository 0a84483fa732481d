//! Small capability traits shared by [`TwoKeyMap`](crate::TwoKeyMap) and
//! its views.
//!
//! Rather than one wide collection interface, each type implements the
//! capabilities it actually has:
//!
//! | type | [`Enumerable`] | [`KeyLookup`] | [`MutableContainer`] |
//! |---|---|---|---|
//! | [`TwoKeyMap`](crate::TwoKeyMap) | triples | (use the views) | yes |
//! | [`KeysA`](crate::two_key_map::KeysA) | A-keys | A-key → value | read-only |
//! | [`KeysB`](crate::two_key_map::KeysB) | B-keys | B-key → value | read-only |
//! | [`Values`](crate::two_key_map::Values) | values | | read-only |
//!
//! Read-only implementors report
//! [`TwoKeyError::UnsupportedOperation`] from every mutating method.

use crate::TwoKeyError;

/// Lookup of values of type `V` by keys of type `K`.
pub trait KeyLookup<K: ?Sized, V: ?Sized> {
    /// Returns true if `key` is present.
    fn contains_key(&self, key: &K) -> bool;

    /// Returns the value for `key`, if present.
    fn lookup(&self, key: &K) -> Option<&V>;
}

/// A finite, restartable sequence of `T`s.
pub trait Enumerable<T> {
    /// The iterator returned by [`items`](Self::items).
    type Items<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns true if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the items.
    fn items(&self) -> Self::Items<'_>;

    /// Clones every item into `dest`, starting at `index`.
    ///
    /// Fails with [`TwoKeyError::InvalidArgument`] if `index` is past the end
    /// of `dest`, or if the items don't fit in `dest[index..]`. Nothing is
    /// written in that case.
    fn copy_to(&self, dest: &mut [T], index: usize) -> Result<(), TwoKeyError>
    where
        T: Clone,
    {
        if index > dest.len() {
            return Err(TwoKeyError::invalid_argument(alloc::format!(
                "index {index} is out of range for a destination of length {}",
                dest.len(),
            )));
        }
        if dest.len() - index < self.len() {
            return Err(TwoKeyError::invalid_argument(alloc::format!(
                "destination has room for {} items after index {index}, \
                 but {} are needed",
                dest.len() - index,
                self.len(),
            )));
        }
        for (slot, item) in dest[index..].iter_mut().zip(self.items()) {
            slot.clone_from(item);
        }
        Ok(())
    }
}

/// A container of `T`s that may accept insertions and removals.
pub trait MutableContainer<T> {
    /// Returns true if every mutating method fails with
    /// [`TwoKeyError::UnsupportedOperation`].
    fn is_read_only(&self) -> bool;

    /// Adds an item.
    fn insert_item(&mut self, item: T) -> Result<(), TwoKeyError>;

    /// Removes an item, returning whether it was present.
    fn remove_item(&mut self, item: &T) -> Result<bool, TwoKeyError>;

    /// Removes every item.
    fn clear_items(&mut self) -> Result<(), TwoKeyError>;
}
