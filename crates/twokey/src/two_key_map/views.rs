//! Read-only views over the keys and values of a [`TwoKeyMap`].

use super::{
    cursor::{self, Cursor},
    Projected, TwoKeyMap,
};
use crate::{
    capability::{Enumerable, KeyLookup, MutableContainer},
    support::comparer::{HashComparer, KeyComparer},
    TwoKeyError,
};
use core::{borrow::Borrow, fmt};

/// Defines a read-only view type over one projection of a map's triples.
macro_rules! define_view {
    (
        $(#[$attr:meta])*
        $name:ident, $item:ident, $projection:ident, $label:literal
    ) => {
        $(#[$attr])*
        pub struct $name<'a, A, B, V, CA = HashComparer, CB = HashComparer> {
            map: &'a TwoKeyMap<A, B, V, CA, CB>,
        }

        impl<'a, A, B, V, CA, CB> $name<'a, A, B, V, CA, CB> {
            pub(super) fn new(map: &'a TwoKeyMap<A, B, V, CA, CB>) -> Self {
                Self { map }
            }

            /// Returns the map this view reads from.
            #[inline]
            pub fn map(&self) -> &'a TwoKeyMap<A, B, V, CA, CB> {
                self.map
            }

            /// Returns the number of items, which is the number of triples
            /// in the map.
            #[inline]
            pub fn len(&self) -> usize {
                self.map.len()
            }

            /// Returns true if the map is empty.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.map.is_empty()
            }

            /// Iterates over the items, in the map's iteration order.
            #[inline]
            pub fn iter(&self) -> Projected<'a, A, B, V, cursor::$projection> {
                Projected::new(self.map.iter())
            }

            /// Returns a version-checked cursor over the items. Pass
            /// [`map`](Self::map) (or the map itself) to its methods.
            #[inline]
            pub fn cursor(&self) -> Cursor<cursor::$projection> {
                Cursor::new(self.map.version)
            }

            /// Clones every item into `dest`, starting at `index`.
            ///
            /// Fails with [`TwoKeyError::InvalidArgument`] if the items
            /// don't fit.
            pub fn copy_to(
                &self,
                dest: &mut [$item],
                index: usize,
            ) -> Result<(), TwoKeyError>
            where
                $item: Clone,
            {
                Enumerable::copy_to(self, dest, index)
            }
        }

        impl<A, B, V, CA, CB> Clone for $name<'_, A, B, V, CA, CB> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<A, B, V, CA, CB> Copy for $name<'_, A, B, V, CA, CB> {}

        impl<A, B, V, CA, CB> fmt::Debug for $name<'_, A, B, V, CA, CB>
        where
            $item: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.iter()).finish()
            }
        }

        impl<'a, A, B, V, CA, CB> IntoIterator for $name<'a, A, B, V, CA, CB> {
            type Item = &'a $item;
            type IntoIter = Projected<'a, A, B, V, cursor::$projection>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<'a, A, B, V, CA, CB> Enumerable<$item>
            for $name<'a, A, B, V, CA, CB>
        {
            type Items<'b>
                = Projected<'b, A, B, V, cursor::$projection>
            where
                Self: 'b;

            #[inline]
            fn len(&self) -> usize {
                self.map.len()
            }

            #[inline]
            fn items(&self) -> Self::Items<'_> {
                Projected::new(self.map.iter())
            }
        }

        impl<A, B, V, CA, CB> MutableContainer<$item>
            for $name<'_, A, B, V, CA, CB>
        {
            fn is_read_only(&self) -> bool {
                true
            }

            fn insert_item(&mut self, _item: $item) -> Result<(), TwoKeyError> {
                Err(TwoKeyError::UnsupportedOperation(concat!(
                    "cannot add to the ", $label, " view of a map"
                )))
            }

            fn remove_item(&mut self, _item: &$item) -> Result<bool, TwoKeyError> {
                Err(TwoKeyError::UnsupportedOperation(concat!(
                    "cannot remove from the ", $label, " view of a map"
                )))
            }

            fn clear_items(&mut self) -> Result<(), TwoKeyError> {
                Err(TwoKeyError::UnsupportedOperation(concat!(
                    "cannot clear the ", $label, " view of a map"
                )))
            }
        }
    };
}

define_view! {
    /// A read-only view of the A-keys of a [`TwoKeyMap`].
    ///
    /// Created by [`TwoKeyMap::keys_a`].
    KeysA, A, KeyA, "A-key"
}

define_view! {
    /// A read-only view of the B-keys of a [`TwoKeyMap`].
    ///
    /// Created by [`TwoKeyMap::keys_b`].
    KeysB, B, KeyB, "B-key"
}

define_view! {
    /// A read-only view of the values of a [`TwoKeyMap`].
    ///
    /// Created by [`TwoKeyMap::values`].
    Values, V, Value, "value"
}

impl<A, B, V, CA, CB> KeysA<'_, A, B, V, CA, CB> {
    /// Returns true if `key_a` is one of the A-keys.
    pub fn contains<Q>(&self, key_a: &Q) -> bool
    where
        A: Borrow<Q>,
        Q: ?Sized,
        CA: KeyComparer<Q>,
    {
        self.map.contains_key_a(key_a)
    }
}

impl<A, B, V, CA, CB> KeysB<'_, A, B, V, CA, CB> {
    /// Returns true if `key_b` is one of the B-keys.
    pub fn contains<Q>(&self, key_b: &Q) -> bool
    where
        B: Borrow<Q>,
        Q: ?Sized,
        CB: KeyComparer<Q>,
    {
        self.map.contains_key_b(key_b)
    }
}

impl<A, B, V, CA, CB> Values<'_, A, B, V, CA, CB> {
    /// Returns true if any triple holds `value`. This scans every triple.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }
}

impl<A, B, V, CA, CB, Q> KeyLookup<Q, V> for KeysA<'_, A, B, V, CA, CB>
where
    A: Borrow<Q>,
    Q: ?Sized,
    CA: KeyComparer<Q>,
{
    fn contains_key(&self, key: &Q) -> bool {
        self.map.contains_key_a(key)
    }

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.map.get_a(key)
    }
}

impl<A, B, V, CA, CB, Q> KeyLookup<Q, V> for KeysB<'_, A, B, V, CA, CB>
where
    B: Borrow<Q>,
    Q: ?Sized,
    CB: KeyComparer<Q>,
{
    fn contains_key(&self, key: &Q) -> bool {
        self.map.contains_key_b(key)
    }

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.map.get_b(key)
    }
}
