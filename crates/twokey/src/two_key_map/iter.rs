use super::cursor::Projection;
use crate::{
    support::arena::{self, IntoRecords, SlotArena},
    Triple,
};
use core::{fmt, iter::FusedIterator, marker::PhantomData};

/// An iterator over the triples of a [`TwoKeyMap`] by shared reference, in
/// physical slot order.
///
/// Created by [`TwoKeyMap::iter`].
///
/// [`TwoKeyMap`]: crate::TwoKeyMap
/// [`TwoKeyMap::iter`]: crate::TwoKeyMap::iter
pub struct Iter<'a, A, B, V> {
    inner: arena::Iter<'a, Triple<A, B, V>>,
}

impl<'a, A, B, V> Iter<'a, A, B, V> {
    pub(super) fn new(arena: &'a SlotArena<Triple<A, B, V>>) -> Self {
        Self { inner: arena.iter() }
    }
}

impl<A, B, V> Clone for Iter<'_, A, B, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<A: fmt::Debug, B: fmt::Debug, V: fmt::Debug> fmt::Debug
    for Iter<'_, A, B, V>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, A, B, V> Iterator for Iter<'a, A, B, V> {
    type Item = &'a Triple<A, B, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, triple, _)| triple)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<A, B, V> ExactSizeIterator for Iter<'_, A, B, V> {}

// The slot iterator is fused once exhausted, so Iter is as well.
impl<A, B, V> FusedIterator for Iter<'_, A, B, V> {}

/// An iterator over the triples of a [`TwoKeyMap`], with mutable access to
/// values.
///
/// Keys are never handed out mutably: changing one would desynchronize it
/// from its index.
///
/// Created by [`TwoKeyMap::iter_mut`].
///
/// [`TwoKeyMap`]: crate::TwoKeyMap
/// [`TwoKeyMap::iter_mut`]: crate::TwoKeyMap::iter_mut
#[derive(Debug)]
pub struct IterMut<'a, A, B, V> {
    inner: arena::IterMut<'a, Triple<A, B, V>>,
}

impl<'a, A, B, V> IterMut<'a, A, B, V> {
    pub(super) fn new(arena: &'a mut SlotArena<Triple<A, B, V>>) -> Self {
        Self { inner: arena.iter_mut() }
    }
}

impl<'a, A, B, V> Iterator for IterMut<'a, A, B, V> {
    type Item = (&'a A, &'a B, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Triple::split_mut)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<A, B, V> ExactSizeIterator for IterMut<'_, A, B, V> {}

impl<A, B, V> FusedIterator for IterMut<'_, A, B, V> {}

/// An iterator over the triples of a [`TwoKeyMap`] by ownership.
///
/// Created by [`TwoKeyMap::into_iter`].
///
/// [`TwoKeyMap`]: crate::TwoKeyMap
/// [`TwoKeyMap::into_iter`]: crate::TwoKeyMap::into_iter
#[derive(Debug)]
pub struct IntoIter<A, B, V> {
    inner: IntoRecords<Triple<A, B, V>>,
}

impl<A, B, V> IntoIter<A, B, V> {
    pub(super) fn new(inner: IntoRecords<Triple<A, B, V>>) -> Self {
        Self { inner }
    }
}

impl<A, B, V> Iterator for IntoIter<A, B, V> {
    type Item = Triple<A, B, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<A, B, V> ExactSizeIterator for IntoIter<A, B, V> {}

impl<A, B, V> FusedIterator for IntoIter<A, B, V> {}

/// A draining iterator over the triples of a [`TwoKeyMap`].
///
/// The map is already empty when this is created; dropping the iterator
/// early drops the remaining triples.
///
/// Created by [`TwoKeyMap::drain`].
///
/// [`TwoKeyMap`]: crate::TwoKeyMap
/// [`TwoKeyMap::drain`]: crate::TwoKeyMap::drain
#[derive(Debug)]
pub struct Drain<'a, A, B, V> {
    inner: IntoRecords<Triple<A, B, V>>,
    _map: PhantomData<&'a mut ()>,
}

impl<A, B, V> Drain<'_, A, B, V> {
    pub(super) fn new(inner: IntoRecords<Triple<A, B, V>>) -> Self {
        Self { inner, _map: PhantomData }
    }
}

impl<A, B, V> Iterator for Drain<'_, A, B, V> {
    type Item = Triple<A, B, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<A, B, V> ExactSizeIterator for Drain<'_, A, B, V> {}

impl<A, B, V> FusedIterator for Drain<'_, A, B, V> {}

/// An iterator over one part of each triple: its A-key, its B-key or its
/// value, depending on `P`.
///
/// Created by the `iter` methods of [`KeysA`], [`KeysB`] and [`Values`].
///
/// [`KeysA`]: crate::two_key_map::KeysA
/// [`KeysB`]: crate::two_key_map::KeysB
/// [`Values`]: crate::two_key_map::Values
pub struct Projected<'a, A, B, V, P> {
    inner: Iter<'a, A, B, V>,
    _projection: PhantomData<fn() -> P>,
}

impl<'a, A, B, V, P> Projected<'a, A, B, V, P> {
    pub(super) fn new(inner: Iter<'a, A, B, V>) -> Self {
        Self { inner, _projection: PhantomData }
    }
}

impl<A, B, V, P> Clone for Projected<'_, A, B, V, P> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<A, B, V, P> fmt::Debug for Projected<'_, A, B, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projected")
            .field("remaining", &self.inner.len())
            .finish_non_exhaustive()
    }
}

impl<'a, A, B, V, P: Projection> Iterator for Projected<'a, A, B, V, P> {
    type Item = P::Output<'a, A, B, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|triple| P::project(triple))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<A, B, V, P: Projection> ExactSizeIterator for Projected<'_, A, B, V, P> {}

impl<A, B, V, P: Projection> FusedIterator for Projected<'_, A, B, V, P> {}
