/// A record stored in a [`TwoKeyMap`](crate::TwoKeyMap): an A-key, a B-key
/// and a value.
///
/// The keys of a triple never change once it is constructed. Only the value
/// can be replaced, and only through [`value_mut`](Self::value_mut) or the
/// map's own setters.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Triple<A, B, V> {
    key_a: A,
    key_b: B,
    value: V,
}

impl<A, B, V> Triple<A, B, V> {
    /// Creates a new triple.
    #[inline]
    pub const fn new(key_a: A, key_b: B, value: V) -> Self {
        Self { key_a, key_b, value }
    }

    /// Returns the A-key.
    #[inline]
    pub fn key_a(&self) -> &A {
        &self.key_a
    }

    /// Returns the B-key.
    #[inline]
    pub fn key_b(&self) -> &B {
        &self.key_b
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value, returning the old one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Returns the keys and a mutable reference to the value at once.
    #[inline]
    pub fn split_mut(&mut self) -> (&A, &B, &mut V) {
        (&self.key_a, &self.key_b, &mut self.value)
    }

    /// Splits the triple into its parts.
    #[inline]
    pub fn into_parts(self) -> (A, B, V) {
        (self.key_a, self.key_b, self.value)
    }
}

impl<A, B, V> From<(A, B, V)> for Triple<A, B, V> {
    #[inline]
    fn from((key_a, key_b, value): (A, B, V)) -> Self {
        Self::new(key_a, key_b, value)
    }
}

impl<A, B, V> From<Triple<A, B, V>> for (A, B, V) {
    #[inline]
    fn from(triple: Triple<A, B, V>) -> Self {
        triple.into_parts()
    }
}
