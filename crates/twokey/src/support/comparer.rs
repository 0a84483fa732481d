use super::hash_builder::DefaultHashBuilder;
use core::hash::{BuildHasher, Hash};

/// Hashing and equality for one key space of a
/// [`TwoKeyMap`](crate::TwoKeyMap).
///
/// The A-keys and the B-keys of a map each have their own comparer, so the
/// two key spaces can use different notions of equality (for example,
/// case-insensitive names alongside exact numeric ids).
///
/// Implementations must be consistent: if `eq_keys(a, b)` is true, then
/// `hash_key(a) == hash_key(b)`. A comparer that violates this will not cause
/// memory unsafety, but lookups and uniqueness checks will give unspecified
/// results.
///
/// The trait is generic over the key type so that a comparer can also
/// serve borrowed forms of the key (for example `str` for `String` keys).
pub trait KeyComparer<K: ?Sized> {
    /// Hashes a key.
    fn hash_key(&self, key: &K) -> u64;

    /// Returns true if two keys are equal.
    fn eq_keys(&self, a: &K, b: &K) -> bool;
}

/// The default comparer: [`Hash`] and [`Eq`] through a [`BuildHasher`].
#[derive(Clone, Debug, Default)]
pub struct HashComparer<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> HashComparer<S> {
    /// Creates a comparer that hashes with the given hash builder.
    #[inline]
    pub const fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }

    /// Returns the hash builder.
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<K, S> KeyComparer<K> for HashComparer<S>
where
    K: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn eq_keys(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

impl<K, C> KeyComparer<K> for &C
where
    K: ?Sized,
    C: KeyComparer<K> + ?Sized,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        (**self).hash_key(key)
    }

    #[inline]
    fn eq_keys(&self, a: &K, b: &K) -> bool {
        (**self).eq_keys(a, b)
    }
}
