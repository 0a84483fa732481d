//! Comparers with unusual behavior, for exercising `TwoKeyMap` internals.

use std::{
    cell::Cell,
    hash::{DefaultHasher, Hash, Hasher},
};
use twokey::KeyComparer;

/// Compares strings ASCII-case-insensitively.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitive;

impl KeyComparer<str> for CaseInsensitive {
    fn hash_key(&self, key: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        for byte in key.bytes() {
            hasher.write_u8(byte.to_ascii_lowercase());
        }
        hasher.finish()
    }

    fn eq_keys(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

impl KeyComparer<String> for CaseInsensitive {
    fn hash_key(&self, key: &String) -> u64 {
        KeyComparer::<str>::hash_key(self, key)
    }

    fn eq_keys(&self, a: &String, b: &String) -> bool {
        KeyComparer::<str>::eq_keys(self, a, b)
    }
}

/// Hashes integers to themselves, xored with a constant.
///
/// Hashes are predictable, so tests can reason about which bucket a key
/// lands in.
#[derive(Clone, Copy, Debug, Default)]
pub struct XorComparer;

impl KeyComparer<i32> for XorComparer {
    fn hash_key(&self, key: &i32) -> u64 {
        // Reinterpret as u32 so that the hash stays small.
        u64::from((*key ^ 89) as u32)
    }

    fn eq_keys(&self, a: &i32, b: &i32) -> bool {
        a == b
    }
}

/// Hashes every key to the same value, so that all keys share one chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct Colliding;

impl<K: Eq + ?Sized> KeyComparer<K> for Colliding {
    fn hash_key(&self, _key: &K) -> u64 {
        0
    }

    fn eq_keys(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// A comparer that panics when asked to hash one particular key, and can be
/// switched off again.
#[derive(Debug)]
pub struct Poisoned<K> {
    poison: K,
    armed: Cell<bool>,
}

impl<K> Poisoned<K> {
    pub fn new(poison: K) -> Self {
        Self { poison, armed: Cell::new(true) }
    }

    pub fn disarm(&self) {
        self.armed.set(false);
    }
}

impl<K: Hash + Eq> KeyComparer<K> for Poisoned<K> {
    fn hash_key(&self, key: &K) -> u64 {
        if self.armed.get() && *key == self.poison {
            panic!("poisoned key hashed");
        }
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn eq_keys(&self, a: &K, b: &K) -> bool {
        a == b
    }
}
