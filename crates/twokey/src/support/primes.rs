//! Prime bucket counts.
//!
//! Chain tables are sized to primes so that `hash % len` spreads keys well
//! even when the low bits of the hash are poorly distributed.

/// The largest capacity a [`TwoKeyMap`](crate::TwoKeyMap) can grow to.
///
/// Requests above this fail with
/// [`TwoKeyError::InvalidArgument`](crate::TwoKeyError::InvalidArgument), and
/// automatic growth stops here.
pub const MAX_PRIME_CAPACITY: usize = 0x7FEF_FFFD;

// Roughly 1.2x apart, so that growth by doubling lands close to a table entry.
static PRIMES: [usize; 72] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293,
    353, 431, 521, 631, 761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371,
    4049, 4861, 5839, 7013, 8419, 10103, 12143, 14591, 17519, 21023, 25229,
    30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631, 130363, 156437,
    187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899,
    4166287, 4999559, 5999471, 7199369,
];

// Beyond the table, candidates n with (n - 1) % HASH_PRIME == 0 are skipped:
// a chain table sized like that degrades badly for hashes that step by
// HASH_PRIME.
const HASH_PRIME: usize = 101;

pub(crate) fn is_prime(candidate: usize) -> bool {
    if candidate & 1 == 0 {
        return candidate == 2;
    }
    let mut divisor = 3;
    while divisor <= candidate / divisor {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest usable prime that is at least `min`.
///
/// Never returns less than 3.
pub(crate) fn get_prime(min: usize) -> usize {
    if let Some(&prime) = PRIMES.iter().find(|&&p| p >= min) {
        return prime;
    }

    let mut candidate = min | 1;
    while candidate < usize::MAX {
        if is_prime(candidate) && (candidate - 1) % HASH_PRIME != 0 {
            return candidate;
        }
        candidate += 2;
    }
    min
}

/// Returns the capacity to grow to from `old`: the smallest usable prime at
/// least twice as large, capped at [`MAX_PRIME_CAPACITY`].
pub(crate) fn expand_prime(old: usize) -> usize {
    let doubled = old.saturating_mul(2);
    if doubled > MAX_PRIME_CAPACITY && old < MAX_PRIME_CAPACITY {
        return MAX_PRIME_CAPACITY;
    }
    get_prime(doubled)
}
