use std::fmt;

/// Asserts that `a` and `b` are equal, in both directions, and that each is
/// equal to itself.
///
/// `TwoKeyMap` equality ignores slot order, so it is computed by probing one
/// map with the other's keys. That isn't obviously symmetric, hence both
/// directions.
#[allow(clippy::eq_op)]
pub fn assert_eq_props<T: Eq + fmt::Debug>(a: T, b: T) {
    assert_eq!(a, a, "a == a");
    assert_eq!(b, b, "b == b");
    assert_eq!(a, b, "a == b");
    assert_eq!(b, a, "b == a");
}

/// Asserts that `a` and `b` differ, in both directions, while each is still
/// equal to itself.
#[allow(clippy::eq_op)]
pub fn assert_ne_props<T: Eq + fmt::Debug>(a: T, b: T) {
    assert_eq!(a, a, "a == a");
    assert_eq!(b, b, "b == b");
    assert_ne!(a, b, "a != b");
    assert_ne!(b, a, "b != a");
}
