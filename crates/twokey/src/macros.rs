//! Macros for this crate.

/// Creates a [`TwoKeyMap`](crate::TwoKeyMap) from a list of triples.
///
/// Each entry is written `key_a, key_b => value`. Entries are added in
/// order.
///
/// # Panics
///
/// Panics if two entries share an A-key or a B-key.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use twokey::two_key_map;
///
/// let map = two_key_map! {
///     "AbaloneShell", 0 => 0xFFDBC7BD_u32,
///     "AbbeyWhite", 1 => 0xFFECE5D0,
/// };
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get_b(&1), Some(&0xFFECE5D0));
/// # }
/// ```
///
/// Custom comparers go first, in parentheses:
///
/// ```
/// use twokey::{HashComparer, two_key_map};
/// # use std::hash::RandomState;
///
/// let map = two_key_map! {
///     comparers = (
///         HashComparer::with_hasher(RandomState::new()),
///         HashComparer::with_hasher(RandomState::new()),
///     );
///     "Fern", 48 => "#71BC78",
/// };
/// assert_eq!(map.get_a("Fern"), Some(&"#71BC78"));
/// ```
#[macro_export]
macro_rules! two_key_map {
    (comparers = ($ca:expr, $cb:expr $(,)?); $($a:expr, $b:expr => $v:expr),* $(,)?) => {{
        let mut map = $crate::TwoKeyMap::with_comparers($ca, $cb);
        $(
            if let Err(error) = map.add($a, $b, $v) {
                panic!("two_key_map! literal has a duplicate {}", error.kind());
            }
        )*
        map
    }};
    ($($a:expr, $b:expr => $v:expr),* $(,)?) => {{
        let mut map = $crate::TwoKeyMap::new();
        $(
            if let Err(error) = map.add($a, $b, $v) {
                panic!("two_key_map! literal has a duplicate {}", error.kind());
            }
        )*
        map
    }};
}

/// Emits a `tracing` event if the `tracing` feature is enabled, and
/// nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!(target: "twokey", $($arg)+);
        }
    };
}

pub(crate) use trace_event;
