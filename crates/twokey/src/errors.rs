//! Error types for this crate.

use crate::Triple;
use alloc::string::String;
use core::fmt;

/// Which of the two key spaces of a [`TwoKeyMap`](crate::TwoKeyMap) an
/// operation or error refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum KeyKind {
    /// The A-key space.
    A,
    /// The B-key space.
    B,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::A => f.write_str("A-key"),
            KeyKind::B => f.write_str("B-key"),
        }
    }
}

/// A triple could not be added because one of its keys is already present.
///
/// The map is left unmodified, and the rejected triple is handed back.
pub struct DuplicateKey<A, B, V> {
    kind: KeyKind,
    new: Triple<A, B, V>,
}

impl<A, B, V> DuplicateKey<A, B, V> {
    pub(crate) fn new(kind: KeyKind, new: Triple<A, B, V>) -> Self {
        Self { kind, new }
    }

    /// Returns which key collided with an existing triple.
    ///
    /// If both keys are already present, this is [`KeyKind::A`].
    #[inline]
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Returns the triple that was attempted to be added.
    #[inline]
    pub fn new_triple(&self) -> &Triple<A, B, V> {
        &self.new
    }

    /// Converts self into the rejected triple.
    #[inline]
    pub fn into_triple(self) -> Triple<A, B, V> {
        self.new
    }
}

impl<A: fmt::Debug, B: fmt::Debug, V> fmt::Debug for DuplicateKey<A, B, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The value is left out: it plays no part in the conflict, and
        // leaving it out means V doesn't need to be Debug.
        f.debug_struct("DuplicateKey")
            .field("kind", &self.kind)
            .field("key_a", self.new.key_a())
            .field("key_b", self.new.key_b())
            .finish_non_exhaustive()
    }
}

impl<A: fmt::Debug, B: fmt::Debug, V> fmt::Display for DuplicateKey<A, B, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            KeyKind::A => write!(
                f,
                "duplicate A-key {:?} (while adding B-key {:?})",
                self.new.key_a(),
                self.new.key_b(),
            ),
            KeyKind::B => write!(
                f,
                "duplicate B-key {:?} (while adding A-key {:?})",
                self.new.key_b(),
                self.new.key_a(),
            ),
        }
    }
}

impl<A: fmt::Debug, B: fmt::Debug, V> core::error::Error
    for DuplicateKey<A, B, V>
{
}

/// Errors reported by [`TwoKeyMap`](crate::TwoKeyMap), its cursors and its
/// views.
///
/// Each variant corresponds to one kind of failure. Every failed operation
/// leaves the map exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TwoKeyError {
    /// A key was absent where one is required.
    ///
    /// Typed Rust keys can never be null, so this is only produced by the
    /// type-erased [`DynTwoKeyMap`](crate::DynTwoKeyMap) path and by
    /// deserialization. The kind is `None` when the role of the missing key
    /// could not be determined.
    NullKey(Option<KeyKind>),

    /// A key of the given kind is already present.
    DuplicateKey(KeyKind),

    /// No triple has the requested key.
    KeyNotFound(KeyKind),

    /// An argument was out of range or otherwise malformed.
    InvalidArgument(String),

    /// The map was structurally modified after a cursor was created.
    ConcurrentModification,

    /// A mutation was attempted through a read-only view.
    UnsupportedOperation(&'static str),

    /// The operation is not valid in the current state, or a value of the
    /// wrong runtime type was supplied.
    InvalidOperation(String),

    /// Serialized data is missing a required part.
    MissingData(&'static str),
}

impl TwoKeyError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        TwoKeyError::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_operation(msg: impl Into<String>) -> Self {
        TwoKeyError::InvalidOperation(msg.into())
    }
}

impl fmt::Display for TwoKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoKeyError::NullKey(Some(kind)) => write!(f, "{kind} is null"),
            TwoKeyError::NullKey(None) => f.write_str("key is null"),
            TwoKeyError::DuplicateKey(kind) => {
                write!(f, "an entry with the same {kind} already exists")
            }
            TwoKeyError::KeyNotFound(kind) => {
                write!(f, "the given {kind} was not present in the map")
            }
            TwoKeyError::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            TwoKeyError::ConcurrentModification => f.write_str(
                "map was modified after the cursor was created; \
                 enumeration cannot continue",
            ),
            TwoKeyError::UnsupportedOperation(msg) => {
                write!(f, "unsupported operation: {msg}")
            }
            TwoKeyError::InvalidOperation(msg) => {
                write!(f, "invalid operation: {msg}")
            }
            TwoKeyError::MissingData(what) => {
                write!(f, "serialized data is missing {what}")
            }
        }
    }
}

impl core::error::Error for TwoKeyError {}

impl<A, B, V> From<DuplicateKey<A, B, V>> for TwoKeyError {
    fn from(error: DuplicateKey<A, B, V>) -> Self {
        TwoKeyError::DuplicateKey(error.kind)
    }
}
