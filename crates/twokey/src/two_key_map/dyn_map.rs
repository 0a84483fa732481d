//! Type-erased access to a [`TwoKeyMap`].

use super::TwoKeyMap;
use crate::{support::comparer::KeyComparer, KeyKind, TwoKeyError};
use alloc::{boxed::Box, format};
use core::any::{type_name, Any};

/// Object-safe access to a [`TwoKeyMap`] through [`Any`] keys and values.
///
/// This is for callers that only know the key and value types at runtime,
/// such as plugin hosts or scripting bridges. Keys are passed as `Option`s:
/// `None` stands for a missing key and is reported as
/// [`TwoKeyError::NullKey`].
///
/// A key is tried as an A-key first and then as a B-key, by its runtime type.
/// When `A` and `B` are the same type, single-key methods therefore only
/// ever address A-keys.
///
/// # Errors
///
/// - A missing key: [`TwoKeyError::NullKey`].
/// - A key whose type is neither `A` nor `B`, or a key or value of the wrong
///   type passed to [`add_dyn`](Self::add_dyn):
///   [`TwoKeyError::InvalidArgument`].
/// - A value of the wrong type passed to [`set_dyn`](Self::set_dyn):
///   [`TwoKeyError::InvalidOperation`].
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use std::any::Any;
/// use twokey::{DynTwoKeyMap, TwoKeyError, TwoKeyMap};
///
/// let mut map = TwoKeyMap::<String, u32, f64>::new();
/// let map: &mut dyn DynTwoKeyMap = &mut map;
///
/// map.add_dyn(
///     Some(Box::new("half".to_string())),
///     Some(Box::new(2_u32)),
///     Box::new(0.5_f64),
/// )
/// .unwrap();
///
/// let value = map.get_dyn(Some(&2_u32 as &dyn Any)).unwrap();
/// assert_eq!(value.downcast_ref::<f64>(), Some(&0.5));
///
/// assert!(matches!(map.get_dyn(None), Err(TwoKeyError::NullKey(None))));
/// # }
/// ```
pub trait DynTwoKeyMap {
    /// Returns the number of triples.
    fn len_dyn(&self) -> usize;

    /// Returns true if the key is present, as an A-key or as a B-key.
    fn contains_dyn(&self, key: Option<&dyn Any>) -> Result<bool, TwoKeyError>;

    /// Gets the value for a key, failing with [`TwoKeyError::KeyNotFound`]
    /// if it is absent.
    fn get_dyn(&self, key: Option<&dyn Any>) -> Result<&dyn Any, TwoKeyError>;

    /// Replaces the value for a key, failing with
    /// [`TwoKeyError::KeyNotFound`] if it is absent.
    fn set_dyn(
        &mut self,
        key: Option<&dyn Any>,
        value: Box<dyn Any>,
    ) -> Result<(), TwoKeyError>;

    /// Adds a triple, failing with [`TwoKeyError::DuplicateKey`] if either
    /// key is already present.
    fn add_dyn(
        &mut self,
        key_a: Option<Box<dyn Any>>,
        key_b: Option<Box<dyn Any>>,
        value: Box<dyn Any>,
    ) -> Result<(), TwoKeyError>;

    /// Removes the triple for a key, returning whether one was removed.
    fn remove_dyn(&mut self, key: Option<&dyn Any>) -> Result<bool, TwoKeyError>;
}

/// A key resolved to one of the two key types.
enum DynKey<'k, A, B> {
    A(&'k A),
    B(&'k B),
}

fn resolve_key<'k, A: 'static, B: 'static>(
    key: Option<&'k dyn Any>,
) -> Result<DynKey<'k, A, B>, TwoKeyError> {
    let key = key.ok_or(TwoKeyError::NullKey(None))?;
    if let Some(key_a) = key.downcast_ref::<A>() {
        Ok(DynKey::A(key_a))
    } else if let Some(key_b) = key.downcast_ref::<B>() {
        Ok(DynKey::B(key_b))
    } else {
        Err(TwoKeyError::invalid_argument(format!(
            "key is neither an A-key ({}) nor a B-key ({})",
            type_name::<A>(),
            type_name::<B>(),
        )))
    }
}

fn downcast_key<K: 'static>(
    key: Option<Box<dyn Any>>,
    kind: KeyKind,
) -> Result<K, TwoKeyError> {
    let key = key.ok_or(TwoKeyError::NullKey(Some(kind)))?;
    key.downcast::<K>().map(|key| *key).map_err(|_| {
        TwoKeyError::invalid_argument(format!(
            "{kind} is not of type {}",
            type_name::<K>(),
        ))
    })
}

impl<A, B, V, CA, CB> DynTwoKeyMap for TwoKeyMap<A, B, V, CA, CB>
where
    A: 'static,
    B: 'static,
    V: 'static,
    CA: KeyComparer<A>,
    CB: KeyComparer<B>,
{
    fn len_dyn(&self) -> usize {
        self.len()
    }

    fn contains_dyn(&self, key: Option<&dyn Any>) -> Result<bool, TwoKeyError> {
        Ok(match resolve_key::<A, B>(key)? {
            DynKey::A(key_a) => self.contains_key_a(key_a),
            DynKey::B(key_b) => self.contains_key_b(key_b),
        })
    }

    fn get_dyn(&self, key: Option<&dyn Any>) -> Result<&dyn Any, TwoKeyError> {
        let value = match resolve_key::<A, B>(key)? {
            DynKey::A(key_a) => self.value_a(key_a)?,
            DynKey::B(key_b) => self.value_b(key_b)?,
        };
        Ok(value as &dyn Any)
    }

    fn set_dyn(
        &mut self,
        key: Option<&dyn Any>,
        value: Box<dyn Any>,
    ) -> Result<(), TwoKeyError> {
        // Resolve the key first, so that a missing key is reported as such
        // even when the value is also bad.
        let key = resolve_key::<A, B>(key)?;
        let value = value.downcast::<V>().map_err(|_| {
            TwoKeyError::invalid_operation(format!(
                "value is not of type {}",
                type_name::<V>(),
            ))
        })?;
        match key {
            DynKey::A(key_a) => self.set_a(key_a, *value)?,
            DynKey::B(key_b) => self.set_b(key_b, *value)?,
        };
        Ok(())
    }

    fn add_dyn(
        &mut self,
        key_a: Option<Box<dyn Any>>,
        key_b: Option<Box<dyn Any>>,
        value: Box<dyn Any>,
    ) -> Result<(), TwoKeyError> {
        let key_a = downcast_key::<A>(key_a, KeyKind::A)?;
        let key_b = downcast_key::<B>(key_b, KeyKind::B)?;
        let value = value.downcast::<V>().map_err(|_| {
            TwoKeyError::invalid_argument(format!(
                "value is not of type {}",
                type_name::<V>(),
            ))
        })?;
        self.add(key_a, key_b, *value)?;
        Ok(())
    }

    fn remove_dyn(&mut self, key: Option<&dyn Any>) -> Result<bool, TwoKeyError> {
        Ok(match resolve_key::<A, B>(key)? {
            DynKey::A(key_a) => self.remove_a(key_a),
            DynKey::B(key_b) => self.remove_b(key_b),
        })
    }
}
