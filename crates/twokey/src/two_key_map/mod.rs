//! A hash map with two independent unique keys per value.
//!
//! For more information, see [`TwoKeyMap`].

pub mod cursor;
pub(crate) mod dyn_map;
pub(crate) mod imp;
mod iter;
#[cfg(feature = "proptest")]
mod proptest_impls;
#[cfg(feature = "serde")]
mod serde_impls;
mod tables;
mod views;

pub use cursor::Cursor;
pub use dyn_map::DynTwoKeyMap;
pub use imp::TwoKeyMap;
pub use iter::{Drain, IntoIter, Iter, IterMut, Projected};
#[cfg(feature = "proptest")]
pub use proptest_impls::TwoKeyMapParams;
pub use views::{KeysA, KeysB, Values};
