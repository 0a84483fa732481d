//! A hash map where every value is reachable through two independent keys.
//!
//! # Motivation
//!
//! Some data is naturally addressed in two ways. A color might be looked up
//! by its name or by a numeric id; a user by their login or by their email
//! address. A common approach is to keep two maps in sync:
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut by_name: HashMap<&str, u32> = HashMap::new();
//! let mut by_id: HashMap<u16, u32> = HashMap::new();
//!
//! by_name.insert("Fern", 0xFF71BC78);
//! by_id.insert(48, 0xFF71BC78);
//! ```
//!
//! But nothing ties the two maps together. Removing `"Fern"` from one map
//! leaves `48` behind in the other, updating one copy of the value leaves the
//! other stale, and two different names can silently claim the same id.
//!
//! [`TwoKeyMap`] stores each `(key_a, key_b, value)` [`Triple`] exactly once
//! and indexes it by both keys:
//!
//! ```
//! # #[cfg(feature = "default-hasher")] {
//! use twokey::{KeyKind, TwoKeyMap};
//!
//! let mut colors = TwoKeyMap::new();
//! colors.add("AbaloneShell", 0_u16, 0xFFDBC7BD_u32).unwrap();
//! colors.add("AbbeyWhite", 1, 0xFFECE5D0).unwrap();
//!
//! // Both keys reach the same value.
//! assert_eq!(colors.get_a("AbaloneShell"), Some(&0xFFDBC7BD));
//! assert_eq!(colors.get_b(&0), Some(&0xFFDBC7BD));
//!
//! // Each key space is unique on its own.
//! let error = colors.add("Abyss", 1, 0xFFE0E6EB).unwrap_err();
//! assert_eq!(error.kind(), KeyKind::B);
//!
//! // Removing by one key removes the paired key too.
//! assert!(colors.remove_a("AbaloneShell"));
//! assert!(!colors.contains_key_b(&0));
//! assert_eq!(colors.len(), 1);
//! # }
//! ```
//!
//! # Features
//!
//! - `default-hasher` (default): use [`foldhash`] as the default hasher.
//! - `std` (default): enable `std` support in dependencies. This crate is
//!   `no_std` + `alloc` otherwise.
//! - `serde`: serialize and deserialize maps and triples.
//! - `proptest`: `Arbitrary` implementations for maps.
//! - `tracing`: emit [`tracing`] events for structural changes.
//!
//! [`foldhash`]: https://docs.rs/foldhash
//! [`tracing`]: https://docs.rs/tracing

#![no_std]
#![cfg_attr(doc_cfg, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod capability;
pub mod errors;
#[doc(hidden)]
pub mod internal;
mod macros;
mod support;
mod triple;
pub mod two_key_map;

pub use capability::{Enumerable, KeyLookup, MutableContainer};
pub use errors::{DuplicateKey, KeyKind, TwoKeyError};
pub use support::{
    comparer::{HashComparer, KeyComparer},
    hash_builder::DefaultHashBuilder,
    primes::MAX_PRIME_CAPACITY,
};
pub use triple::Triple;
pub use two_key_map::{Cursor, DynTwoKeyMap, TwoKeyMap};
