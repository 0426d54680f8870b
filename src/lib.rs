//! Persistent hash map with lazily computed values, based on CHAMP.
//!
//! A [`LazyMap`] is an immutable associative container whose values are
//! either available immediately or deferred computations. A deferred value
//! is computed at most once, on first access, then cached. Every version of
//! a map derived from another shares its deferred cells, so forcing a value
//! through one version realizes it for all of them.
//!
//! # Key properties
//!
//! - **Structural laziness**: insert, remove, membership, length and key
//!   iteration never force a value
//! - **At-most-once**: each [`Deferred`] runs its computation once, even
//!   under concurrent access
//! - **Unbuffered iteration**: consuming `k` values forces exactly `k` slots
//! - **Conventional equality**: `==` and `Hash` behave as if every value
//!   were forced, and compare against plain `HashMap`s
//! - **Freeze without forcing**: pending values can be snapshotted as
//!   [`Placeholder`]s; `Debug` output does exactly that
//! - **Persistent**: `Arc`-shared CHAMP nodes, path-copy updates, canonical
//!   form with an incrementally maintained key `AdHash`
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use lazy_champ::{LazyMap, Slot};
//!
//! let map = LazyMap::new()
//!     .insert("a", 1)
//!     .insert_slot("b", Slot::deferred(|| 2));
//!
//! assert!(map.to_display_string().contains("\"b\": <unrealized>"));
//! assert_eq!(map.get("b"), Some(&2));
//! assert!(map.to_display_string().contains("\"b\": 2"));
//! ```
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015, "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001, "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod adhash;
pub mod iter;
pub mod node;
pub mod transform;

mod deferred;
mod entry;
mod error;
mod map;
mod ops;
mod placeholder;
mod slot;

#[cfg(test)]
mod tests;

pub use deferred::Deferred;
pub use entry::{EntryPart, LazyEntry};
pub use error::LazyMapError;
pub use map::LazyMap;
pub use placeholder::{Frozen, Placeholder};
pub use slot::Slot;
pub use transform::{IntoLazyMap, build_lazy, wrap};
