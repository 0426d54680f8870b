//! `AdHash`: incremental structural hashing.
//!
//! The trie maintains `φ(S) = Σ g(k)` over its key set only, so structural
//! updates never have to look at (and therefore never force) a value.
//! Hashing a whole map mixes in forced values via [`entry_adhash`].
//! Two mixing seeds prevent degeneration when `hash(v) = 0`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// First mixing seed (golden ratio constant).
const SEED_1: u64 = 0x9E37_79B9_7F4A_7C15;

/// Second mixing seed (large prime).
const SEED_2: u64 = 0x517C_C1B7_2722_0A95;

/// Computes the 64-bit hash of a value using the standard hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Computes the `AdHash` contribution of a key alone.
///
/// `g(k) = key_hash · SEED₁`
#[must_use]
pub const fn key_adhash(key_hash: u64) -> u64 {
    key_hash.wrapping_mul(SEED_1)
}

/// Computes the `AdHash` contribution of a key together with its value.
///
/// `f(k, v) = key_hash · SEED₁ ⊕ value_hash · SEED₂`
#[must_use]
pub const fn entry_adhash(key_hash: u64, value_hash: u64) -> u64 {
    key_adhash(key_hash) ^ value_hash.wrapping_mul(SEED_2)
}
