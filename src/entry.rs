//! Borrowed key/value views over a lazy map.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::LazyMapError;
use crate::placeholder::Placeholder;
use crate::slot::Slot;

/// One `(key, slot)` pair of a [`LazyMap`](crate::LazyMap).
///
/// Reading the key never forces. Reading the value by any path
/// ([`value`](Self::value), [`nth(1)`](Self::nth), [`into_pair`](Self::into_pair),
/// comparison, hashing) forces the slot if it is deferred.
pub struct LazyEntry<'a, K, V> {
    key: &'a K,
    slot: &'a Slot<V>,
}

/// A position of a [`LazyEntry`] accessed by index.
#[derive(Debug, PartialEq, Eq)]
pub enum EntryPart<'a, K, V> {
    /// Index 0.
    Key(&'a K),
    /// Index 1.
    Value(&'a V),
}

impl<'a, K, V> LazyEntry<'a, K, V> {
    pub(crate) const fn new(key: &'a K, slot: &'a Slot<V>) -> Self {
        Self { key, slot }
    }

    /// Returns the key.
    #[must_use]
    pub const fn key(&self) -> &'a K {
        self.key
    }

    /// Returns the underlying slot without forcing it.
    #[must_use]
    pub const fn slot(&self) -> &'a Slot<V> {
        self.slot
    }

    /// Returns the value, forcing the slot on first access.
    ///
    /// # Panics
    ///
    /// See [`Deferred::force`](crate::Deferred::force).
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.slot.value()
    }

    /// Returns the value, forcing the slot on first access.
    ///
    /// # Errors
    ///
    /// Returns [`LazyMapError::Poisoned`] if the computation panicked earlier.
    pub fn try_value(&self) -> Result<&'a V, LazyMapError> {
        self.slot.try_value()
    }

    /// Returns `true` if the value is available without running anything.
    #[must_use]
    pub fn is_realized(&self) -> bool {
        self.slot.is_realized()
    }

    /// Converts to a `(key, value)` pair, forcing the value.
    #[must_use]
    pub fn into_pair(self) -> (&'a K, &'a V) {
        (self.key, self.value())
    }

    /// Indexed access: `0` is the key, `1` the (forced) value.
    ///
    /// # Errors
    ///
    /// Returns [`LazyMapError::IndexOutOfRange`] for any other index, and
    /// [`LazyMapError::Poisoned`] if index `1` hits a poisoned slot.
    pub fn nth(&self, index: usize) -> Result<EntryPart<'a, K, V>, LazyMapError> {
        match index {
            0 => Ok(EntryPart::Key(self.key)),
            1 => self.try_value().map(EntryPart::Value),
            _ => Err(LazyMapError::IndexOutOfRange { index }),
        }
    }

    /// Renders `[key, value]` with the canonical placeholder in place of a
    /// pending value. Never forces.
    #[must_use]
    pub fn to_display_string(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        format!("{self:?}")
    }
}

// Manual impls avoid the `K: Clone, V: Clone` bounds a derive would add.

impl<K, V> Clone for LazyEntry<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for LazyEntry<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LazyEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entry(self.key)
            .entry(&self.slot.freeze(&Placeholder::UNREALIZED))
            .finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LazyEntry<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value() == other.value()
    }
}

impl<K: Eq, V: Eq> Eq for LazyEntry<'_, K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for LazyEntry<'_, K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.key, self.value()).partial_cmp(&(other.key, other.value()))
    }
}

impl<K: Ord, V: Ord> Ord for LazyEntry<'_, K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.key, self.value()).cmp(&(other.key, other.value()))
    }
}

impl<K: Hash, V: Hash> Hash for LazyEntry<'_, K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.key, self.value()).hash(state);
    }
}
