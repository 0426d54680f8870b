//! Value positions of a lazy map: eager or deferred.

use std::fmt;
use std::sync::Arc;

use crate::deferred::Deferred;
use crate::error::LazyMapError;
use crate::placeholder::{Frozen, Placeholder};

/// A stored value, tagged as already available or deferred.
///
/// The tag is fixed at construction. Only the underlying [`Deferred`] may
/// transition from pending to realized. Cloning a deferred slot shares the
/// cell, so every map version holding it sees one memoized result.
pub enum Slot<V> {
    /// A concrete value.
    Eager(V),
    /// A computation run on first access.
    Deferred(Arc<Deferred<V>>),
}

impl<V> Slot<V> {
    /// Wraps a concrete value.
    pub const fn eager(value: V) -> Self {
        Self::Eager(value)
    }

    /// Wraps `f` in a fresh pending [`Deferred`].
    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
    {
        Self::Deferred(Arc::new(Deferred::new(f)))
    }

    /// Returns the value, forcing a deferred slot.
    ///
    /// # Panics
    ///
    /// See [`Deferred::force`].
    pub fn value(&self) -> &V {
        match self {
            Self::Eager(value) => value,
            Self::Deferred(cell) => cell.force(),
        }
    }

    /// Returns the value, forcing a deferred slot.
    ///
    /// # Errors
    ///
    /// Returns [`LazyMapError::Poisoned`] if the computation panicked earlier.
    pub fn try_value(&self) -> Result<&V, LazyMapError> {
        match self {
            Self::Eager(value) => Ok(value),
            Self::Deferred(cell) => cell.try_force(),
        }
    }

    /// Returns the value if it is available without running anything.
    #[must_use]
    pub fn peek(&self) -> Option<&V> {
        match self {
            Self::Eager(value) => Some(value),
            Self::Deferred(cell) => cell.peek(),
        }
    }

    /// Returns `true` if this slot was constructed deferred.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Returns `true` if the value is available without running anything.
    #[must_use]
    pub fn is_realized(&self) -> bool {
        match self {
            Self::Eager(_) => true,
            Self::Deferred(cell) => cell.is_realized(),
        }
    }

    /// Returns the value if available, `placeholder` otherwise. Never forces.
    #[must_use]
    pub fn freeze(&self, placeholder: &Placeholder) -> Frozen<&V> {
        self.peek()
            .map_or_else(|| Frozen::Unrealized(placeholder.clone()), Frozen::Realized)
    }
}

impl<V: Clone> Clone for Slot<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Eager(value) => Self::Eager(value.clone()),
            Self::Deferred(cell) => Self::Deferred(Arc::clone(cell)),
        }
    }
}

impl<V> From<Deferred<V>> for Slot<V> {
    fn from(cell: Deferred<V>) -> Self {
        Self::Deferred(Arc::new(cell))
    }
}

impl<V> From<Arc<Deferred<V>>> for Slot<V> {
    fn from(cell: Arc<Deferred<V>>) -> Self {
        Self::Deferred(cell)
    }
}

impl<V: fmt::Debug> fmt::Debug for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(value) => f.debug_tuple("Eager").field(value).finish(),
            Self::Deferred(cell) => fmt::Debug::fmt(cell, f),
        }
    }
}
