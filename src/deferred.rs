//! Memoized, thread-safe, compute-once value cell.

use std::fmt;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::error::LazyMapError;
use crate::placeholder::Placeholder;

type Thunk<V> = Box<dyn FnOnce() -> V + Send>;

/// A value computed on first access and cached forever after.
///
/// The computation runs at most once. Concurrent callers of
/// [`force`](Self::force) block while a single winner runs it, then all
/// observe the same cached value.
///
/// If the computation panics, the panic unwinds to the caller that forced
/// it and the cell becomes poisoned: the computation is not retried, and
/// later forces report [`LazyMapError::Poisoned`]. Computations that fail in
/// an ordinary way should return a `Result` as their value, which is then
/// cached like any other value.
///
/// Forcing a cell from inside its own computation deadlocks.
pub struct Deferred<V> {
    value: OnceCell<V>,
    thunk: Mutex<Option<Thunk<V>>>,
}

impl<V> Deferred<V> {
    /// Creates a pending cell. `f` is not called until the first force.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
    {
        Self {
            value: OnceCell::new(),
            thunk: Mutex::new(Some(Box::new(f))),
        }
    }

    /// Creates a cell that is already realized with `value`.
    #[must_use]
    pub fn realized(value: V) -> Self {
        Self {
            value: OnceCell::with_value(value),
            thunk: Mutex::new(None),
        }
    }

    /// Returns the value, running the computation if this is the first force.
    ///
    /// # Panics
    ///
    /// Propagates a panic raised by the computation, and panics if an earlier
    /// force already panicked (see [`try_force`](Self::try_force)).
    pub fn force(&self) -> &V {
        match self.try_force() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the value, running the computation if this is the first force.
    ///
    /// # Errors
    ///
    /// Returns [`LazyMapError::Poisoned`] if the computation panicked during
    /// an earlier force.
    pub fn try_force(&self) -> Result<&V, LazyMapError> {
        self.value.get_or_try_init(|| {
            let Some(thunk) = self.thunk.lock().take() else {
                tracing::debug!("forced a poisoned deferred value");
                return Err(LazyMapError::Poisoned);
            };
            tracing::trace!("running deferred computation");
            let value = thunk();
            tracing::trace!("deferred computation realized");
            Ok(value)
        })
    }

    /// Returns `true` once the computation has run to completion.
    #[must_use]
    pub fn is_realized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns the cached value without ever running the computation.
    #[must_use]
    pub fn peek(&self) -> Option<&V> {
        self.value.get()
    }
}

impl<V: fmt::Debug> fmt::Debug for Deferred<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Deferred");
        match self.peek() {
            Some(value) => tuple.field(value),
            None => tuple.field(&Placeholder::UNREALIZED),
        };
        tuple.finish()
    }
}
