//! Error type for lazy-map operations.

/// Errors surfaced by the fallible (`try_*`) lazy-map accessors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyMapError {
    /// The deferred computation panicked the first time it was forced.
    ///
    /// The computation is consumed by that first attempt and is never
    /// re-run; every later force reports this error.
    #[error("deferred computation panicked during an earlier force")]
    Poisoned,
    /// A map entry was indexed at a position other than 0 (key) or 1 (value).
    #[error("index {index} out of range for a map entry (expected 0 or 1)")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
    },
}
