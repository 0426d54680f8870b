use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Slot;

mod collision;
mod completeness;
mod display;
mod equality;

/// A deferred slot yielding `value` that bumps `calls` each time it runs.
fn counted<V: Send + 'static>(calls: &Arc<AtomicUsize>, value: V) -> Slot<V> {
    let calls = Arc::clone(calls);
    Slot::deferred(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        value
    })
}

/// Current value of a call counter.
fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
