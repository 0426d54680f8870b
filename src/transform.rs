//! Construction helpers: idempotent wrapping and deferred building.
//!
//! Realization helpers (`force_all`, `freeze*`) live on
//! [`LazyMap`](crate::LazyMap) itself.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::map::LazyMap;
use crate::slot::Slot;

/// Conversion into a [`LazyMap`] that never double-wraps.
///
/// A `LazyMap` converts to itself; raw maps of [`Slot`]s are stored slot
/// by slot, as tagged. No conversion forces anything.
pub trait IntoLazyMap {
    /// Key type of the resulting map.
    type Key;
    /// Value type of the resulting map.
    type Value;

    /// Performs the conversion.
    fn into_lazy_map(self) -> LazyMap<Self::Key, Self::Value>;
}

impl<K, V> IntoLazyMap for LazyMap<K, V> {
    type Key = K;
    type Value = V;

    fn into_lazy_map(self) -> Self {
        self
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S> IntoLazyMap for HashMap<K, Slot<V>, S> {
    type Key = K;
    type Value = V;

    fn into_lazy_map(self) -> LazyMap<K, V> {
        LazyMap::from_raw(self)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> IntoLazyMap for BTreeMap<K, Slot<V>> {
    type Key = K;
    type Value = V;

    fn into_lazy_map(self) -> LazyMap<K, V> {
        LazyMap::from_raw(self)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> IntoLazyMap for Vec<(K, Slot<V>)> {
    type Key = K;
    type Value = V;

    fn into_lazy_map(self) -> LazyMap<K, V> {
        LazyMap::from_raw(self)
    }
}

/// Wraps `map` as a [`LazyMap`], returning an existing `LazyMap` unchanged.
///
/// `wrap(wrap(m))` shares its root with `wrap(m)`.
pub fn wrap<M: IntoLazyMap>(map: M) -> LazyMap<M::Key, M::Value> {
    map.into_lazy_map()
}

/// Builds a map where every value is a fresh deferred computation.
///
/// None of the computations run here; each runs at most once, on first
/// access of its key. See also [`lazy_map!`](crate::lazy_map).
pub fn build_lazy<K, V, F, I>(pairs: I) -> LazyMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnOnce() -> V + Send + 'static,
    I: IntoIterator<Item = (K, F)>,
{
    LazyMap::from_raw(pairs.into_iter().map(|(key, f)| (key, Slot::deferred(f))))
}

/// Builds a [`LazyMap`] whose values are deferred expressions.
///
/// Keys are evaluated immediately; each value expression is captured by a
/// `move` closure and evaluated at most once, on first access.
///
/// ```
/// use lazy_champ::lazy_map;
///
/// let map = lazy_map! {
///     "answer" => 6 * 7,
///     "greeting" => String::from("hi").len() as i32,
/// };
/// assert_eq!(map.is_realized("answer"), Some(false));
/// assert_eq!(map.get("answer"), Some(&42));
/// ```
#[macro_export]
macro_rules! lazy_map {
    () => {
        $crate::LazyMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::LazyMap::from_raw([
            $(($key, $crate::Slot::deferred(move || $value))),+
        ])
    };
}
