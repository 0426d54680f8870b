//! Persistent lazy map.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::ops;
use std::sync::Arc;

use crate::adhash;
use crate::deferred::Deferred;
use crate::entry::LazyEntry;
use crate::error::LazyMapError;
use crate::iter::{Entries, Keys, RawIter, Values};
use crate::node::{Entry, Node};
use crate::ops::get::get_recursive;
use crate::ops::insert::insert_recursive;
use crate::ops::remove::{RemoveOutcome, remove_recursive};
use crate::placeholder::{Frozen, Placeholder};
use crate::slot::Slot;

/// Persistent hash map whose values may be deferred computations.
///
/// Backed by a CHAMP trie with [`Arc`]-shared nodes: cloning is O(1), and
/// [`insert`](Self::insert)/[`remove`](Self::remove) return a new map that
/// shares every untouched subtree with the original.
///
/// Structural operations (insert, remove, membership, length, key
/// iteration) never force a value. Reading a value forces only that value,
/// at most once across every map version sharing its slot. Equality and
/// hashing behave as if every value were forced.
pub struct LazyMap<K, V> {
    root: Option<Arc<Node<K, Slot<V>>>>,
    size: usize,
    adhash: u64,
}

// ---------------------------------------------------------------------------
// Construction & accessors: no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> LazyMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            size: 0,
            adhash: 0,
        }
    }

    /// Returns the number of entries. Never forces.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the `AdHash` of the key set.
    ///
    /// Same key set = same value, regardless of insertion order. Values do
    /// not contribute, so this never forces.
    #[must_use]
    pub const fn key_adhash(&self) -> u64 {
        self.adhash
    }

    /// Returns `true` if both maps share the same root (or are both empty).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns an iterator over [`LazyEntry`] views. Never forces.
    #[must_use]
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.raw_iter())
    }

    /// Returns an iterator over the keys. Never forces.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.raw_iter())
    }

    /// Returns an iterator over the values, forcing each as it is yielded.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.raw_iter())
    }

    /// Folds `(acc, key, value)` over every entry in map order, forcing
    /// every value.
    pub fn fold_with_key<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, &K, &V) -> B,
    {
        self.raw_iter()
            .fold(init, |acc, e| f(acc, &e.key, e.value.value()))
    }

    /// Folds `(acc, value)` over every value in map order, forcing every value.
    pub fn reduce<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, &V) -> B,
    {
        self.values().fold(init, f)
    }

    /// Returns every key paired with its value, or `placeholder` where the
    /// value is still pending. Never forces.
    ///
    /// This is the substitution `Debug` renders.
    pub fn frozen_view<'a>(
        &'a self,
        placeholder: &'a Placeholder,
    ) -> impl Iterator<Item = (&'a K, Frozen<&'a V>)> + 'a {
        self.raw_iter()
            .map(move |e| (&e.key, e.value.freeze(placeholder)))
    }

    /// Renders the map as `Debug` would: pending values appear as
    /// [`Placeholder::UNREALIZED`]. Never forces.
    #[must_use]
    pub fn to_display_string(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        format!("{self:?}")
    }

    fn raw_iter(&self) -> RawIter<'_, K, Slot<V>> {
        RawIter::new(self.root.as_deref(), self.size)
    }
}

// ---------------------------------------------------------------------------
// Read operations: K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V> LazyMap<K, V> {
    /// Returns the slot bound to `key` without forcing it.
    #[must_use]
    pub fn get_slot<Q>(&self, key: &Q) -> Option<&Slot<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|e| &e.value)
    }

    /// Returns the entry for `key` without forcing it.
    #[must_use]
    pub fn get_entry<Q>(&self, key: &Q) -> Option<LazyEntry<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|e| LazyEntry::new(&e.key, &e.value))
    }

    /// Returns the value bound to `key`, forcing that value (and no other).
    ///
    /// # Panics
    ///
    /// See [`Deferred::force`].
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_slot(key).map(Slot::value)
    }

    /// Returns the value bound to `key`, forcing that value (and no other).
    ///
    /// # Errors
    ///
    /// Returns [`LazyMapError::Poisoned`] if the computation panicked earlier.
    pub fn try_get<Q>(&self, key: &Q) -> Result<Option<&V>, LazyMapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_slot(key).map(Slot::try_value).transpose()
    }

    /// Returns the value bound to `key`, or `default` if it is unbound.
    #[must_use]
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains `key`. Never forces.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns whether the value for `key` is available without running
    /// anything, or `None` if `key` is unbound.
    #[must_use]
    pub fn is_realized<Q>(&self, key: &Q) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_slot(key).map(Slot::is_realized)
    }

    fn find<Q>(&self, key: &Q) -> Option<&Entry<K, Slot<V>>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let root = self.root.as_deref()?;
        get_recursive(root, adhash::hash_one(key), key, 0)
    }
}

// ---------------------------------------------------------------------------
// Write operations: K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: Clone> LazyMap<K, V> {
    /// Builds a map from `(key, slot)` pairs, storing each slot as tagged.
    /// Nothing is forced.
    pub fn from_raw<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Slot<V>)>,
    {
        let mut map = Self::new();
        for (key, slot) in pairs {
            map.insert_slot_mut(key, slot);
        }
        map
    }

    /// Returns a new map with `key` bound to `slot`, stored exactly as given.
    #[must_use]
    pub fn insert_slot(&self, key: K, slot: Slot<V>) -> Self {
        let mut map = self.clone();
        map.insert_slot_mut(key, slot);
        map
    }

    /// Returns a new map with `key` bound to the eager `value`.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        self.insert_slot(key, Slot::Eager(value))
    }

    /// Returns a new map with `key` bound to the deferred `cell`.
    #[must_use]
    pub fn insert_deferred(&self, key: K, cell: Deferred<V>) -> Self {
        self.insert_slot(key, Slot::from(cell))
    }

    /// Binds `key` to `slot` in place. Other clones of this map are unaffected.
    ///
    /// Returns `true` if the key was new, `false` if a binding was replaced.
    pub fn insert_slot_mut(&mut self, key: K, slot: Slot<V>) -> bool {
        let hash = adhash::hash_one(&key);
        let entry = Entry {
            hash,
            key,
            value: slot,
        };

        if let Some(root) = self.root.as_deref() {
            let outcome = insert_recursive(root, entry, 0);
            self.root = Some(Arc::new(outcome.node));
            self.adhash = self.adhash.wrapping_add(outcome.adhash_delta);
            if outcome.inserted {
                self.size += 1;
            }
            debug_assert_eq!(self.root.as_deref().map(Node::adhash), Some(self.adhash));
            outcome.inserted
        } else {
            let contribution = adhash::key_adhash(hash);
            self.root = Some(Arc::new(Node::singleton(entry, contribution, 0)));
            self.size = 1;
            self.adhash = contribution;
            true
        }
    }

    /// Returns a new map without `key`. If `key` is absent, the result
    /// shares this map's root.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut map = self.clone();
        map.remove_mut(key);
        map
    }

    /// Removes `key` in place. Other clones of this map are unaffected.
    ///
    /// Returns `true` if the key was present.
    pub fn remove_mut<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(root) = self.root.as_deref() else {
            return false;
        };
        match remove_recursive(root, adhash::hash_one(key), key, 0) {
            RemoveOutcome::NotFound => false,
            RemoveOutcome::Removed { node, adhash_delta } => {
                self.root = node.map(Arc::new);
                self.size -= 1;
                self.adhash = self.adhash.wrapping_sub(adhash_delta);
                debug_assert_eq!(self.root.as_deref().map_or(0, Node::adhash), self.adhash);
                true
            }
        }
    }

    /// Returns a new map with every binding of `other` added, replacing
    /// bindings for keys present in both. Nothing is forced.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut map = self.clone();
        for e in other.raw_iter() {
            map.insert_slot_mut(e.key.clone(), e.value.clone());
        }
        map
    }

    /// Forces every value and returns a plain, fully realized map.
    ///
    /// The forced cells stay cached in `self`.
    ///
    /// # Panics
    ///
    /// See [`Deferred::force`].
    #[tracing::instrument(level = "trace", skip_all, fields(len = self.size))]
    pub fn force_all(&self) -> HashMap<K, V> {
        self.raw_iter()
            .map(|e| (e.key.clone(), e.value.value().clone()))
            .collect()
    }

    /// Forces every value and returns a plain, fully realized map.
    ///
    /// # Errors
    ///
    /// Returns [`LazyMapError::Poisoned`] on the first poisoned slot.
    #[tracing::instrument(level = "trace", skip_all, fields(len = self.size))]
    pub fn try_force_all(&self) -> Result<HashMap<K, V>, LazyMapError> {
        self.raw_iter()
            .map(|e| Ok((e.key.clone(), e.value.try_value()?.clone())))
            .collect()
    }

    /// Returns a plain map where pending values are replaced by
    /// `placeholder`. Never forces.
    #[tracing::instrument(level = "trace", skip_all, fields(len = self.size))]
    pub fn freeze(&self, placeholder: V) -> HashMap<K, V> {
        self.freeze_with(|_| placeholder.clone())
    }

    /// Returns a plain map where each pending value is replaced by
    /// `placeholder(key)`. Never forces.
    #[tracing::instrument(level = "trace", skip_all, fields(len = self.size))]
    pub fn freeze_with<F>(&self, mut placeholder: F) -> HashMap<K, V>
    where
        F: FnMut(&K) -> V,
    {
        self.raw_iter()
            .map(|e| {
                let value = e.value.peek().map_or_else(|| placeholder(&e.key), V::clone);
                (e.key.clone(), value)
            })
            .collect()
    }

    /// Returns a plain map where pending values are replaced by the
    /// `placeholder` marker. Never forces.
    #[tracing::instrument(level = "trace", skip_all, fields(len = self.size))]
    pub fn freeze_placeholder(&self, placeholder: &Placeholder) -> HashMap<K, Frozen<V>> {
        self.frozen_view(placeholder)
            .map(|(key, value)| (key.clone(), value.cloned()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

// Manual impl: cloning shares the root, so no `K: Clone, V: Clone` bound.
impl<K, V> Clone for LazyMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
            adhash: self.adhash,
        }
    }
}

impl<K, V> Default for LazyMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LazyMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.frozen_view(&Placeholder::UNREALIZED))
            .finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for LazyMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Different key sets are rejected before anything is forced.
        if self.size != other.size || self.adhash != other.adhash {
            return false;
        }
        self.raw_iter()
            .all(|e| other.get(&e.key).is_some_and(|v| e.value.value() == v))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for LazyMap<K, V> {}

impl<K, V, S> PartialEq<HashMap<K, V, S>> for LazyMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S>) -> bool {
        self.size == other.len()
            && self
                .raw_iter()
                .all(|e| other.get(&e.key).is_some_and(|v| e.value.value() == v))
    }
}

impl<K, V, S> PartialEq<LazyMap<K, V>> for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &LazyMap<K, V>) -> bool {
        other == self
    }
}

impl<K: Hash, V: Hash> Hash for LazyMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.raw_iter().fold(0_u64, |acc, e| {
            let contrib =
                adhash::entry_adhash(adhash::hash_one(&e.key), adhash::hash_one(e.value.value()));
            acc.wrapping_add(contrib)
        });
        state.write_usize(self.size);
        state.write_u64(sum);
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Extend<(K, V)> for LazyMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_slot_mut(k, Slot::Eager(v));
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for LazyMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S> From<HashMap<K, V, S>> for LazyMap<K, V> {
    fn from(map: HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V, Q> ops::Index<&Q> for LazyMap<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V> IntoIterator for &'a LazyMap<K, V> {
    type Item = LazyEntry<'a, K, V>;
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Entries<'a, K, V> {
        self.iter()
    }
}
