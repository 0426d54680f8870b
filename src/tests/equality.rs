use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use super::{calls, counted};
use crate::{LazyMap, Slot};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn plain() -> HashMap<&'static str, i32> {
    HashMap::from([("a", 1), ("b", 2)])
}

#[test]
fn equals_plain_map_before_forcing() {
    let map = LazyMap::from_raw([("a", Slot::deferred(|| 1)), ("b", Slot::eager(2))]);
    assert!(map == plain());
    assert!(plain() == map);
}

#[test]
fn equals_plain_map_after_forcing() {
    let map = LazyMap::from_raw([("a", Slot::deferred(|| 1)), ("b", Slot::eager(2))]);
    let _ = map.force_all();
    assert!(map == plain());
    assert!(plain() == map);
}

#[test]
fn differs_from_plain_map() {
    let map = LazyMap::new().insert("a", 1).insert("b", 3);
    assert!(map != plain());
    assert!(plain() != map);
    assert!(LazyMap::new().insert("a", 1) != plain());
}

#[test]
fn eager_and_lazy_maps_are_equal() {
    let eager = LazyMap::new().insert("a", 1).insert("b", 2);
    let lazy = LazyMap::from_raw([("b", Slot::deferred(|| 2)), ("a", Slot::deferred(|| 1))]);
    assert_eq!(eager, lazy);
    assert_eq!(hash_of(&eager), hash_of(&lazy));
}

#[test]
fn equal_keys_different_values() {
    let m1 = LazyMap::new().insert("k", 1);
    let m2 = LazyMap::new().insert_slot("k", Slot::deferred(|| 2));
    assert_ne!(m1, m2);
}

/// Maps over different key sets are unequal without running anything.
#[test]
fn different_key_sets_do_not_force() {
    let counter = Arc::new(AtomicUsize::new(0));
    let m1 = LazyMap::from_raw([("a", counted(&counter, 1)), ("b", counted(&counter, 2))]);
    let m2 = LazyMap::from_raw([("a", counted(&counter, 1)), ("c", counted(&counter, 2))]);
    let m3 = LazyMap::from_raw([("a", counted(&counter, 1))]);

    assert_ne!(m1, m2);
    assert_ne!(m1, m3);
    assert_eq!(calls(&counter), 0);
}

#[test]
fn equality_is_reflexive_on_shared_versions() {
    let counter = Arc::new(AtomicUsize::new(0));
    let map = LazyMap::from_raw([("a", counted(&counter, 1))]);
    let copy = map.clone();

    assert_eq!(map, copy);
    assert_eq!(calls(&counter), 1);
}

#[test]
fn usable_as_hash_map_key() {
    let mut index: HashMap<LazyMap<&str, i32>, &str> = HashMap::new();
    index.insert(LazyMap::new().insert("x", 1), "first");

    let lookup = LazyMap::new().insert_slot("x", Slot::deferred(|| 1));
    assert_eq!(index.get(&lookup), Some(&"first"));
}
