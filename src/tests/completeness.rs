//! Completeness tests: insert/remove must not lose data.

use crate::{LazyMap, Slot};

// ---------------------------------------------------------------------------
// insert_slot_mut must report whether the key was new
// ---------------------------------------------------------------------------

#[test]
fn insert_new_reports_true() {
    let mut map = LazyMap::new();
    assert!(
        map.insert_slot_mut("key", Slot::eager(42)),
        "inserting new key should report true"
    );
}

#[test]
fn insert_update_reports_false() {
    let mut map = LazyMap::new();
    map.insert_slot_mut("key", Slot::eager(1));
    assert!(
        !map.insert_slot_mut("key", Slot::eager(2)),
        "updating should report false"
    );
    assert_eq!(map.len(), 1);
}

#[test]
fn insert_update_chain() {
    let mut map = LazyMap::new();
    assert!(map.insert_slot_mut("k", Slot::eager(10)));
    assert!(!map.insert_slot_mut("k", Slot::deferred(|| 20)));
    assert!(!map.insert_slot_mut("k", Slot::eager(30)));
    assert_eq!(map.get("k"), Some(&30));
}

// ---------------------------------------------------------------------------
// remove_mut must report whether the key was present
// ---------------------------------------------------------------------------

#[test]
fn remove_existing_reports_true() {
    let mut map = LazyMap::new().insert("a", 100);
    assert!(map.remove_mut("a"), "remove should report the removal");
    assert!(map.is_empty());
}

#[test]
fn remove_missing_reports_false() {
    let mut map = LazyMap::new().insert("a", 1);
    assert!(!map.remove_mut("z"), "removing missing key should report false");
    assert_eq!(map.len(), 1);
}

#[test]
fn remove_among_many() {
    let mut map: LazyMap<i32, i32> = (0..100).map(|i| (i, i * 10)).collect();
    assert!(map.remove_mut(&50));
    assert!(!map.remove_mut(&50));
    assert_eq!(map.len(), 99);
    for i in (0..100).filter(|&i| i != 50) {
        assert_eq!(map.get(&i), Some(&(i * 10)), "key {i} lost");
    }
}

// ---------------------------------------------------------------------------
// every key is reachable through every access path
// ---------------------------------------------------------------------------

#[test]
fn get_entry_returns_stored_key() {
    let map = LazyMap::new().insert(String::from("name"), 5);
    let entry = map.get_entry("name").expect("entry present");
    assert_eq!(entry.key(), "name");
    assert_eq!(*entry.value(), 5);
    assert!(map.get_entry("other").is_none());
}

#[test]
fn iteration_covers_every_key() {
    let map: LazyMap<u32, u32> = (0..1000).map(|i| (i, i)).collect();
    let mut keys: Vec<u32> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..1000).collect::<Vec<_>>());
    assert_eq!(map.iter().len(), 1000);
}
