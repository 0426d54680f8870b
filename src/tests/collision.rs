use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use super::{calls, counted};
use crate::{LazyMap, Slot};

/// A key type with a controllable hash value for testing hash collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CollidingKey {
    id: u32,
    forced_hash: u64,
}

impl CollidingKey {
    const fn new(id: u32, hash: u64) -> Self {
        Self {
            id,
            forced_hash: hash,
        }
    }
}

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.forced_hash.hash(state);
    }
}

/// Two keys with the same 64-bit hash create a collision node.
#[test]
fn two_colliding_keys() {
    let k1 = CollidingKey::new(1, 0xDEAD_BEEF);
    let k2 = CollidingKey::new(2, 0xDEAD_BEEF);

    let map = LazyMap::new()
        .insert(k1.clone(), "first")
        .insert(k2.clone(), "second");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"first"));
    assert_eq!(map.get(&k2), Some(&"second"));
}

/// Three keys with the same hash.
#[test]
fn three_colliding_keys() {
    let keys: Vec<CollidingKey> = (0..3).map(|i| CollidingKey::new(i, 0xCAFE)).collect();

    let map: LazyMap<CollidingKey, usize> =
        keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();

    assert_eq!(map.len(), 3);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(map.get(k), Some(&i));
    }
}

/// Remove from collision node.
#[test]
fn remove_from_collision() {
    let k1 = CollidingKey::new(1, 0xAAAA);
    let k2 = CollidingKey::new(2, 0xAAAA);
    let k3 = CollidingKey::new(3, 0xAAAA);

    let map = LazyMap::new()
        .insert(k1.clone(), 10)
        .insert(k2.clone(), 20)
        .insert(k3.clone(), 30);

    let map = map.remove(&k2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&10));
    assert_eq!(map.get(&k2), None);
    assert_eq!(map.get(&k3), Some(&30));
}

/// Removing down to one colliding key collapses the collision node: the
/// result is shaped like a map built from that key alone.
#[test]
fn collision_collapses_to_single_entry() {
    let k1 = CollidingKey::new(1, 0x1234_5678);
    let k2 = CollidingKey::new(2, 0x1234_5678);
    let other = CollidingKey::new(3, 0x8765_4321);

    let map = LazyMap::new()
        .insert(k1.clone(), 1)
        .insert(k2.clone(), 2)
        .insert(other.clone(), 3)
        .remove(&k1);

    let direct = LazyMap::new().insert(k2.clone(), 2).insert(other, 3);
    assert_eq!(map.key_adhash(), direct.key_adhash());
    assert_eq!(map, direct);
    assert_eq!(map.get(&k2), Some(&2));
    assert_eq!(map.remove(&k2).len(), 1);
}

/// Overwrite in collision node.
#[test]
fn overwrite_in_collision() {
    let k1 = CollidingKey::new(1, 0xBBBB);
    let k2 = CollidingKey::new(2, 0xBBBB);

    let map = LazyMap::new()
        .insert(k1.clone(), "old")
        .insert(k2, "val2")
        .insert(k1.clone(), "new");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"new"));
}

/// Collision node with remove-all returns to empty.
#[test]
fn collision_remove_all() {
    let k1 = CollidingKey::new(1, 0xCCCC);
    let k2 = CollidingKey::new(2, 0xCCCC);

    let map = LazyMap::new().insert(k1.clone(), 1).insert(k2.clone(), 2);
    let map = map.remove(&k1).remove(&k2);

    assert!(map.is_empty());
    assert_eq!(map.key_adhash(), 0);
}

/// Mixed: some keys collide, some don't.
#[test]
fn mixed_collisions_and_normal() {
    let collide_a = CollidingKey::new(1, 0xDDDD);
    let collide_b = CollidingKey::new(2, 0xDDDD);
    let normal = CollidingKey::new(3, 0xEEEE);

    let map = LazyMap::new()
        .insert(collide_a.clone(), "a")
        .insert(collide_b.clone(), "b")
        .insert(normal.clone(), "c");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&collide_a), Some(&"a"));
    assert_eq!(map.get(&collide_b), Some(&"b"));
    assert_eq!(map.get(&normal), Some(&"c"));
}

/// Deferred slots inside a collision node are forced individually.
#[test]
fn deferred_in_collision_forced_individually() {
    let counter = Arc::new(AtomicUsize::new(0));
    let k1 = CollidingKey::new(1, 0xFFFF);
    let k2 = CollidingKey::new(2, 0xFFFF);

    let map = LazyMap::from_raw([
        (k1.clone(), counted(&counter, 1)),
        (k2.clone(), counted(&counter, 2)),
    ])
    .insert_slot(CollidingKey::new(3, 0xFFFF), Slot::eager(3));

    assert_eq!(calls(&counter), 0);
    assert_eq!(map.get(&k2), Some(&2));
    assert_eq!(calls(&counter), 1);
    assert_eq!(map.is_realized(&k1), Some(false));
}
