//! Insertion operation: persistent path-copy insert with `AdHash` maintenance.

use std::sync::Arc;

use crate::adhash;
use crate::node::{self, Entry, Node};

/// Outcome of a recursive insert.
pub struct InsertOutcome<K, V> {
    /// The new (path-copied) root of the modified subtree.
    pub node: Node<K, V>,
    /// Wrapping `AdHash` delta to add to the parent's adhash.
    pub adhash_delta: u64,
    /// `true` if a new key was inserted, `false` if an existing value was replaced.
    pub inserted: bool,
}

/// Inserts `entry` into the subtree rooted at `node`.
///
/// `node` itself is left untouched; untouched children are shared with
/// the returned node.
pub fn insert_recursive<K, V>(node: &Node<K, V>, entry: Entry<K, V>, shift: u32) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    match node {
        Node::Inner {
            data_map,
            node_map,
            data,
            children,
            adhash,
        } => insert_into_inner(*data_map, *node_map, data, children, *adhash, entry, shift),
        Node::Collision {
            hash: node_hash,
            entries,
            adhash,
        } => insert_into_collision(*node_hash, entries, *adhash, entry),
    }
}

// ---------------------------------------------------------------------------
// Inner node insert
// ---------------------------------------------------------------------------

fn insert_into_inner<K, V>(
    data_map: u32,
    node_map: u32,
    data: &[Entry<K, V>],
    children: &[Arc<Node<K, V>>],
    adhash: u64,
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let bit = node::mask(node::fragment(entry.hash, shift));

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        let existing = &data[pos];

        if existing.hash == entry.hash && existing.key == entry.key {
            // Same key → replace value; the key set (and so the adhash) is unchanged.
            InsertOutcome {
                node: Node::Inner {
                    data_map,
                    node_map,
                    data: replacing(data, pos, entry),
                    children: children.to_vec(),
                    adhash,
                },
                adhash_delta: 0,
                inserted: false,
            }
        } else {
            // Different key at same position → push both into a subtree.
            let new_contrib = adhash::key_adhash(entry.hash);
            let subtree = create_subtree(existing.clone(), entry, shift + node::BITS_PER_LEVEL);

            let new_node_map = node_map | bit;
            let child_pos = node::index(new_node_map, bit);

            InsertOutcome {
                node: Node::Inner {
                    data_map: data_map & !bit,
                    node_map: new_node_map,
                    data: removing(data, pos),
                    children: inserting(children, child_pos, Arc::new(subtree)),
                    adhash: adhash.wrapping_add(new_contrib),
                },
                adhash_delta: new_contrib,
                inserted: true,
            }
        }
    } else if node_map & bit != 0 {
        // Position has child subtree → recurse.
        let child_pos = node::index(node_map, bit);
        let outcome = insert_recursive(&*children[child_pos], entry, shift + node::BITS_PER_LEVEL);

        InsertOutcome {
            node: Node::Inner {
                data_map,
                node_map,
                data: data.to_vec(),
                children: replacing(children, child_pos, Arc::new(outcome.node)),
                adhash: adhash.wrapping_add(outcome.adhash_delta),
            },
            adhash_delta: outcome.adhash_delta,
            inserted: outcome.inserted,
        }
    } else {
        // Position empty → add inline entry.
        let new_data_map = data_map | bit;
        let insert_at = node::index(new_data_map, bit);
        let new_contrib = adhash::key_adhash(entry.hash);

        InsertOutcome {
            node: Node::Inner {
                data_map: new_data_map,
                node_map,
                data: inserting(data, insert_at, entry),
                children: children.to_vec(),
                adhash: adhash.wrapping_add(new_contrib),
            },
            adhash_delta: new_contrib,
            inserted: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Collision node insert
// ---------------------------------------------------------------------------

fn insert_into_collision<K, V>(
    node_hash: u64,
    entries: &[Entry<K, V>],
    adhash: u64,
    entry: Entry<K, V>,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
        return InsertOutcome {
            node: Node::Collision {
                hash: node_hash,
                entries: replacing(entries, pos, entry),
                adhash,
            },
            adhash_delta: 0,
            inserted: false,
        };
    }

    // Key not found → append.
    let new_contrib = adhash::key_adhash(entry.hash);
    InsertOutcome {
        node: Node::Collision {
            hash: node_hash,
            entries: inserting(entries, entries.len(), entry),
            adhash: adhash.wrapping_add(new_contrib),
        },
        adhash_delta: new_contrib,
        inserted: true,
    }
}

// ---------------------------------------------------------------------------
// Subtree creation
// ---------------------------------------------------------------------------

/// Creates a subtree from two entries that collide at the current depth.
///
/// Recursively descends until hash fragments differ, or creates a collision
/// node past `MAX_SHIFT`.
fn create_subtree<K, V>(e1: Entry<K, V>, e2: Entry<K, V>, shift: u32) -> Node<K, V> {
    let contrib = adhash::key_adhash(e1.hash).wrapping_add(adhash::key_adhash(e2.hash));

    if shift > node::MAX_SHIFT {
        return Node::Collision {
            hash: e1.hash,
            entries: vec![e1, e2],
            adhash: contrib,
        };
    }

    let f1 = node::fragment(e1.hash, shift);
    let f2 = node::fragment(e2.hash, shift);

    if f1 == f2 {
        let child = create_subtree(e1, e2, shift + node::BITS_PER_LEVEL);
        Node::Inner {
            data_map: 0,
            node_map: node::mask(f1),
            data: Vec::new(),
            children: vec![Arc::new(child)],
            adhash: contrib,
        }
    } else {
        let data = if f1 < f2 { vec![e1, e2] } else { vec![e2, e1] };
        Node::Inner {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            data,
            children: Vec::new(),
            adhash: contrib,
        }
    }
}

// ---------------------------------------------------------------------------
// Block builders (shared with remove.rs)
// ---------------------------------------------------------------------------

/// Copies `items` with `item` inserted at `at`.
pub fn inserting<T: Clone>(items: &[T], at: usize, item: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(&items[..at]);
    out.push(item);
    out.extend_from_slice(&items[at..]);
    out
}

/// Copies `items` with the element at `at` replaced by `item`.
pub fn replacing<T: Clone>(items: &[T], at: usize, item: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    out.extend_from_slice(&items[..at]);
    out.push(item);
    out.extend_from_slice(&items[at + 1..]);
    out
}

/// Copies `items` without the element at `at`.
pub fn removing<T: Clone>(items: &[T], at: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() - 1);
    out.extend_from_slice(&items[..at]);
    out.extend_from_slice(&items[at + 1..]);
    out
}
