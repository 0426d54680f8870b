//! Removal operation: persistent path-copy delete with canonical inlining.

use std::borrow::Borrow;
use std::sync::Arc;

use crate::adhash;
use crate::node::{self, Entry, Node};
use crate::ops::insert::{inserting, removing, replacing};

/// Outcome of a recursive remove.
pub enum RemoveOutcome<K, V> {
    /// Key was not found; tree unchanged.
    NotFound,
    /// Key was removed.
    Removed {
        /// New root of the modified subtree, or `None` if the subtree is now empty.
        node: Option<Node<K, V>>,
        /// Wrapping `AdHash` delta to subtract from the parent's adhash.
        adhash_delta: u64,
    },
}

/// Removes `key` from the subtree rooted at `node`.
pub fn remove_recursive<K, V, Q>(node: &Node<K, V>, hash: u64, key: &Q, shift: u32) -> RemoveOutcome<K, V>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    match node {
        Node::Inner {
            data_map,
            node_map,
            data,
            children,
            adhash,
        } => remove_from_inner(*data_map, *node_map, data, children, *adhash, hash, key, shift),
        Node::Collision {
            hash: node_hash,
            entries,
            adhash,
        } => remove_from_collision(*node_hash, entries, *adhash, hash, key, shift),
    }
}

// ---------------------------------------------------------------------------
// Inner node remove
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn remove_from_inner<K, V, Q>(
    data_map: u32,
    node_map: u32,
    data: &[Entry<K, V>],
    children: &[Arc<Node<K, V>>],
    adhash: u64,
    hash: u64,
    key: &Q,
    shift: u32,
) -> RemoveOutcome<K, V>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    let bit = node::mask(node::fragment(hash, shift));

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        let e = &data[pos];
        if e.hash != hash || Borrow::<Q>::borrow(&e.key) != key {
            return RemoveOutcome::NotFound;
        }
        let removed_contrib = adhash::key_adhash(e.hash);

        let new_data_map = data_map & !bit;

        // Removing the last entry with no children → empty subtree.
        if new_data_map == 0 && node_map == 0 {
            return RemoveOutcome::Removed {
                node: None,
                adhash_delta: removed_contrib,
            };
        }

        RemoveOutcome::Removed {
            node: Some(Node::Inner {
                data_map: new_data_map,
                node_map,
                data: removing(data, pos),
                children: children.to_vec(),
                adhash: adhash.wrapping_sub(removed_contrib),
            }),
            adhash_delta: removed_contrib,
        }
    } else if node_map & bit != 0 {
        let child_pos = node::index(node_map, bit);
        let outcome = remove_recursive(&*children[child_pos], hash, key, shift + node::BITS_PER_LEVEL);

        let RemoveOutcome::Removed {
            node: new_child,
            adhash_delta,
        } = outcome
        else {
            return RemoveOutcome::NotFound;
        };

        let node = match new_child {
            // Canonical form: a single-entry leaf is pulled back into the parent.
            Some(child) if should_inline(&child) => {
                let inlined = child.data()[0].clone();
                let new_data_map = data_map | bit;
                Node::Inner {
                    data_map: new_data_map,
                    node_map: node_map & !bit,
                    data: inserting(data, node::index(new_data_map, bit), inlined),
                    children: removing(children, child_pos),
                    adhash: adhash.wrapping_sub(adhash_delta),
                }
            }
            Some(child) => Node::Inner {
                data_map,
                node_map,
                data: data.to_vec(),
                children: replacing(children, child_pos, Arc::new(child)),
                adhash: adhash.wrapping_sub(adhash_delta),
            },
            None => {
                let new_node_map = node_map & !bit;
                if data_map == 0 && new_node_map == 0 {
                    return RemoveOutcome::Removed {
                        node: None,
                        adhash_delta,
                    };
                }
                Node::Inner {
                    data_map,
                    node_map: new_node_map,
                    data: data.to_vec(),
                    children: removing(children, child_pos),
                    adhash: adhash.wrapping_sub(adhash_delta),
                }
            }
        };
        RemoveOutcome::Removed {
            node: Some(node),
            adhash_delta,
        }
    } else {
        RemoveOutcome::NotFound
    }
}

/// Canonical form: a child with exactly one entry and no children
/// should be inlined back into the parent.
const fn should_inline<K, V>(node: &Node<K, V>) -> bool {
    match node {
        Node::Inner {
            data_map, node_map, ..
        } => data_map.is_power_of_two() && *node_map == 0,
        Node::Collision { .. } => false,
    }
}

// ---------------------------------------------------------------------------
// Collision node remove
// ---------------------------------------------------------------------------

fn remove_from_collision<K, V, Q>(
    node_hash: u64,
    entries: &[Entry<K, V>],
    adhash: u64,
    hash: u64,
    key: &Q,
    shift: u32,
) -> RemoveOutcome<K, V>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    if hash != node_hash {
        return RemoveOutcome::NotFound;
    }
    let Some(pos) = entries.iter().position(|e| Borrow::<Q>::borrow(&e.key) == key) else {
        return RemoveOutcome::NotFound;
    };
    let removed_contrib = adhash::key_adhash(node_hash);

    let node = if entries.len() == 2 {
        // One entry left: demote to a single-entry leaf, which the
        // parent inlines.
        let remaining = entries[1 - pos].clone();
        Node::singleton(remaining, adhash.wrapping_sub(removed_contrib), shift)
    } else {
        Node::Collision {
            hash: node_hash,
            entries: removing(entries, pos),
            adhash: adhash.wrapping_sub(removed_contrib),
        }
    };
    RemoveOutcome::Removed {
        node: Some(node),
        adhash_delta: removed_contrib,
    }
}
