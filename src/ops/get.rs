//! Lookup operation: traverses the trie to find a key.

use std::borrow::Borrow;

use crate::node::{self, Entry, Node};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns the stored entry if found. Only keys are compared; the value
/// is never touched.
pub fn get_recursive<'a, K, V, Q>(
    node: &'a Node<K, V>,
    hash: u64,
    key: &Q,
    shift: u32,
) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match node {
        Node::Inner {
            data_map,
            node_map,
            data,
            children,
            ..
        } => {
            let bit = node::mask(node::fragment(hash, shift));

            if data_map & bit != 0 {
                // Position has an inline entry.
                let entry = &data[node::index(*data_map, bit)];
                (entry.hash == hash && Borrow::<Q>::borrow(&entry.key) == key).then_some(entry)
            } else if node_map & bit != 0 {
                // Position has a child subtree; recurse.
                let child = &children[node::index(*node_map, bit)];
                get_recursive(&**child, hash, key, shift + node::BITS_PER_LEVEL)
            } else {
                None
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
            ..
        } => {
            if hash != *node_hash {
                return None;
            }
            entries.iter().find(|e| Borrow::<Q>::borrow(&e.key) == key)
        }
    }
}
