//! Iterator types for lazy maps.
//!
//! All iterators walk the trie with an explicit DFS stack and produce one
//! entry per `next()` call. Nothing is collected or evaluated ahead of the
//! consumer, so reading `k` values forces exactly `k` slots.

use std::iter::FusedIterator;

use crate::entry::LazyEntry;
use crate::node::{Entry, Node};
use crate::slot::Slot;

/// One level of the DFS: a node plus cursors into its entries and children.
struct Frame<'a, K, V> {
    node: &'a Node<K, V>,
    data_pos: usize,
    child_pos: usize,
}

/// Unbuffered DFS over the raw trie entries.
///
/// Inline entries of a node come before its children; children are visited
/// in bitmap order.
pub struct RawIter<'a, K, V> {
    stack: Vec<Frame<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    /// Creates an iterator over the subtree rooted at `root`.
    pub fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let stack = root
            .map(|node| Frame {
                node,
                data_pos: 0,
                child_pos: 0,
            })
            .into_iter()
            .collect();
        Self {
            stack,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for RawIter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node: &'a Node<K, V> = frame.node;

            if let Some(entry) = node.data().get(frame.data_pos) {
                frame.data_pos += 1;
                self.remaining -= 1;
                return Some(entry);
            }

            if let Some(child) = node.children().get(frame.child_pos) {
                frame.child_pos += 1;
                self.stack.push(Frame {
                    node: child,
                    data_pos: 0,
                    child_pos: 0,
                });
            } else {
                self.stack.pop();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for RawIter<'_, K, V> {}

impl<K, V> FusedIterator for RawIter<'_, K, V> {}

// ---------------------------------------------------------------------------
// Public iterators
// ---------------------------------------------------------------------------

/// Iterator over [`LazyEntry`] views of a [`LazyMap`](crate::LazyMap).
///
/// Producing an entry never forces it.
pub struct Entries<'a, K, V> {
    raw: RawIter<'a, K, Slot<V>>,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) const fn new(raw: RawIter<'a, K, Slot<V>>) -> Self {
        Self { raw }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = LazyEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|e| LazyEntry::new(&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

/// Iterator over the keys of a [`LazyMap`](crate::LazyMap). Never forces.
pub struct Keys<'a, K, V> {
    raw: RawIter<'a, K, Slot<V>>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) const fn new(raw: RawIter<'a, K, Slot<V>>) -> Self {
        Self { raw }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|e| &e.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a [`LazyMap`](crate::LazyMap).
///
/// Each value is forced exactly when `next()` yields it.
pub struct Values<'a, K, V> {
    raw: RawIter<'a, K, Slot<V>>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) const fn new(raw: RawIter<'a, K, Slot<V>>) -> Self {
        Self { raw }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|e| e.value.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
