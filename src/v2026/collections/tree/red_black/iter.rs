use std::iter::FusedIterator;

use super::links::{NodeIndex, SENTINEL};
use super::RBMap;
use crate::v2026::collections::contiguous::vector;

/// Where an in-order walk arrived at its current node from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CameFrom {
    /// From the parent, nothing below has been visited yet.
    Top,
    /// From the left child, the node itself is next.
    Left,
    /// From the right child, the whole subtree is done.
    Right,
}

impl<'a, K: Ord, V> IntoIterator for &'a RBMap<K, V> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let node = match self.root {
            SENTINEL => SENTINEL,
            root => self.minimum(root),
        };
        Iter {
            map: self,
            node,
            came_from: CameFrom::Left,
            remaining: self.len(),
        }
    }
}

/// An in-order iterator over the entries of an [`RBMap`], walking the links without a stack.
pub struct Iter<'a, K: Ord, V> {
    map: &'a RBMap<K, V>,
    node: NodeIndex,
    came_from: CameFrom,
    remaining: usize,
}

impl<K: Ord, V> Iter<'_, K, V> {
    /// Advances to the next node in key order and returns its index.
    pub(crate) fn next_node(&mut self) -> Option<NodeIndex> {
        loop {
            if self.node == SENTINEL {
                return None;
            }
            match self.came_from {
                CameFrom::Top => match self.map.left(self.node) {
                    SENTINEL => self.came_from = CameFrom::Left,
                    left => self.node = left,
                },
                CameFrom::Left => {
                    let current = self.node;
                    match self.map.right(current) {
                        SENTINEL => self.climb(),
                        right => {
                            self.node = right;
                            self.came_from = CameFrom::Top;
                        },
                    }
                    self.remaining -= 1;
                    return Some(current);
                },
                CameFrom::Right => self.climb(),
            }
        }
    }

    fn climb(&mut self) {
        let parent = self.map.parent(self.node);
        self.came_from = if parent != SENTINEL && self.map.left(parent) == self.node {
            CameFrom::Left
        } else {
            CameFrom::Right
        };
        self.node = parent;
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next_node()?;
        let (key, value) = self.map.entry(node);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Ord, V> IntoIterator for RBMap<K, V> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V>;

    /// Consumes the map and yields its entries in key order.
    fn into_iter(mut self) -> Self::IntoIter {
        // Once renumbered, arena order is key order.
        self.optimize_layout();
        IntoIter(self.entries.into_iter())
    }
}

pub struct IntoIter<K, V>(
    vector::IntoIter<(K, V)>,
);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
