use std::iter::FusedIterator;

use super::btree_map::{NONE, NodeIndex};
use super::BTreeMap;
use crate::v2026::collections::contiguous::Vector;
use crate::v2026::sum::Optional;

impl<'a, K: Ord, V, const M: usize> IntoIterator for &'a BTreeMap<K, V, M> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V, M>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = Iter {
            map: self,
            stack: Vector::new(),
            remaining: self.len(),
        };
        iter.descend(self.root);
        iter
    }
}

/// An in-order iterator over the entries of a [`BTreeMap`].
///
/// The stack holds the path from the root to the current node, with the index of the next key
/// to yield in each.
pub struct Iter<'a, K: Ord, V, const M: usize> {
    map: &'a BTreeMap<K, V, M>,
    stack: Vector<(NodeIndex, usize)>,
    remaining: usize,
}

impl<K: Ord, V, const M: usize> Iter<'_, K, V, M> {
    /// Pushes the path from `node` down to its leftmost leaf.
    fn descend(&mut self, mut node: NodeIndex) {
        while node != NONE {
            self.stack.push((node, 0));
            node = match self.map.nodes[node as usize].children.front() {
                Ok(child) => *child,
                Err(_) => NONE,
            };
        }
    }
}

impl<'a, K: Ord, V, const M: usize> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, pos) = match self.stack.back_mut() {
                Ok(top) => {
                    let current = *top;
                    top.1 += 1;
                    current
                },
                Err(_) => return None,
            };
            let map = self.map;
            let node = &map.nodes[index as usize];
            if pos < node.keys.len() {
                if !node.is_leaf() {
                    self.descend(node.children[pos + 1]);
                }
                self.remaining -= 1;
                return Some((&node.keys[pos], &node.values[pos]));
            }
            // Every key of this node has been yielded.
            if let Optional::Empty = self.stack.pop() {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V, const M: usize> ExactSizeIterator for Iter<'_, K, V, M> {}

impl<K: Ord, V, const M: usize> FusedIterator for Iter<'_, K, V, M> {}
