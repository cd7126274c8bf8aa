use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;

use super::links::{Links, NodeIndex, SENTINEL};
use super::Iter;
use crate::v2026::collections::contiguous::Vector;
use crate::v2026::error::InternalInvariant;
use crate::v2026::sum::Optional;

/// An ordered map stored as a red-black tree in a dense arena.
///
/// Nodes refer to each other by 31-bit index into `links`, with the color packed into the top bit
/// of the parent index. Slot 0 is a permanent black sentinel standing in for every missing child
/// and for the root's parent. The entry of node `i` is `entries[i - 1]`, and removal keeps both
/// arrays dense by moving the last node into the freed slot.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the RBMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `lookup` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `optimize_layout` | `O(n)` |
pub struct RBMap<K: Ord, V> {
    pub(crate) links: Vector<Links>,
    pub(crate) entries: Vector<(K, V)>,
    pub(crate) root: NodeIndex,
}

impl<K: Ord, V> RBMap<K, V> {
    pub fn new() -> RBMap<K, V> {
        let mut links = Vector::new();
        links.push(Links::SENTINEL);
        RBMap {
            links,
            entries: Vector::new(),
            root: SENTINEL,
        }
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `key` with `value`, returning the previous value if the key was already present.
    /// An existing key is left in place and only its value is replaced.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::tree::RBMap;
    /// let mut map = RBMap::new();
    /// assert_eq!(map.insert(2, 'b'), None);
    /// assert_eq!(map.insert(2, 'B'), Some('b'));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = SENTINEL;
        let mut current = self.root;
        let mut went_left = false;

        while current != SENTINEL {
            parent = current;
            match key.cmp(self.key(current)) {
                Ordering::Less => {
                    current = self.left(current);
                    went_left = true;
                },
                Ordering::Greater => {
                    current = self.right(current);
                    went_left = false;
                },
                Ordering::Equal => {
                    return Some(mem::replace(&mut self.entry_mut(current).1, value));
                },
            }
        }

        let node = self.push_node(key, value, parent);
        if parent == SENTINEL {
            self.root = node;
        } else if went_left {
            self.set_left(parent, node);
        } else {
            self.set_right(parent, node);
        }

        self.insert_fixup(node);
        None
    }

    /// Returns a reference to the value stored for `key`, or Empty if there is none.
    pub fn lookup<Q>(&self, key: &Q) -> Optional<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup_entry(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair stored for `key`, or Empty if there is none.
    pub fn lookup_entry<Q>(&self, key: &Q) -> Optional<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            SENTINEL => Optional::Empty,
            node => {
                let (key, value) = self.entry(node);
                Optional::Value((key, value))
            },
        }
    }

    /// Returns a mutable reference to the value stored for `key`, or Empty if there is none.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Optional<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            SENTINEL => Optional::Empty,
            node => Optional::Value(&mut self.entry_mut(node).1),
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key) != SENTINEL
    }

    /// Removes the entry for `key` and returns it, or Empty if there was none.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Optional<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            SENTINEL => Optional::Empty,
            node => {
                self.unlink(node);
                Optional::Value(self.free_node(node))
            },
        }
    }

    /// Removes the entry for `key` and returns its value, or Empty if there was none.
    pub fn remove<Q>(&mut self, key: &Q) -> Optional<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Optional<(&K, &V)> {
        match self.root {
            SENTINEL => Optional::Empty,
            root => {
                let (key, value) = self.entry(self.minimum(root));
                Optional::Value((key, value))
            },
        }
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Optional<(&K, &V)> {
        match self.root {
            SENTINEL => Optional::Empty,
            root => {
                let (key, value) = self.entry(self.maximum(root));
                Optional::Value((key, value))
            },
        }
    }

    /// Drops every entry, keeping the arena's allocations.
    pub fn clear(&mut self) {
        self.links.truncate(1);
        self.entries.clear();
        self.root = SENTINEL;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Renumbers the nodes so that arena order is key order, making in-order walks and nearby
    /// lookups touch consecutive memory. Running it again changes nothing.
    pub fn optimize_layout(&mut self) {
        let len = self.len();
        tracing::debug!(len, "renumbering red-black tree nodes in key order");

        // new_index[old] is the position of node `old` in key order, the sentinel stays at 0.
        let mut new_index: Vector<NodeIndex> = Vector::with_cap(len + 1);
        new_index.extend((0..=len).map(|_| SENTINEL));
        for (position, node) in self.node_indices().enumerate() {
            new_index[node as usize] = to_index(position + 1);
        }

        let remap = |index: NodeIndex| new_index[index as usize];
        let mut links = Vector::with_cap(len + 1);
        links.extend((0..=len).map(|_| Links::SENTINEL));
        for old in 1..=len {
            let old_links = self.links[old];
            let mut moved = Links {
                left: remap(old_links.left),
                right: remap(old_links.right),
                parent_color: 0,
            };
            moved.set_parent(remap(old_links.parent()));
            moved.set_red(old_links.is_red());
            links[remap(to_index(old)) as usize] = moved;
        }
        self.links = links;
        self.root = remap(self.root);

        // Permute the entries in place by following cycles: entry i belongs at target[i].
        let mut target: Vector<usize> = (1..=len).map(|old| new_index[old] as usize - 1).collect();
        for start in 0..len {
            while target[start] != start {
                let destination = target[start];
                self.entries.swap(start, destination);
                target.swap(start, destination);
            }
        }
    }

    /// Checks every structural invariant of the tree: the sentinel is black and self-referential,
    /// the root is black, parent links agree with child links, keys are in order, no red node has
    /// a red child and every path from the root to the sentinel has the same number of black
    /// nodes.
    ///
    /// # Errors
    /// Returns [`InternalInvariant`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InternalInvariant> {
        let fail = |reason| Err(InternalInvariant { reason });

        if self.links[0] != Links::SENTINEL {
            return fail("sentinel is not black and self-referential");
        }
        if self.links.len() != self.entries.len() + 1 {
            return fail("arena and entries differ in length");
        }
        if self.is_red(self.root) {
            return fail("root is red");
        }
        if self.root != SENTINEL && self.parent(self.root) != SENTINEL {
            return fail("root has a parent");
        }

        self.check_subtree(self.root)?;

        let mut visited = 0;
        let mut previous: Option<&K> = None;
        for (key, _) in self.iter() {
            if previous.is_some_and(|previous| previous >= key) {
                return fail("keys are out of order");
            }
            previous = Some(key);
            visited += 1;
        }
        if visited != self.len() {
            return fail("not every node is reachable from the root");
        }
        Ok(())
    }

    /// Returns the black height of the subtree rooted at `node`.
    fn check_subtree(&self, node: NodeIndex) -> Result<usize, InternalInvariant> {
        if node == SENTINEL {
            return Ok(1);
        }
        let fail = |reason| Err(InternalInvariant { reason });

        let (left, right) = (self.left(node), self.right(node));
        for child in [left, right] {
            if child != SENTINEL && self.parent(child) != node {
                return fail("child's parent link doesn't point back");
            }
            if self.is_red(node) && self.is_red(child) {
                return fail("red node has a red child");
            }
        }

        let left_height = self.check_subtree(left)?;
        let right_height = self.check_subtree(right)?;
        if left_height != right_height {
            return fail("black heights differ");
        }
        Ok(left_height + usize::from(!self.is_red(node)))
    }
}

impl<K: Ord, V> RBMap<K, V> {
    pub(crate) fn left(&self, node: NodeIndex) -> NodeIndex {
        self.links[node as usize].left
    }

    pub(crate) fn right(&self, node: NodeIndex) -> NodeIndex {
        self.links[node as usize].right
    }

    pub(crate) fn parent(&self, node: NodeIndex) -> NodeIndex {
        self.links[node as usize].parent()
    }

    fn is_red(&self, node: NodeIndex) -> bool {
        self.links[node as usize].is_red()
    }

    fn set_left(&mut self, node: NodeIndex, child: NodeIndex) {
        self.links[node as usize].left = child;
    }

    fn set_right(&mut self, node: NodeIndex, child: NodeIndex) {
        self.links[node as usize].right = child;
    }

    fn set_parent(&mut self, node: NodeIndex, parent: NodeIndex) {
        self.links[node as usize].set_parent(parent);
    }

    fn set_red(&mut self, node: NodeIndex, red: bool) {
        self.links[node as usize].set_red(red);
    }

    pub(crate) fn entry(&self, node: NodeIndex) -> &(K, V) {
        &self.entries[node as usize - 1]
    }

    fn entry_mut(&mut self, node: NodeIndex) -> &mut (K, V) {
        &mut self.entries[node as usize - 1]
    }

    fn key(&self, node: NodeIndex) -> &K {
        &self.entry(node).0
    }

    pub(crate) fn minimum(&self, mut node: NodeIndex) -> NodeIndex {
        while self.left(node) != SENTINEL {
            node = self.left(node);
        }
        node
    }

    fn maximum(&self, mut node: NodeIndex) -> NodeIndex {
        while self.right(node) != SENTINEL {
            node = self.right(node);
        }
        node
    }

    fn find<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while current != SENTINEL {
            match key.cmp(self.key(current).borrow()) {
                Ordering::Less => current = self.left(current),
                Ordering::Greater => current = self.right(current),
                Ordering::Equal => return current,
            }
        }
        SENTINEL
    }

    /// Node indices in key order.
    fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut iter = self.iter();
        std::iter::from_fn(move || iter.next_node())
    }

    /// Appends a new red leaf below `parent`. The caller links it into the parent.
    fn push_node(&mut self, key: K, value: V, parent: NodeIndex) -> NodeIndex {
        let node = to_index(self.links.len());
        let mut links = Links::SENTINEL;
        links.set_parent(parent);
        links.set_red(true);
        self.links.push(links);
        self.entries.push((key, value));
        node
    }

    fn rotate_left(&mut self, node: NodeIndex) {
        let pivot = self.right(node);
        let inner = self.left(pivot);
        self.set_right(node, inner);
        if inner != SENTINEL {
            self.set_parent(inner, node);
        }
        self.replace_child(self.parent(node), node, pivot);
        self.set_left(pivot, node);
        self.set_parent(node, pivot);
    }

    fn rotate_right(&mut self, node: NodeIndex) {
        let pivot = self.left(node);
        let inner = self.right(pivot);
        self.set_left(node, inner);
        if inner != SENTINEL {
            self.set_parent(inner, node);
        }
        self.replace_child(self.parent(node), node, pivot);
        self.set_right(pivot, node);
        self.set_parent(node, pivot);
    }

    /// Puts `new` where `old` hung below `parent`, or at the root, and points `new` at `parent`.
    /// `new` may be the sentinel, whose parent then names `parent` until the sentinel is reset.
    fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == SENTINEL {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
        self.set_parent(new, parent);
    }

    fn insert_fixup(&mut self, mut node: NodeIndex) {
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            // The parent is red, so it isn't the root and the grandparent is a real node.
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.is_red(uncle) {
                    self.set_red(parent, false);
                    self.set_red(uncle, false);
                    self.set_red(grandparent, true);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_red(parent, false);
                    self.set_red(grandparent, true);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.is_red(uncle) {
                    self.set_red(parent, false);
                    self.set_red(uncle, false);
                    self.set_red(grandparent, true);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_red(parent, false);
                    self.set_red(grandparent, true);
                    self.rotate_left(grandparent);
                }
            }
        }
        self.set_red(self.root, false);
    }

    /// Detaches `node` from the tree and rebalances. The node's slot is left in the arena.
    fn unlink(&mut self, node: NodeIndex) {
        let mut removed_red = self.is_red(node);
        let replacement;

        if self.left(node) == SENTINEL {
            replacement = self.right(node);
            self.replace_child(self.parent(node), node, replacement);
        } else if self.right(node) == SENTINEL {
            replacement = self.left(node);
            self.replace_child(self.parent(node), node, replacement);
        } else {
            let successor = self.minimum(self.right(node));
            removed_red = self.is_red(successor);
            replacement = self.right(successor);

            if self.parent(successor) == node {
                // The replacement may be the sentinel, which must know where it hangs for the
                // fixup below.
                self.set_parent(replacement, successor);
            } else {
                self.replace_child(self.parent(successor), successor, replacement);
                let right = self.right(node);
                self.set_right(successor, right);
                self.set_parent(right, successor);
            }

            self.replace_child(self.parent(node), node, successor);
            let left = self.left(node);
            self.set_left(successor, left);
            self.set_parent(left, successor);
            self.set_red(successor, self.is_red(node));
        }

        if !removed_red {
            self.remove_fixup(replacement);
        }
        self.links[SENTINEL as usize] = Links::SENTINEL;
    }

    fn remove_fixup(&mut self, mut node: NodeIndex) {
        while node != self.root && !self.is_red(node) {
            let parent = self.parent(node);

            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.is_red(sibling) {
                    self.set_red(sibling, false);
                    self.set_red(parent, true);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(node));
                }

                if !self.is_red(self.left(sibling)) && !self.is_red(self.right(sibling)) {
                    self.set_red(sibling, true);
                    node = self.parent(node);
                } else {
                    if !self.is_red(self.right(sibling)) {
                        self.set_red(self.left(sibling), false);
                        self.set_red(sibling, true);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(node));
                    }
                    let parent = self.parent(node);
                    self.set_red(sibling, self.is_red(parent));
                    self.set_red(parent, false);
                    self.set_red(self.right(sibling), false);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.is_red(sibling) {
                    self.set_red(sibling, false);
                    self.set_red(parent, true);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(node));
                }

                if !self.is_red(self.left(sibling)) && !self.is_red(self.right(sibling)) {
                    self.set_red(sibling, true);
                    node = self.parent(node);
                } else {
                    if !self.is_red(self.left(sibling)) {
                        self.set_red(self.right(sibling), false);
                        self.set_red(sibling, true);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(node));
                    }
                    let parent = self.parent(node);
                    self.set_red(sibling, self.is_red(parent));
                    self.set_red(parent, false);
                    self.set_red(self.left(sibling), false);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }
        self.set_red(node, false);
    }

    /// Moves the last node of the arena into the detached slot `node` and returns the detached
    /// node's entry.
    fn free_node(&mut self, node: NodeIndex) -> (K, V) {
        let last = to_index(self.links.len() - 1);
        if node != last {
            let moved = self.links[last as usize];
            let parent = moved.parent();
            if parent == SENTINEL {
                self.root = node;
            } else if self.left(parent) == last {
                self.set_left(parent, node);
            } else {
                self.set_right(parent, node);
            }
            if moved.left != SENTINEL {
                self.set_parent(moved.left, node);
            }
            if moved.right != SENTINEL {
                self.set_parent(moved.right, node);
            }
            self.links[node as usize] = moved;
        }
        self.links.truncate(last as usize);
        self.entries.swap_remove(node as usize - 1)
    }
}

/// Converts an arena position into a node index.
///
/// # Panics
/// Panics if the arena has outgrown the 31 bits available to an index.
fn to_index(position: usize) -> NodeIndex {
    match NodeIndex::try_from(position) {
        Ok(index) if index & Links::RED_BIT == 0 => index,
        _ => panic!("Red-black tree arena exceeded its index range!"),
    }
}

impl<K: Ord, V> Default for RBMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> Clone for RBMap<K, V> {
    fn clone(&self) -> Self {
        RBMap {
            links: self.links.clone(),
            entries: self.entries.clone(),
            root: self.root,
        }
    }
}

impl<K: Ord, V: PartialEq> PartialEq for RBMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for RBMap<K, V> {}

impl<K: Ord, V> Extend<(K, V)> for RBMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RBMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord + Debug, V: Debug> Debug for RBMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord + Display, V: Display> Display for RBMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
