use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::mem;

use super::Iter;
use crate::v2026::algorithm::lower_bound_by;
use crate::v2026::collections::contiguous::{FixedVector, Vector};
use crate::v2026::error::{InternalInvariant, internal_failure};
use crate::v2026::sum::Optional;

/// The index of a node in a B-tree's arena.
pub(crate) type NodeIndex = u32;

/// Stands in for a missing node: the root's parent, or the root of an empty tree.
pub(crate) const NONE: NodeIndex = NodeIndex::MAX;

/// A B-tree node. A node with no children is a leaf.
///
/// At rest a node holds at most `M - 1` keys and `M` children. The key storage has room for `M`
/// so that a key can be placed before an overflowing node is split.
pub(crate) struct Node<K, V, const M: usize> {
    pub(crate) parent: NodeIndex,
    pub(crate) keys: FixedVector<K, M>,
    pub(crate) values: FixedVector<V, M>,
    pub(crate) children: FixedVector<NodeIndex, M>,
}

impl<K, V, const M: usize> Node<K, V, M> {
    fn new(parent: NodeIndex) -> Node<K, V, M> {
        Node {
            parent,
            keys: FixedVector::new(),
            values: FixedVector::new(),
            children: FixedVector::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An ordered map stored as a B-tree with odd branching factor `M`, at least 5.
///
/// Nodes live in a dense arena and refer to each other by index. Every node but the root holds
/// between `(M - 1) / 2` and `M - 1` keys, and every leaf is at the same depth. Removal moves the
/// last node of the arena into the freed slot.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the BTreeMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `lookup` | `O(log n)` |
/// | `remove` | `O(log n)` |
pub struct BTreeMap<K: Ord, V, const M: usize = 5> {
    pub(crate) nodes: Vector<Node<K, V, M>>,
    pub(crate) root: NodeIndex,
    pub(crate) len: usize,
}

impl<K: Ord, V, const M: usize> BTreeMap<K, V, M> {
    /// The fewest keys a node other than the root may hold.
    pub const MIN_KEYS: usize = (M - 1) / 2;

    /// Creates an empty BTreeMap without allocating.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::tree::BTreeMap;
    /// let mut map: BTreeMap<u8, char, 7> = BTreeMap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// A branching factor that is even or less than 5 doesn't compile.
    /// ```compile_fail
    /// # use epoch_std::v2026::collections::tree::BTreeMap;
    /// let map: BTreeMap<u8, char, 4> = BTreeMap::new();
    /// ```
    pub fn new() -> BTreeMap<K, V, M> {
        const {
            assert!(M % 2 == 1 && M >= 5, "B-tree branching factor must be odd and at least 5");
        }
        BTreeMap {
            nodes: Vector::new(),
            root: NONE,
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `key` with `value`, returning the previous value if the key was already present.
    ///
    /// The key goes into a leaf. A leaf that overflows is split around its median key, which
    /// moves up into the parent, and splitting continues upwards while parents overflow. Splitting
    /// the root grows the tree by one level.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.root == NONE {
            let mut root = Node::new(NONE);
            root.keys.push(key);
            root.values.push(value);
            self.root = self.push_node(root);
            self.len = 1;
            return None;
        }

        let mut node = self.root;
        loop {
            let current = &self.nodes[node as usize];
            let pos = lower_bound_by(&current.keys, &key, |a, b| a < b);
            if pos < current.keys.len() && current.keys[pos] == key {
                let slot = &mut self.nodes[node as usize].values[pos];
                return Some(mem::replace(slot, value));
            }
            if current.is_leaf() {
                self.insert_into_node(node, pos, key, value, NONE);
                self.len += 1;
                return None;
            }
            node = current.children[pos];
        }
    }

    /// Returns a reference to the value stored for `key`, or Empty if there is none.
    pub fn lookup<Q>(&self, key: &Q) -> Optional<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some((node, pos)) => Optional::Value(&self.nodes[node as usize].values[pos]),
            None => Optional::Empty,
        }
    }

    /// Returns a mutable reference to the value stored for `key`, or Empty if there is none.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Optional<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some((node, pos)) => Optional::Value(&mut self.nodes[node as usize].values[pos]),
            None => Optional::Empty,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes the entry for `key` and returns it, or Empty if there was none.
    ///
    /// A key in an internal node is swapped with its in-order predecessor, which is always in a
    /// leaf. A leaf left with too few keys borrows one through the parent from a sibling that can
    /// spare it, or else is merged with a sibling, which may leave the parent short in turn.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Optional<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some((node, pos)) = self.find(key) else {
            return Optional::Empty;
        };

        let (leaf, entry) = if self.nodes[node as usize].is_leaf() {
            let leaf = &mut self.nodes[node as usize];
            (node, (leaf.keys.remove(pos), leaf.values.remove(pos)))
        } else {
            // The predecessor is the largest key of the left subtree.
            let mut leaf = self.nodes[node as usize].children[pos];
            while !self.nodes[leaf as usize].is_leaf() {
                let children = &self.nodes[leaf as usize].children;
                leaf = children[children.len() - 1];
            }
            let predecessor = &mut self.nodes[leaf as usize];
            let (key, value) = match (predecessor.keys.pop(), predecessor.values.pop()) {
                (Optional::Value(key), Optional::Value(value)) => (key, value),
                _ => internal_failure("non-root leaves are never empty"),
            };
            let target = &mut self.nodes[node as usize];
            let entry = (
                mem::replace(&mut target.keys[pos], key),
                mem::replace(&mut target.values[pos], value),
            );
            (leaf, entry)
        };

        self.len -= 1;
        self.rebalance(leaf);
        Optional::Value(entry)
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
        self.iter().next().into()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NONE;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V, M> {
        self.into_iter()
    }

    /// Returns the number of levels in the tree, 0 when it is empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root;
        while node != NONE {
            height += 1;
            node = match self.nodes[node as usize].children.front() {
                Ok(child) => *child,
                Err(_) => NONE,
            };
        }
        height
    }

    /// Checks every structural invariant of the tree: key counts are within bounds, keys are in
    /// order both within nodes and across subtrees, every internal node has one more child than
    /// keys, parent links agree with child links, every leaf is at the same depth and every
    /// node in the arena is reachable.
    ///
    /// # Errors
    /// Returns [`InternalInvariant`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InternalInvariant> {
        let fail = |reason| Err(InternalInvariant { reason });

        if self.root == NONE {
            return if self.nodes.is_empty() && self.len == 0 {
                Ok(())
            } else {
                fail("empty tree still holds nodes")
            };
        }
        if self.nodes[self.root as usize].parent != NONE {
            return fail("root has a parent");
        }

        let mut reachable = 0;
        let mut leaf_depth = None;
        let mut stack: Vector<(NodeIndex, usize)> = Vector::new();
        stack.push((self.root, 1));
        while let Optional::Value((index, depth)) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[index as usize];
            let count = node.keys.len();

            if count != node.values.len() {
                return fail("node has differing key and value counts");
            }
            if count >= M || (index != self.root && count < Self::MIN_KEYS) || count == 0 {
                return fail("node key count out of bounds");
            }
            if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
                return fail("node keys are out of order");
            }

            if node.is_leaf() {
                if *leaf_depth.get_or_insert(depth) != depth {
                    return fail("leaves at differing depths");
                }
                continue;
            }
            if node.children.len() != count + 1 {
                return fail("internal node child count doesn't match key count");
            }
            for child in node.children.iter() {
                if self.nodes[*child as usize].parent != index {
                    return fail("child's parent link doesn't point back");
                }
                stack.push((*child, depth + 1));
            }
        }

        if reachable != self.nodes.len() {
            return fail("not every node is reachable from the root");
        }
        let mut visited = 0;
        let mut previous: Option<&K> = None;
        for (key, _) in self.iter() {
            if previous.is_some_and(|previous| previous >= key) {
                return fail("keys are out of order across nodes");
            }
            previous = Some(key);
            visited += 1;
        }
        if visited != self.len {
            return fail("entry count doesn't match length");
        }
        Ok(())
    }
}

impl<K: Ord, V, const M: usize> BTreeMap<K, V, M> {
    fn find<Q>(&self, key: &Q) -> Option<(NodeIndex, usize)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while node != NONE {
            let current = &self.nodes[node as usize];
            let pos = lower_bound_by(&current.keys, key, |a, b| a.borrow() < b);
            if pos < current.keys.len() && current.keys[pos].borrow() == key {
                return Some((node, pos));
            }
            if current.is_leaf() {
                return None;
            }
            node = current.children[pos];
        }
        None
    }

    fn push_node(&mut self, node: Node<K, V, M>) -> NodeIndex {
        let index = to_index(self.nodes.len());
        self.nodes.push(node);
        index
    }

    /// Inserts `key` and `value` at `pos` in `node`, with `right` as the child following the new
    /// key unless it is [`NONE`]. Splits the node if it overflows.
    fn insert_into_node(
        &mut self,
        node: NodeIndex,
        pos: usize,
        key: K,
        value: V,
        right: NodeIndex,
    ) {
        let target = &mut self.nodes[node as usize];
        target.keys.insert(pos, key);
        target.values.insert(pos, value);

        if right == NONE {
            if target.keys.len() == M {
                self.split(node, None);
            }
        } else if target.children.is_full() {
            // The new child has no room until the node is split.
            self.split(node, Some((pos + 1, right)));
        } else {
            target.children.insert(pos + 1, right);
            self.nodes[right as usize].parent = node;
        }
    }

    /// Splits `node`, which holds `M` keys, around its median. The left half stays in place, the
    /// right half becomes a new sibling and the median moves up into the parent.
    ///
    /// `extra_child` is a child, with its position, that didn't fit in the full child storage.
    fn split(&mut self, node: NodeIndex, extra_child: Option<(usize, NodeIndex)>) {
        tracing::trace!(node, "splitting overflowing B-tree node");
        let median = M / 2;

        let target = &mut self.nodes[node as usize];
        let parent = target.parent;
        let right = Node {
            parent,
            keys: target.keys.split_off(median + 1),
            values: target.values.split_off(median + 1),
            children: FixedVector::new(),
        };
        let (median_key, median_value) = match (target.keys.pop(), target.values.pop()) {
            (Optional::Value(key), Optional::Value(value)) => (key, value),
            _ => internal_failure("an overflowing node has a median"),
        };

        // An internal node has M + 1 children at this point, one more than fits in a node.
        let mut all_children: Vector<NodeIndex> =
            mem::take(&mut target.children).into_iter().collect();
        if let Some((pos, child)) = extra_child {
            all_children.insert(pos, child);
        }
        let left_count = median + 1;

        let right_index = self.push_node(right);
        for (i, child) in all_children.into_iter().enumerate() {
            let owner = if i < left_count { node } else { right_index };
            self.nodes[owner as usize].children.push(child);
            self.nodes[child as usize].parent = owner;
        }

        if parent == NONE {
            let mut root = Node::new(NONE);
            root.keys.push(median_key);
            root.values.push(median_value);
            root.children.push(node);
            root.children.push(right_index);
            let root_index = self.push_node(root);
            self.nodes[node as usize].parent = root_index;
            self.nodes[right_index as usize].parent = root_index;
            self.root = root_index;
        } else {
            let pos = self.position_in_parent(node);
            self.insert_into_node(parent, pos, median_key, median_value, right_index);
        }
    }

    fn position_in_parent(&self, node: NodeIndex) -> usize {
        let parent = &self.nodes[self.nodes[node as usize].parent as usize];
        match parent.children.iter().position(|child| *child == node) {
            Some(pos) => pos,
            None => internal_failure("a node is always among its parent's children"),
        }
    }

    /// Restores the minimum key count of `node` after a removal, walking upwards while merges
    /// leave parents short.
    fn rebalance(&mut self, mut node: NodeIndex) {
        loop {
            let current = &self.nodes[node as usize];
            if node == self.root {
                if current.keys.is_empty() {
                    self.shrink_root();
                }
                return;
            }
            if current.keys.len() >= Self::MIN_KEYS {
                return;
            }

            let parent = current.parent;
            let pos = self.position_in_parent(node);
            let siblings = &self.nodes[parent as usize].children;
            let left = if pos > 0 { siblings[pos - 1] } else { NONE };
            let right = siblings.get(pos + 1).copied().unwrap_or(NONE);

            if left != NONE && self.nodes[left as usize].keys.len() > Self::MIN_KEYS {
                self.rotate_from_left(parent, pos);
                return;
            }
            if right != NONE && self.nodes[right as usize].keys.len() > Self::MIN_KEYS {
                self.rotate_from_right(parent, pos);
                return;
            }

            let survivor = if left != NONE {
                self.merge(parent, pos - 1)
            } else {
                self.merge(parent, pos)
            };
            node = survivor;
        }
    }

    /// The root has lost its last key: an internal root is replaced by its only child, and a leaf
    /// root means the tree is empty.
    fn shrink_root(&mut self) {
        let old_root = self.root;
        match self.nodes[old_root as usize].children.front() {
            Ok(child) => {
                let child = *child;
                self.nodes[old_root as usize].children.clear();
                self.nodes[child as usize].parent = NONE;
                self.root = child;
                self.free_node(old_root);
            },
            Err(_) => self.clear(),
        }
    }

    /// Moves the separator at `pos - 1` down into the child at `pos`, and the last key of the
    /// left sibling up to replace it.
    fn rotate_from_left(&mut self, parent: NodeIndex, pos: usize) {
        let node = self.nodes[parent as usize].children[pos];
        let left = self.nodes[parent as usize].children[pos - 1];

        let donor = &mut self.nodes[left as usize];
        let (key, value) = match (donor.keys.pop(), donor.values.pop()) {
            (Optional::Value(key), Optional::Value(value)) => (key, value),
            _ => internal_failure("the donor has spare keys"),
        };
        let moved_child = donor.children.pop();

        let separator = &mut self.nodes[parent as usize];
        let key = mem::replace(&mut separator.keys[pos - 1], key);
        let value = mem::replace(&mut separator.values[pos - 1], value);

        let target = &mut self.nodes[node as usize];
        target.keys.insert(0, key);
        target.values.insert(0, value);
        if let Optional::Value(child) = moved_child {
            target.children.insert(0, child);
            self.nodes[child as usize].parent = node;
        }
    }

    /// Moves the separator at `pos` down into the child at `pos`, and the first key of the right
    /// sibling up to replace it.
    fn rotate_from_right(&mut self, parent: NodeIndex, pos: usize) {
        let node = self.nodes[parent as usize].children[pos];
        let right = self.nodes[parent as usize].children[pos + 1];

        let donor = &mut self.nodes[right as usize];
        let (key, value) = match (donor.keys.pop_front(), donor.values.pop_front()) {
            (Optional::Value(key), Optional::Value(value)) => (key, value),
            _ => internal_failure("the donor has spare keys"),
        };
        let moved_child = donor.children.pop_front();

        let separator = &mut self.nodes[parent as usize];
        let key = mem::replace(&mut separator.keys[pos], key);
        let value = mem::replace(&mut separator.values[pos], value);

        let target = &mut self.nodes[node as usize];
        target.keys.push(key);
        target.values.push(value);
        if let Optional::Value(child) = moved_child {
            target.children.push(child);
            self.nodes[child as usize].parent = node;
        }
    }

    /// Merges the children at `pos` and `pos + 1` of `parent` around their separator, freeing
    /// the right one. Returns the parent's index, which the freeing may have changed.
    fn merge(&mut self, parent: NodeIndex, pos: usize) -> NodeIndex {
        tracing::trace!(parent, pos, "merging B-tree nodes");

        let separator = &mut self.nodes[parent as usize];
        let left = separator.children[pos];
        let right = separator.children.remove(pos + 1);
        let key = separator.keys.remove(pos);
        let value = separator.values.remove(pos);

        let donor = &mut self.nodes[right as usize];
        let mut keys = mem::take(&mut donor.keys);
        let mut values = mem::take(&mut donor.values);
        let mut children = mem::take(&mut donor.children);

        for child in children.iter() {
            self.nodes[*child as usize].parent = left;
        }
        let target = &mut self.nodes[left as usize];
        target.keys.push(key);
        target.values.push(value);
        // Both halves were at or below the minimum, so the merged node is within capacity.
        if target.keys.append(&mut keys).is_err()
            || target.values.append(&mut values).is_err()
            || target.children.append(&mut children).is_err()
        {
            internal_failure("merged B-tree node exceeds capacity");
        }

        let moved_from = self.free_node(right);
        if moved_from == parent { right } else { parent }
    }

    /// Moves the last node of the arena into the detached slot `index` and returns the moved
    /// node's old index.
    fn free_node(&mut self, index: NodeIndex) -> NodeIndex {
        let last = to_index(self.nodes.len() - 1);
        if index != last {
            let parent = self.nodes[last as usize].parent;
            if parent == NONE {
                self.root = index;
            } else {
                for child in self.nodes[parent as usize].children.iter_mut() {
                    if *child == last {
                        *child = index;
                    }
                }
            }
            let children = self.nodes[last as usize].children.clone();
            for child in children.iter() {
                self.nodes[*child as usize].parent = index;
            }
        }
        // Dropping the detached node, which is empty by now.
        drop(self.nodes.swap_remove(index as usize));
        last
    }
}

/// Converts an arena position into a node index.
///
/// # Panics
/// Panics if the arena has outgrown the index range.
fn to_index(position: usize) -> NodeIndex {
    match NodeIndex::try_from(position) {
        Ok(index) if index != NONE => index,
        _ => panic!("B-tree arena exceeded its index range!"),
    }
}

impl<K: Ord, V, const M: usize> Default for BTreeMap<K, V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V, const M: usize> Extend<(K, V)> for BTreeMap<K, V, M> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const M: usize> FromIterator<(K, V)> for BTreeMap<K, V, M> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord + Debug, V: Debug, const M: usize> Debug for BTreeMap<K, V, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
