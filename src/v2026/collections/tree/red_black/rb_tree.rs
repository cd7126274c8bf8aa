use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};

use super::{IntoIter, Iter, RBMap};
use crate::v2026::error::InternalInvariant;
use crate::v2026::sum::Optional;

/// An ordered set of keys, an [`RBMap`] whose values are the unit type.
///
/// Inserting a key that is already present does nothing.
pub struct RBTree<K: Ord> {
    pub(crate) inner: RBMap<K, ()>,
}

impl<K: Ord> RBTree<K> {
    pub fn new() -> RBTree<K> {
        RBTree {
            inner: RBMap::new(),
        }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Adds `key`, returning true if it wasn't already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.inner.contains(&key) {
            return false;
        }
        self.inner.insert(key, ());
        true
    }

    /// Removes `key`, returning true if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.remove_entry(key).has_value()
    }

    /// Returns the set's copy of `key`, or Empty if there is none.
    pub fn lookup<Q>(&self, key: &Q) -> Optional<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.lookup_entry(key).map(|(key, ())| key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains(key)
    }

    pub fn first(&self) -> Optional<&K> {
        self.inner.first().map(|(key, ())| key)
    }

    pub fn last(&self) -> Optional<&K> {
        self.inner.last().map(|(key, ())| key)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// See [`RBMap::optimize_layout`].
    pub fn optimize_layout(&mut self) {
        self.inner.optimize_layout();
    }

    /// See [`RBMap::check_invariants`].
    ///
    /// # Errors
    /// Returns [`InternalInvariant`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InternalInvariant> {
        self.inner.check_invariants()
    }

    pub fn iter(&self) -> Keys<'_, K> {
        self.into_iter()
    }
}

impl<K: Ord> Default for RBTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> Clone for RBTree<K> {
    fn clone(&self) -> Self {
        RBTree {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Ord> PartialEq for RBTree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Ord> Eq for RBTree<K> {}

impl<K: Ord> Extend<K> for RBTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RBTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + Debug> Debug for RBTree<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord> IntoIterator for &'a RBTree<K> {
    type Item = &'a K;

    type IntoIter = Keys<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        Keys(self.inner.iter())
    }
}

/// An in-order iterator over the keys of an [`RBTree`].
pub struct Keys<'a, K: Ord>(
    Iter<'a, K, ()>,
);

impl<'a, K: Ord> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, ())| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord> ExactSizeIterator for Keys<'_, K> {}

impl<K: Ord> IntoIterator for RBTree<K> {
    type Item = K;

    type IntoIter = IntoKeys<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoKeys(self.inner.into_iter())
    }
}

/// An owned in-order iterator over the keys of an [`RBTree`].
pub struct IntoKeys<K>(
    IntoIter<K, ()>,
);

impl<K> Iterator for IntoKeys<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, ())| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoKeys<K> {}
