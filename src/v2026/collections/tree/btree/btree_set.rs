use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};

use super::{BTreeMap, Iter};
use crate::v2026::error::InternalInvariant;

/// An ordered set of keys, a [`BTreeMap`] whose values are the unit type.
pub struct BTreeSet<K: Ord, const M: usize = 5> {
    pub(crate) inner: BTreeMap<K, (), M>,
}

impl<K: Ord, const M: usize> BTreeSet<K, M> {
    pub fn new() -> BTreeSet<K, M> {
        BTreeSet {
            inner: BTreeMap::new(),
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

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains(key)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// See [`BTreeMap::check_invariants`].
    ///
    /// # Errors
    /// Returns [`InternalInvariant`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InternalInvariant> {
        self.inner.check_invariants()
    }

    pub fn iter(&self) -> Keys<'_, K, M> {
        self.into_iter()
    }
}

impl<K: Ord, const M: usize> Default for BTreeSet<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, const M: usize> Extend<K> for BTreeSet<K, M> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, const M: usize> FromIterator<K> for BTreeSet<K, M> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = BTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord + Debug, const M: usize> Debug for BTreeSet<K, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord, const M: usize> IntoIterator for &'a BTreeSet<K, M> {
    type Item = &'a K;

    type IntoIter = Keys<'a, K, M>;

    fn into_iter(self) -> Self::IntoIter {
        Keys(self.inner.iter())
    }
}

/// An in-order iterator over the keys of a [`BTreeSet`].
pub struct Keys<'a, K: Ord, const M: usize>(
    Iter<'a, K, (), M>,
);

impl<'a, K: Ord, const M: usize> Iterator for Keys<'a, K, M> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, ())| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord, const M: usize> ExactSizeIterator for Keys<'_, K, M> {}
