use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash};

use super::{Difference, Intersection, Iter, SymmetricDifference, Union};
use crate::v2026::collections::hash::{HashMap, SimpleHashBuilder};

/// A set of values which relies on them implementing [`Hash`], stored as the keys of a
/// [`HashMap`] to the unit type.
pub struct HashSet<T: Hash + Eq, B: BuildHasher = SimpleHashBuilder> {
    // The unit value takes no space in the table.
    pub(crate) inner: HashMap<T, (), B>,
}

impl<T: Hash + Eq, B: BuildHasher + Default> HashSet<T, B> {
    pub fn new() -> HashSet<T, B> {
        HashSet {
            inner: HashMap::new(),
        }
    }

    pub fn with_cap(cap: usize) -> HashSet<T, B> {
        HashSet {
            inner: HashMap::with_cap(cap),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> HashSet<T, B> {
    pub fn with_hasher(hasher: B) -> HashSet<T, B> {
        HashSet {
            inner: HashMap::with_hasher(hasher),
        }
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub const fn cap(&self) -> usize {
        self.inner.cap()
    }

    /// Adds `item` to the set, returning true if it wasn't already present. An equal item already
    /// in the set is kept and `item` is dropped.
    pub fn insert(&mut self, item: T) -> bool {
        let hash = self.inner.hash_key(&item);
        if self.inner.find_index(hash, &item).is_some() {
            return false;
        }
        self.inner.make_room_for_one();
        self.inner.insert_new(hash, item, ());
        true
    }

    /// Removes `item` from the set, returning true if it was present.
    pub fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove_entry(item).has_value()
    }

    /// Removes and returns the set's copy of `item`, if there is one.
    pub fn take<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove_entry(item).into_option().map(|(item, ())| item)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(item)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn reserve(&mut self, extra: usize) {
        self.inner.reserve(extra);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns the items of self that aren't in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, B>) -> Difference<'a, T, B> {
        Difference {
            inner: self.iter(),
            other,
        }
    }

    /// Returns the items that are in exactly one of the two sets.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, B>,
    ) -> SymmetricDifference<'a, T, B> {
        SymmetricDifference {
            inner: self.difference(other).chain(other.difference(self)),
        }
    }

    /// Returns the items that are in both sets.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, B>) -> Intersection<'a, T, B> {
        Intersection {
            inner: self.iter(),
            other,
        }
    }

    /// Returns every item of either set, once.
    pub fn union<'a>(&'a self, other: &'a HashSet<T, B>) -> Union<'a, T, B> {
        Union {
            inner: self.iter().chain(other.difference(self)),
        }
    }

    /// Returns true if every item of self is also in `other`.
    pub fn is_subset(&self, other: &HashSet<T, B>) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    /// Returns true if every item of `other` is also in self.
    pub fn is_superset(&self, other: &HashSet<T, B>) -> bool {
        other.is_subset(self)
    }

    /// Returns true if the two sets have no items in common.
    pub fn is_disjoint(&self, other: &HashSet<T, B>) -> bool {
        self.intersection(other).next().is_none()
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> Default for HashSet<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> Clone for HashSet<T, B> {
    fn clone(&self) -> Self {
        HashSet {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> PartialEq for HashSet<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Hash + Eq, B: BuildHasher> Eq for HashSet<T, B> {}

impl<T: Hash + Eq, B: BuildHasher> Extend<T> for HashSet<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for HashSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut set = HashSet::with_cap(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq + Debug, B: BuildHasher> Debug for HashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
