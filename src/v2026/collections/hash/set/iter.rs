use std::hash::{BuildHasher, Hash};
use std::iter::{Chain, FusedIterator};

use super::HashSet;
use crate::v2026::collections::hash::map::{self, Keys};

impl<T: Hash + Eq, B: BuildHasher> IntoIterator for HashSet<T, B> {
    type Item = T;

    type IntoIter = IntoIter<T, B>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.inner.into_iter())
    }
}

pub struct IntoIter<T: Hash + Eq, B: BuildHasher>(
    pub(crate) map::IntoIter<T, (), B>,
);

impl<T: Hash + Eq, B: BuildHasher> Iterator for IntoIter<T, B> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(item, ())| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T: Hash + Eq, B: BuildHasher> ExactSizeIterator for IntoIter<T, B> {}

impl<'a, T: Hash + Eq, B: BuildHasher> IntoIterator for &'a HashSet<T, B> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.inner.keys())
    }
}

pub struct Iter<'a, T>(
    pub(crate) Keys<'a, T, ()>,
);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub struct Difference<'a, T: Hash + Eq, B: BuildHasher> {
    pub(crate) inner: Iter<'a, T>,
    pub(crate) other: &'a HashSet<T, B>,
}

impl<'a, T: Hash + Eq, B: BuildHasher> Iterator for Difference<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.inner.find(|item| !other.contains(*item))
    }
}

impl<T: Hash + Eq, B: BuildHasher> FusedIterator for Difference<'_, T, B> {}

pub struct SymmetricDifference<'a, T: Hash + Eq, B: BuildHasher> {
    pub(crate) inner: Chain<Difference<'a, T, B>, Difference<'a, T, B>>,
}

impl<'a, T: Hash + Eq, B: BuildHasher> Iterator for SymmetricDifference<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T: Hash + Eq, B: BuildHasher> FusedIterator for SymmetricDifference<'_, T, B> {}

pub struct Intersection<'a, T: Hash + Eq, B: BuildHasher> {
    pub(crate) inner: Iter<'a, T>,
    pub(crate) other: &'a HashSet<T, B>,
}

impl<'a, T: Hash + Eq, B: BuildHasher> Iterator for Intersection<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.inner.find(|item| other.contains(*item))
    }
}

impl<T: Hash + Eq, B: BuildHasher> FusedIterator for Intersection<'_, T, B> {}

pub struct Union<'a, T: Hash + Eq, B: BuildHasher> {
    pub(crate) inner: Chain<Iter<'a, T>, Difference<'a, T, B>>,
}

impl<'a, T: Hash + Eq, B: BuildHasher> Iterator for Union<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T: Hash + Eq, B: BuildHasher> FusedIterator for Union<'_, T, B> {}
