use std::hash::{BuildHasher, Hash};
use std::iter::{FusedIterator, Zip};
use std::mem::MaybeUninit;
use std::slice;

use super::HashMap;
use super::metadata::SlotMetadata;

type Slots<'a, K, V> = Zip<
    Zip<slice::Iter<'a, SlotMetadata>, slice::Iter<'a, MaybeUninit<K>>>,
    slice::Iter<'a, MaybeUninit<V>>,
>;

type SlotsMut<'a, K, V> = Zip<
    Zip<slice::Iter<'a, SlotMetadata>, slice::Iter<'a, MaybeUninit<K>>>,
    slice::IterMut<'a, MaybeUninit<V>>,
>;

impl<'a, K: Hash + Eq, V, B: BuildHasher> IntoIterator for &'a HashMap<K, V, B> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.metadata.iter().zip(self.keys.iter()).zip(self.values.iter()),
            remaining: self.len,
        }
    }
}

/// Walks the slot arrays in table order, skipping every slot that isn't live.
pub struct Iter<'a, K, V> {
    inner: Slots<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for ((slot, key), value) in self.inner.by_ref() {
            if slot.is_live() {
                self.remaining -= 1;
                // SAFETY: Live slots hold initialized keys and values.
                return Some(unsafe { (key.assume_init_ref(), value.assume_init_ref()) });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K: Hash + Eq, V, B: BuildHasher> IntoIterator for &'a mut HashMap<K, V, B> {
    type Item = (&'a K, &'a mut V);

    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            inner: self.metadata.iter().zip(self.keys.iter()).zip(self.values.iter_mut()),
            remaining: self.len,
        }
    }
}

/// As [`Iter`], but with mutable access to the values. Keys stay immutable.
pub struct IterMut<'a, K, V> {
    inner: SlotsMut<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for ((slot, key), value) in self.inner.by_ref() {
            if slot.is_live() {
                self.remaining -= 1;
                // SAFETY: Live slots hold initialized keys and values.
                return Some(unsafe { (key.assume_init_ref(), value.assume_init_mut()) });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: Hash + Eq, V, B: BuildHasher> IntoIterator for HashMap<K, V, B> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, B>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            map: self,
            index: 0,
        }
    }
}

/// An owned iterator over the entries of a [`HashMap`]. Entries that aren't yielded are dropped
/// with the iterator.
pub struct IntoIter<K: Hash + Eq, V, B: BuildHasher> {
    map: HashMap<K, V, B>,
    index: usize,
}

impl<K: Hash + Eq, V, B: BuildHasher> Iterator for IntoIter<K, V, B> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.map.cap() {
            let index = self.index;
            self.index += 1;
            if self.map.metadata[index].is_live() {
                // The slot is marked empty before its contents move out so the map's drop skips
                // it.
                self.map.metadata[index] = SlotMetadata::EMPTY;
                self.map.len -= 1;
                // SAFETY: The slot was live, and it is no longer considered initialized.
                return Some(unsafe {
                    (
                        self.map.keys[index].assume_init_read(),
                        self.map.values[index].assume_init_read(),
                    )
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len, Some(self.map.len))
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> ExactSizeIterator for IntoIter<K, V, B> {}

impl<K: Hash + Eq, V, B: BuildHasher> FusedIterator for IntoIter<K, V, B> {}

pub struct Keys<'a, K, V>(
    pub(crate) Iter<'a, K, V>
);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(
    pub(crate) Iter<'a, K, V>
);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V>(
    pub(crate) IterMut<'a, K, V>
);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
