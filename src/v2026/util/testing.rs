//! Helpers shared by the unit tests of this epoch.
#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::hash::{BuildHasher, Hash, Hasher};
use std::rc::Rc;

use crate::v2026::collections::contiguous::Vector;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroSizedType;

/// Increments the shared counter every time an instance is dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new(counter: &Rc<Cell<usize>>) -> CountedDrop {
        CountedDrop(Rc::clone(counter))
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Records its id into a shared log when dropped, for checking drop order.
#[derive(Debug)]
pub struct OrderedDrop {
    pub id: usize,
    pub log: Rc<RefCell<Vector<usize>>>,
}

impl Drop for OrderedDrop {
    fn drop(&mut self) {
        self.log.borrow_mut().push(self.id);
    }
}

/// A key whose hash is chosen by the test, so that collisions can be forced.
#[derive(Debug, Clone)]
pub struct ManualHash<T: Eq> {
    hash: u64,
    value: T,
}

impl<T: Eq> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash {
            hash,
            value,
        }
    }

    pub fn value(self) -> T {
        self.value
    }
}

impl<T: Eq> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: Eq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// A hasher which ignores everything but the last `u64` written, so a [`ManualHash`] hashes to
/// exactly its chosen value regardless of salt.
#[derive(Debug, Default)]
pub struct BadHasher {
    state: u64,
}

impl Hasher for BadHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, _bytes: &[u8]) {}

    fn write_u64(&mut self, value: u64) {
        self.state = value;
    }
}

#[derive(Debug, Default, Clone)]
pub struct BadHasherBuilder;

impl BuildHasher for BadHasherBuilder {
    type Hasher = BadHasher;

    fn build_hasher(&self) -> Self::Hasher {
        BadHasher::default()
    }
}
