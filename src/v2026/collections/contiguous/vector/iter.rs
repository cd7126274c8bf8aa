use std::iter::FusedIterator;
use std::mem::{self, MaybeUninit};
use std::slice;

use super::Vector;
use crate::v2026::ptr::UniqueArray;

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let end = self.len;
        // Take the block and mark the Vector empty so that dropping it does nothing.
        self.len = 0;
        IntoIter {
            buf: mem::take(&mut self.buf),
            start: 0,
            end,
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owned iterator over the elements of a [`Vector`], see [`Vector::into_iter`].
///
/// The elements in `start..end` of the block are initialized and haven't been yielded yet.
pub struct IntoIter<T> {
    buf: UniqueArray<MaybeUninit<T>>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements that haven't been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The range start..end is initialized and within the block.
        unsafe {
            slice::from_raw_parts(self.buf.as_ptr().add(self.start).cast(), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: The slot at start is initialized, and incrementing start means it is never read
        // or dropped again.
        let value = unsafe { self.buf[self.start].assume_init_read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: The slot at the old end - 1 is initialized, and decrementing end means it is
        // never read or dropped again.
        Some(unsafe { self.buf[self.end].assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        while self.start < self.end {
            self.end -= 1;
            // SAFETY: Every slot in start..end is initialized and is dropped exactly once.
            unsafe { self.buf[self.end].assume_init_drop() }
        }
    }
}
