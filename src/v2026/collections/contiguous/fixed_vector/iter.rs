use std::iter::FusedIterator;
use std::mem::MaybeUninit;
use std::slice;

use super::FixedVector;

impl<T, const N: usize> IntoIterator for FixedVector<T, N> {
    type Item = T;

    type IntoIter = IntoIter<T, N>;

    fn into_iter(mut self) -> Self::IntoIter {
        let (data, end) = self.take_data();
        IntoIter {
            data,
            start: 0,
            end,
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedVector<T, N> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedVector<T, N> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owned iterator over the elements of a [`FixedVector`].
pub struct IntoIter<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    start: usize,
    end: usize,
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: Slots in start..end are initialized and each is read once.
        Some(unsafe { self.data[index].assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: As above, the slot at end was initialized and is now outside the live range.
        Some(unsafe { self.data[self.end].assume_init_read() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        for slot in &mut self.data[self.start..self.end] {
            // SAFETY: Unyielded slots are still initialized.
            unsafe { slot.assume_init_drop() }
        }
    }
}
