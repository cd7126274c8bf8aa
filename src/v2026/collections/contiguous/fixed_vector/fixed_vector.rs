use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::v2026::error::{CapacityExhausted, EmptyCollection, Error, IndexOutOfBounds};
use crate::v2026::sum::Optional;
use crate::v2026::util::extension::ResultExtension;

/// A sequence of at most `N` elements, stored inline with no heap allocation.
///
/// Operations that would grow the sequence past `N` come in two forms: one that panics with
/// [`CapacityExhausted`] and a `try_` form that hands the rejected value back.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the FixedVector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second FixedVector.
///
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `pop_front` | `O(n)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `append` | `O(m)` |
pub struct FixedVector<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> FixedVector<T, N> {
    /// Creates an empty FixedVector.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::FixedVector;
    /// let vec: FixedVector<u8, 4> = FixedVector::new();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub const fn new() -> FixedVector<T, N> {
        FixedVector {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Pushes `value` onto the end, or hands it back if the FixedVector is full.
    ///
    /// # Errors
    /// Returns `Err(value)` if the FixedVector already holds `N` elements.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::FixedVector;
    /// let mut vec: FixedVector<u8, 1> = FixedVector::new();
    /// assert_eq!(vec.try_push(1), Ok(()));
    /// assert_eq!(vec.try_push(2), Err(2));
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        if self.len == N {
            return Err(value);
        }
        self.data[self.len] = MaybeUninit::new(value);
        self.len += 1;
        Ok(())
    }

    /// Pushes `value` onto the end.
    ///
    /// # Panics
    /// Panics if the FixedVector is full.
    #[track_caller]
    pub fn push(&mut self, value: T) {
        if self.try_push(value).is_err() {
            Err(CapacityExhausted {
                cap: N,
            }).throw()
        }
    }

    /// Inserts `value` at `index`, moving the following elements back, or hands it back if the
    /// index is past the end or the FixedVector is full.
    ///
    /// # Errors
    /// Returns `Err(value)` if `index > len` or the FixedVector is full.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), T> {
        if self.check_insert(index).is_err() {
            return Err(value);
        }
        // SAFETY: index <= len < N, so both the shifted range and the written slot are in bounds.
        unsafe {
            let base = self.data.as_mut_ptr();
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            base.add(index).write(MaybeUninit::new(value));
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `value` at `index`, moving the following elements back.
    ///
    /// # Panics
    /// Panics if `index > len` or the FixedVector is full.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        self.check_insert(index).throw();
        if self.try_insert(index, value).is_err() {
            unreachable!()
        }
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Optional<T> {
        if self.len == 0 {
            return Optional::Empty;
        }
        self.len -= 1;
        // SAFETY: The slot at the old last index is initialized and now lies past len.
        Optional::Value(unsafe { self.data[self.len].assume_init_read() })
    }

    /// Removes and returns the first element, moving the others forward.
    pub fn pop_front(&mut self) -> Optional<T> {
        if self.len == 0 {
            return Optional::Empty;
        }
        Optional::Value(self.remove(0))
    }

    /// Removes and returns the element at `index`, moving the following elements forward.
    ///
    /// # Panics
    /// Panics if `index` isn't less than the length.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index).throw();
        // SAFETY: index < len, so the slot is initialized. It is read out before the tail is moved
        // over it.
        unsafe {
            let base = self.data.as_mut_ptr();
            let value = base.add(index).read().assume_init();
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Destroys the element at `index`, moving the following elements forward.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length.
    pub fn delete_at(&mut self, index: usize) -> Result<(), IndexOutOfBounds> {
        self.check_index(index)?;
        drop(self.remove(index));
        Ok(())
    }

    /// Moves every element of `other` onto the end of self, leaving `other` empty.
    ///
    /// # Errors
    /// Returns [`CapacityExhausted`] without moving anything if the combined length exceeds `N`.
    pub fn append(&mut self, other: &mut FixedVector<T, N>) -> Result<(), CapacityExhausted> {
        if self.len + other.len > N {
            return Err(CapacityExhausted {
                cap: N,
            });
        }
        // SAFETY: The destination range fits within N, and the two FixedVectors are distinct
        // objects. Setting other's len to 0 transfers ownership of the moved values.
        unsafe {
            ptr::copy_nonoverlapping(
                other.data.as_ptr(),
                self.data.as_mut_ptr().add(self.len),
                other.len,
            );
        }
        self.len += other.len;
        other.len = 0;
        Ok(())
    }

    /// Splits off the elements from `at` onwards into a new FixedVector.
    ///
    /// # Panics
    /// Panics if `at` is greater than the length.
    #[track_caller]
    pub fn split_off(&mut self, at: usize) -> FixedVector<T, N> {
        self.check_insert_index(at).throw();
        let mut tail = FixedVector::new();
        // SAFETY: at..len is initialized and fits within the new FixedVector. Truncating len
        // transfers ownership.
        unsafe {
            ptr::copy_nonoverlapping(
                self.data.as_ptr().add(at),
                tail.data.as_mut_ptr(),
                self.len - at,
            );
        }
        tail.len = self.len - at;
        self.len = at;
        tail
    }

    /// Drops every element past `len`, last first.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.len -= 1;
            // SAFETY: The slot was initialized and now lies past len.
            unsafe { self.data[self.len].assume_init_drop() }
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length.
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        Ok(&self[index])
    }

    /// # Errors
    /// Returns [`EmptyCollection`] if the FixedVector is empty.
    pub fn front(&self) -> Result<&T, EmptyCollection> {
        self.first().ok_or(EmptyCollection)
    }

    /// # Errors
    /// Returns [`EmptyCollection`] if the FixedVector is empty.
    pub fn back(&self) -> Result<&T, EmptyCollection> {
        self.last().ok_or(EmptyCollection)
    }

    const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    const fn check_insert_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index <= self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    fn check_insert(&self, index: usize) -> Result<(), Error> {
        self.check_insert_index(index)?;
        if self.len == N {
            return Err(CapacityExhausted {
                cap: N,
            }.into());
        }
        Ok(())
    }

    /// Moves the storage out, leaving self empty. The caller owns the first `len` slots.
    pub(crate) fn take_data(&mut self) -> ([MaybeUninit<T>; N], usize) {
        let len = self.len;
        self.len = 0;
        // SAFETY: MaybeUninit is never dropped implicitly, and self no longer considers any slot
        // initialized, so the bitwise copy is the only owner.
        (unsafe { ptr::read(&self.data) }, len)
    }
}

impl<T, const N: usize> Default for FixedVector<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for FixedVector<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Deref for FixedVector<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized.
        unsafe { slice::from_raw_parts(self.data.as_ptr().cast(), self.len) }
    }
}

impl<T, const N: usize> DerefMut for FixedVector<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The first len slots are initialized and we hold a mutable borrow of self.
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr().cast(), self.len) }
    }
}

impl<T: Clone, const N: usize> Clone for FixedVector<T, N> {
    fn clone(&self) -> Self {
        let mut result = FixedVector::new();
        for value in self.iter() {
            // Can't fail, self holds at most N values.
            let _ = result.try_push(value.clone());
        }
        result
    }
}

impl<T: PartialEq, const N: usize> PartialEq for FixedVector<T, N> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, const N: usize> Eq for FixedVector<T, N> {}

impl<T: Hash, const N: usize> Hash for FixedVector<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, const N: usize> Debug for FixedVector<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
