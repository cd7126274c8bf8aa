use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::v2026::error::{EmptyCollection, IndexOutOfBounds};
use crate::v2026::ptr::UniqueArray;
use crate::v2026::sum::Optional;
use crate::v2026::util::extension::ResultExtension;

/// The smallest capacity a Vector grows to, to avoid many tiny reallocations.
pub const MIN_CAP: usize = 16;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, based on [`UniqueArray<T>`].
///
/// The backing block is aligned to the greater of `T`'s alignment and
/// [`MIN_ALIGN`](crate::v2026::ptr::MIN_ALIGN). Growing allocates a new block, moves every element
/// across and only then frees the old block. Elements are destroyed in reverse order, both on
/// [`clear`](Vector::clear) and when the Vector is dropped.
///
/// Appending a range of a Vector to itself can't be expressed: the borrow checker rejects holding
/// a slice of the Vector while mutating it. [`push_copy_of`](Vector::push_copy_of) covers the one
/// useful self-referencing case, pushing a copy of an existing element.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `swap_remove` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) buf: UniqueArray<MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated on the first push.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub fn new() -> Vector<T> {
        Vector {
            buf: UniqueArray::new_uninit(0),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity exactly equal to the provided value.
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector {
            buf: UniqueArray::new_uninit(cap),
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn cap(&self) -> usize {
        self.buf.size()
    }

    /// Pushes the provided value onto the end of the Vector, growing if required.
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 16);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Pushes the value produced by `make` and returns a reference to it. The slot is reserved
    /// before `make` runs, so the value is constructed directly for its final position.
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        if self.len == self.cap() {
            self.grow();
        }
        let slot = &mut self.buf[self.len];
        let value = slot.write(make());
        self.len += 1;
        value
    }

    /// Pushes the provided value, assuming that there is enough capacity to do so.
    ///
    /// # Safety
    /// The caller must ensure that `len < cap`, for example through [`Vector::reserve`].
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees that the slot at len is within the capacity.
        unsafe { self.buf.ptr.add(self.len).write(MaybeUninit::new(value)) }
        self.len += 1;
    }

    /// Pushes a copy of the element at `index` onto the end. The copy is taken before any
    /// reallocation, so it is safe even when the push has to grow the Vector.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = ["a".to_string()].into_iter().collect();
    /// vec.push_copy_of(0).unwrap();
    /// assert_eq!(&*vec, &["a", "a"]);
    /// ```
    pub fn push_copy_of(&mut self, index: usize) -> Result<(), IndexOutOfBounds>
    where
        T: Clone,
    {
        let temp = self.at(index)?.clone();
        self.push(temp);
        Ok(())
    }

    /// Pops the last value off the end of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Vector;
    /// # use epoch_std::v2026::sum::Optional;
    /// let mut vec: Vector<_> = (0..2).collect();
    /// assert_eq!(vec.pop(), Optional::Value(1));
    /// assert_eq!(vec.pop(), Optional::Value(0));
    /// assert_eq!(vec.pop(), Optional::Empty);
    /// ```
    pub fn pop(&mut self) -> Optional<T> {
        if self.len == 0 {
            Optional::Empty
        } else {
            self.len -= 1;
            // SAFETY: The slot at the old last index is initialized, and decrementing len first
            // means it is never read again.
            Optional::Value(unsafe { self.buf.ptr.add(self.len).read().assume_init() })
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length.
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let len = self.len;
        self.get(index).ok_or(IndexOutOfBounds {
            index,
            len,
        })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.get_mut(index).ok_or(IndexOutOfBounds {
            index,
            len,
        })
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Vector is empty.
    pub fn front(&self) -> Result<&T, EmptyCollection> {
        self.first().ok_or(EmptyCollection)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Vector is empty.
    pub fn back(&self) -> Result<&T, EmptyCollection> {
        self.last().ok_or(EmptyCollection)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Vector is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        self.last_mut().ok_or(EmptyCollection)
    }

    /// Inserts the provided value at `index`, moving all following values back.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(4, 200);
    /// assert_eq!(&*vec, &[0, 100, 1, 2, 200]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }

        if self.len == self.cap() {
            self.grow();
        }

        // SAFETY: The capacity covers len + 1 elements. The tail is moved back by one with an
        // overlapping copy, leaving the slot at index free to be written.
        unsafe {
            let base = self.buf.ptr.as_ptr();
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            base.add(index).write(MaybeUninit::new(value));
        }
        self.len += 1;
    }

    /// Removes the element at `index`, moving all following values forward to fill the gap.
    ///
    /// # Panics
    /// Panics if `index` isn't less than the length.
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        // SAFETY: index < len, so the value is initialized. It is read out before the tail is moved
        // over its slot.
        unsafe {
            let base = self.buf.ptr.as_ptr();
            let value = base.add(index).read().assume_init();
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes the element at `index`, replacing it with the last element.
    ///
    /// # Panics
    /// Panics if `index` isn't less than the length.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.check_index(index);

        let last = self.len - 1;
        self.swap(index, last);
        self.len = last;
        // SAFETY: The slot at last was initialized and is now past len, so it is never read again.
        unsafe { self.buf.ptr.add(last).read().assume_init() }
    }

    /// Replaces the element at `index` with `value`, returning the old value.
    ///
    /// # Panics
    /// Panics if `index` isn't less than the length.
    pub fn replace(&mut self, index: usize, value: T) -> T {
        self.check_index(index);
        std::mem::replace(&mut self[index], value)
    }

    /// Drops every element past `len`, last first. Does nothing if `len` isn't less than the
    /// current length.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.len -= 1;
            // SAFETY: The slot was initialized and is now past len, so it won't be dropped twice
            // even if this drop panics.
            unsafe { self.buf.ptr.add(self.len).as_mut().assume_init_drop() }
        }
    }

    /// Destroys every element in reverse order, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Ensures that the Vector has capacity for at least `extra` more elements. After invoking this
    /// method, the capacity will be at least len + extra.
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        let new_cap = self.len.checked_add(extra).expect("Capacity overflow!");

        if new_cap <= self.cap() { return; }

        self.realloc_with_cap(new_cap);
    }

    /// Appends a clone of every element of `values`.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.grow_to_fit(values.len());
        for value in values {
            // SAFETY: Enough capacity for every value has been reserved.
            unsafe { self.push_unchecked(value.clone()) }
        }
    }

    /// Replaces the contents of the Vector with the values of `iter`, keeping the capacity.
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend(iter);
    }

    pub const fn as_ptr(&self) -> *const T {
        self.buf.as_ptr().cast()
    }

    /// Moves the contents of the block into a new allocation of `new_cap` elements.
    fn realloc_with_cap(&mut self, new_cap: usize) {
        tracing::trace!(
            old_cap = self.cap(),
            new_cap,
            elem_size = size_of::<T>(),
            "reallocating vector"
        );
        self.buf.realloc(new_cap);
    }

    /// Grows the Vector so that `extra` more elements fit, following the growth factor rather than
    /// allocating the exact amount.
    fn grow_to_fit(&mut self, extra: usize) {
        let required = self.len.checked_add(extra).expect("Capacity overflow!");
        if required <= self.cap() { return; }

        let doubled = cmp::max(self.cap().saturating_mul(GROWTH_FACTOR), MIN_CAP);
        self.realloc_with_cap(cmp::max(required, doubled));
    }

    /// Grows the Vector by the growth factor, to no less than [`MIN_CAP`].
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    fn grow(&mut self) {
        let new_cap = cmp::max(
            self.cap().checked_mul(GROWTH_FACTOR).expect("Capacity overflow!"),
            MIN_CAP,
        );
        self.realloc_with_cap(new_cap);
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    fn check_index(&self, index: usize) {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.grow_to_fit(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Vector::new();
        vec.extend(iter);
        vec
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
        // The block itself holds only MaybeUninit values and is freed when buf is dropped.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len elements are initialized, the pointer is aligned and non-null, and
        // the borrow checker prevents mutation for the lifetime of the slice.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().cast(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The first len elements are initialized, the pointer is aligned and non-null, and
        // the mutable borrow of self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap(self.cap());
        vec.extend_from_slice(self);
        vec
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
