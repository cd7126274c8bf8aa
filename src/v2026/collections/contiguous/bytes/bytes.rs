use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut, Range};
use std::ptr;
use std::slice;

use super::BytesView;
use crate::v2026::error::{EmptyCollection, Error, IndexOutOfBounds, Unsupported};
use crate::v2026::ptr::UniqueArray;

/// The capacity of a freshly constructed [`Bytes`], and the starting point of its growth.
pub const INITIAL_CAP: usize = 16;

const GROWTH_FACTOR: usize = 2;

/// A growable buffer of bytes.
///
/// The capacity starts at [`INITIAL_CAP`] and doubles until it fits the requested length.
/// Shrinking never releases capacity. Two buffers are equal if their contents are, and are ordered
/// lexicographically.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the buffer.
/// - `i`: The offset in question.
/// - `m`: The number of bytes being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `extend_from_slice` | `O(m)`*, `O(n+m)` |
/// | `insert` | `O(n-i+m)` |
/// | `pop_front` | `O(n)` |
/// | `pop_back` | `O(1)` |
/// | `remove` | `O(n-i)` |
///
/// \* If the buffer doesn't have enough capacity, the contents are moved to a new block first.
pub struct Bytes {
    pub(crate) buf: UniqueArray<MaybeUninit<u8>>,
    pub(crate) len: usize,
}

impl Bytes {
    /// Creates an empty buffer with capacity [`INITIAL_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Bytes;
    /// let bytes = Bytes::new();
    /// assert_eq!(bytes.len(), 0);
    /// assert_eq!(bytes.cap(), 16);
    /// ```
    pub fn new() -> Bytes {
        Bytes::with_cap(INITIAL_CAP)
    }

    /// Creates an empty buffer with exactly `cap` bytes of capacity.
    ///
    /// # Panics
    /// Panics if `cap` exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Bytes {
        Bytes {
            buf: UniqueArray::new_uninit(cap),
            len: 0,
        }
    }

    /// Creates a buffer holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Bytes {
        let mut result = Bytes::with_cap(cmp::max(bytes.len(), INITIAL_CAP));
        result.extend_from_slice(bytes);
        result
    }

    /// Creates a buffer holding a copy of `len` bytes read from `ptr`. This is how buffers from
    /// other containers, or other epochs of this library, are brought in.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes, or may be dangling if `len` is 0.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Bytes {
        if len == 0 {
            return Bytes::new();
        }
        // SAFETY: The caller guarantees that ptr is valid for len bytes.
        Bytes::from_slice(unsafe { slice::from_raw_parts(ptr, len) })
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

    /// Returns a pointer to the first byte. Valid until the buffer is next modified.
    pub const fn as_ptr(&self) -> *const u8 {
        self.buf.as_ptr().cast()
    }

    /// Returns a borrowed view of the whole buffer.
    pub fn view(&self) -> BytesView<'_> {
        BytesView::new(self)
    }

    /// Appends a single byte.
    ///
    /// # Panics
    /// Panics if the capacity would exceed [`isize::MAX`].
    pub fn push(&mut self, byte: u8) {
        self.ensure_cap(self.len + 1);
        // SAFETY: The capacity has just been made sufficient for one more byte.
        unsafe { self.base_ptr().add(self.len).write(byte) }
        self.len += 1;
    }

    /// Appends a copy of `bytes`.
    ///
    /// # Panics
    /// Panics if the capacity would exceed [`isize::MAX`].
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let new_len = self.len.checked_add(bytes.len()).expect("Capacity overflow!");
        self.ensure_cap(new_len);
        // SAFETY: The capacity covers new_len, and bytes can't alias self because we hold a
        // mutable borrow of self.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.base_ptr().add(self.len), bytes.len());
        }
        self.len = new_len;
    }

    /// Replaces the contents with a copy of `bytes`, keeping the capacity.
    pub fn assign(&mut self, bytes: &[u8]) {
        self.len = 0;
        self.extend_from_slice(bytes);
    }

    /// Inserts a copy of `bytes` at `offset`, moving the following bytes back.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `offset` is greater than the length.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::collections::contiguous::Bytes;
    /// let mut bytes = Bytes::from_slice(b"held");
    /// bytes.insert(2, b"llo wor").unwrap();
    /// assert_eq!(&*bytes, b"hello world");
    /// assert!(bytes.insert(12, b"!").is_err());
    /// ```
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<(), IndexOutOfBounds> {
        self.check_offset(offset)?;

        let count = bytes.len();
        let new_len = self.len.checked_add(count).expect("Capacity overflow!");
        self.ensure_cap(new_len);

        let base = self.base_ptr();
        // SAFETY: Both ranges are within the capacity, which covers new_len. The tail is moved
        // with an overlapping copy, then bytes (which can't alias self) fills the gap.
        unsafe {
            ptr::copy(base.add(offset), base.add(offset + count), self.len - offset);
            ptr::copy_nonoverlapping(bytes.as_ptr(), base.add(offset), count);
        }
        self.len = new_len;
        Ok(())
    }

    /// Inserts `len` bytes read from `ptr` at `offset`.
    ///
    /// # Errors
    /// Returns [`Unsupported`] if the source overlaps this buffer's own allocation, and
    /// [`IndexOutOfBounds`] if `offset` is greater than the length.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes, or may be dangling if `len` is 0.
    pub unsafe fn insert_raw(
        &mut self,
        offset: usize,
        ptr: *const u8,
        len: usize,
    ) -> Result<(), Error> {
        let own = self.buf.as_ptr() as usize..self.buf.as_ptr() as usize + self.cap();
        let source = ptr as usize..(ptr as usize).wrapping_add(len);
        if len != 0 && source.start < own.end && own.start < source.end {
            return Err(Unsupported {
                reason: "insertion source overlaps the destination buffer",
            }.into());
        }

        let bytes = if len == 0 {
            &[]
        } else {
            // SAFETY: The caller guarantees that ptr is valid for len bytes, and we've just checked
            // that it doesn't alias our own allocation.
            unsafe { slice::from_raw_parts(ptr, len) }
        };
        Ok(self.insert(offset, bytes)?)
    }

    /// Removes the first `count` bytes, moving the rest forward.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `count` is greater than the length.
    pub fn pop_front(&mut self, count: usize) -> Result<(), IndexOutOfBounds> {
        self.remove(0..count)
    }

    /// Removes the last `count` bytes.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `count` is greater than the length.
    pub fn pop_back(&mut self, count: usize) -> Result<(), IndexOutOfBounds> {
        self.check_offset(count)?;
        self.len -= count;
        Ok(())
    }

    /// Removes the bytes in `range`, moving the following bytes forward.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the range ends past the length or is inverted.
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), IndexOutOfBounds> {
        self.check_offset(range.end)?;
        if range.start > range.end {
            return Err(IndexOutOfBounds {
                index: range.start,
                len: range.end,
            });
        }

        let base = self.base_ptr();
        // SAFETY: Both ranges are within the initialized length.
        unsafe {
            ptr::copy(base.add(range.end), base.add(range.start), self.len - range.end);
        }
        self.len -= range.end - range.start;
        Ok(())
    }

    /// Resizes the buffer to `new_len`, truncating or filling the new bytes with zeroes.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.len {
            self.ensure_cap(new_len);
            // SAFETY: The capacity covers new_len.
            unsafe {
                ptr::write_bytes(self.base_ptr().add(self.len), 0, new_len - self.len);
            }
        }
        self.len = new_len;
    }

    /// Removes all bytes, keeping the capacity.
    pub const fn clear(&mut self) {
        self.len = 0;
    }

    /// Ensures that at least `extra` more bytes fit without reallocating.
    ///
    /// # Panics
    /// Panics if the capacity would exceed [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        self.ensure_cap(self.len.checked_add(extra).expect("Capacity overflow!"));
    }

    /// Returns the byte at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is not less than the length.
    pub fn at(&self, index: usize) -> Result<u8, IndexOutOfBounds> {
        self.get(index).copied().ok_or(IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Returns the first byte.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the buffer is empty.
    pub fn front(&self) -> Result<u8, EmptyCollection> {
        self.first().copied().ok_or(EmptyCollection)
    }

    /// Returns the last byte.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the buffer is empty.
    pub fn back(&self) -> Result<u8, EmptyCollection> {
        self.last().copied().ok_or(EmptyCollection)
    }

    /// Grows the capacity by doubling until it is at least `required`.
    fn ensure_cap(&mut self, required: usize) {
        if required <= self.cap() { return; }

        let mut new_cap = cmp::max(self.cap(), INITIAL_CAP);
        while new_cap < required {
            new_cap = new_cap.checked_mul(GROWTH_FACTOR).expect("Capacity overflow!");
        }

        tracing::trace!(old_cap = self.cap(), new_cap, "growing byte buffer");
        self.buf.realloc(new_cap);
    }

    fn check_offset(&self, offset: usize) -> Result<(), IndexOutOfBounds> {
        if offset > self.len {
            Err(IndexOutOfBounds {
                index: offset,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }

    const fn base_ptr(&mut self) -> *mut u8 {
        self.buf.ptr.as_ptr().cast()
    }
}

impl Default for Bytes {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len bytes of the block are initialized, and the borrow checker prevents
        // mutation for the lifetime of the slice.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl DerefMut for Bytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The first len bytes of the block are initialized, and the mutable borrow of self
        // guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.base_ptr(), self.len) }
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl Borrow<[u8]> for Bytes {
    fn borrow(&self) -> &[u8] {
        self
    }
}

impl BorrowMut<[u8]> for Bytes {
    fn borrow_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl Clone for Bytes {
    fn clone(&self) -> Self {
        let mut result = Bytes::with_cap(self.cap());
        result.extend_from_slice(self);
        result
    }
}

impl PartialEq for Bytes {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl Eq for Bytes {}

impl PartialEq<[u8]> for Bytes {
    fn eq(&self, other: &[u8]) -> bool {
        **self == *other
    }
}

impl PartialOrd for Bytes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bytes {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl Hash for Bytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl From<&[u8]> for Bytes {
    fn from(value: &[u8]) -> Self {
        Bytes::from_slice(value)
    }
}

impl From<&str> for Bytes {
    fn from(value: &str) -> Self {
        Bytes::from_slice(value.as_bytes())
    }
}

impl From<BytesView<'_>> for Bytes {
    fn from(value: BytesView<'_>) -> Self {
        Bytes::from_slice(&value)
    }
}

impl Extend<u8> for Bytes {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for byte in iter {
            self.push(byte);
        }
    }
}

impl FromIterator<u8> for Bytes {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut result = Bytes::new();
        result.extend(iter);
        result
    }
}

impl<'a> IntoIterator for &'a Bytes {
    type Item = &'a u8;

    type IntoIter = slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Bytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bytes")
            .field("contents", &format_args!("b\"{}\"", self.escape_ascii()))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}
