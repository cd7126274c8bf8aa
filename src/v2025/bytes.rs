use std::alloc::{self, Layout};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{AddAssign, Index};
use std::ptr::{self, NonNull};
use std::slice;

use super::error::{EmptyBuffer, OutOfRange};

pub const INITIAL_CAPACITY: usize = 16;

/// A growable byte buffer.
///
/// Accessors panic when used out of range. The allocation is owned directly rather than through a
/// shared array type, so nothing here depends on another epoch.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the buffer.
/// - `m`: The number of bytes being added or removed.
///
/// | Method | Complexity |
/// |-|-|
/// | `append` | `O(1)`* |
/// | `append_slice` | `O(m)`* |
/// | `pop_back` | `O(1)` |
/// | `pop_front` | `O(n-m)` |
///
/// \* Amortized, the capacity doubles when exhausted.
pub struct Bytes {
    ptr: NonNull<u8>,
    capacity: usize,
    size: usize,
}

// SAFETY: Bytes owns its allocation exclusively, and all shared access goes through &self.
unsafe impl Send for Bytes {}
// SAFETY: As above, there is no interior mutability.
unsafe impl Sync for Bytes {}

impl Bytes {
    pub fn new() -> Bytes {
        Bytes::with_capacity(INITIAL_CAPACITY)
    }

    /// # Panics
    /// Panics if `capacity` exceeds [`isize::MAX`].
    pub fn with_capacity(capacity: usize) -> Bytes {
        Bytes {
            ptr: allocate(capacity),
            capacity,
            size: 0,
        }
    }

    /// Creates a buffer holding `size` zero bytes.
    pub fn zeroed(size: usize) -> Bytes {
        let mut result = Bytes::with_capacity(cmp::max(size, INITIAL_CAPACITY));
        result.extend(size);
        result
    }

    pub fn from_slice(bytes: &[u8]) -> Bytes {
        let mut result = Bytes::with_capacity(cmp::max(bytes.len(), INITIAL_CAPACITY));
        result.append_slice(bytes);
        result
    }

    /// Copies `size` bytes starting at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `size` bytes, or may be dangling if `size` is 0.
    pub unsafe fn from_raw(ptr: *const u8, size: usize) -> Bytes {
        if size == 0 {
            return Bytes::new();
        }
        // SAFETY: The caller guarantees that ptr is valid for size bytes.
        Bytes::from_slice(unsafe { slice::from_raw_parts(ptr, size) })
    }

    /// Returns a pointer to the first byte, valid until the buffer is next modified.
    pub const fn data(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: The first size bytes are always initialized, and ptr is dangling but aligned
        // when nothing is allocated.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }

    pub fn append(&mut self, byte: u8) {
        self.grow_to(self.size + 1);
        // SAFETY: The capacity covers at least size + 1 bytes.
        unsafe { self.ptr.add(self.size).write(byte) }
        self.size += 1;
    }

    pub fn append_slice(&mut self, bytes: &[u8]) {
        self.grow_to(self.size + bytes.len());
        // SAFETY: The capacity covers the new size. bytes can't point into this buffer while self
        // is mutably borrowed.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.ptr.add(self.size).as_ptr(), bytes.len());
        }
        self.size += bytes.len();
    }

    /// Grows the buffer by `count` zero bytes.
    pub fn extend(&mut self, count: usize) {
        self.grow_to(self.size + count);
        // SAFETY: The capacity covers the new size.
        unsafe { self.ptr.add(self.size).write_bytes(0, count) }
        self.size += count;
    }

    /// Replaces the contents with a copy of `bytes`.
    pub fn assign(&mut self, bytes: &[u8]) {
        self.size = 0;
        self.append_slice(bytes);
    }

    /// Removes the last `count` bytes.
    ///
    /// # Panics
    /// Panics if `count` is larger than the size.
    pub fn pop_back(&mut self, count: usize) {
        self.check_count(count);
        self.size -= count;
    }

    /// Removes the first `count` bytes, moving the rest forward.
    ///
    /// # Panics
    /// Panics if `count` is larger than the size.
    pub fn pop_front(&mut self, count: usize) {
        self.check_count(count);
        // SAFETY: Both ranges lie within the initialized part of the buffer. ptr::copy allows the
        // overlap.
        unsafe { ptr::copy(self.ptr.add(count).as_ptr(), self.ptr.as_ptr(), self.size - count) }
        self.size -= count;
    }

    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// # Panics
    /// Panics if the buffer is empty.
    pub fn front(&self) -> u8 {
        match self.as_slice().first() {
            Some(byte) => *byte,
            None => panic!("{}", EmptyBuffer),
        }
    }

    /// # Panics
    /// Panics if the buffer is empty.
    pub fn back(&self) -> u8 {
        match self.as_slice().last() {
            Some(byte) => *byte,
            None => panic!("{}", EmptyBuffer),
        }
    }

    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> u8 {
        self[index]
    }

    fn check_count(&self, count: usize) {
        if count > self.size {
            panic!("{}", OutOfRange {
                index: count,
                size: self.size,
            });
        }
    }

    fn grow_to(&mut self, needed: usize) {
        if needed <= self.capacity {
            return;
        }
        let mut new_capacity = cmp::max(self.capacity, INITIAL_CAPACITY);
        while new_capacity < needed {
            new_capacity = new_capacity.checked_mul(2).expect("Capacity overflow!");
        }
        tracing::trace!(old = self.capacity, new = new_capacity, "reallocating 2025 byte buffer");

        let new_layout = layout(new_capacity);
        let raw_ptr = if self.capacity == 0 {
            // SAFETY: new_capacity is at least INITIAL_CAPACITY, so the layout isn't zero-sized.
            unsafe { alloc::alloc(new_layout) }
        } else {
            // SAFETY: ptr was allocated with the layout for the current capacity, and the new
            // size is non-zero and checked by layout().
            unsafe { alloc::realloc(self.ptr.as_ptr(), layout(self.capacity), new_capacity) }
        };
        self.ptr = NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout));
        self.capacity = new_capacity;
    }
}

fn layout(capacity: usize) -> Layout {
    Layout::array::<u8>(capacity).expect("Capacity overflow!")
}

fn allocate(capacity: usize) -> NonNull<u8> {
    let layout = layout(capacity);
    if layout.size() == 0 {
        return NonNull::dangling();
    }
    // SAFETY: Zero-sized layouts have been guarded against.
    let raw_ptr = unsafe { alloc::alloc(layout) };
    NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
}

impl Drop for Bytes {
    fn drop(&mut self) {
        if self.capacity != 0 {
            // SAFETY: ptr was allocated in the global allocator with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), layout(self.capacity)) }
        }
    }
}

impl Default for Bytes {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Bytes {
    fn clone(&self) -> Self {
        Bytes::from_slice(self.as_slice())
    }
}

impl Index<usize> for Bytes {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        match self.as_slice().get(index) {
            Some(byte) => byte,
            None => panic!("{}", OutOfRange {
                index,
                size: self.size,
            }),
        }
    }
}

impl AddAssign<&Bytes> for Bytes {
    fn add_assign(&mut self, other: &Bytes) {
        self.append_slice(other.as_slice());
    }
}

impl PartialEq for Bytes {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Bytes {}

impl PartialOrd for Bytes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bytes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl Hash for Bytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl Debug for Bytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
