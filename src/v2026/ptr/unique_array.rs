use std::alloc::{self, Layout};
use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::v2026::error::IndexOutOfBounds;

/// The minimum alignment of every heap block handed out by this module. Some platform allocators
/// misbehave for smaller aligned requests, so the alignment of a block is always the greater of
/// this and the alignment of its element type.
pub const MIN_ALIGN: usize = 8;

/// A fixed-size array on the heap, owning all of its elements. Similar to a
/// [`Box<[T]>`](Box<T>), but with the allocation alignment rule described at [`MIN_ALIGN`].
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the UniqueArray.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `size` | `O(1)` |
/// | `realloc` | `O(n)` |
pub struct UniqueArray<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) size: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> UniqueArray<T> {
    /// Creates an empty UniqueArray without allocating.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::ptr::UniqueArray;
    /// let arr: UniqueArray<u8> = UniqueArray::new();
    /// assert_eq!(arr.size(), 0);
    /// assert_eq!(&*arr, &[]);
    /// ```
    pub fn new() -> UniqueArray<T> {
        // SAFETY: There are no values, so they are all initialized.
        unsafe { Self::new_uninit(0).assume_init() }
    }

    /// Creates a new UniqueArray of [`MaybeUninit<T>`] with the provided `size`. All values are
    /// uninitialized.
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    pub fn new_uninit(size: usize) -> UniqueArray<MaybeUninit<T>> {
        let layout = UniqueArray::<MaybeUninit<T>>::make_layout(size);

        UniqueArray {
            ptr: UniqueArray::<MaybeUninit<T>>::make_ptr(layout),
            size,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the UniqueArray.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of bytes occupied by the elements of the UniqueArray.
    pub const fn size_bytes(&self) -> usize {
        self.size * size_of::<T>()
    }

    /// Returns a reference to the element at `index`, or an error if it is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::ptr::UniqueArray;
    /// let arr = UniqueArray::from_slice(&[4_u8, 5, 6]);
    /// assert_eq!(arr.at(2), Ok(&6));
    /// assert!(arr.at(3).is_err());
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds {
            index,
            len: self.size,
        })
    }

    /// Returns a mutable reference to the element at `index`, or an error if it is out of bounds.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.size;
        self.get_mut(index).ok_or(IndexOutOfBounds {
            index,
            len,
        })
    }

    /// Returns a raw pointer to the first element. The pointer is dangling for an empty array.
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr().cast_const()
    }

    /// Decomposes the UniqueArray into its pointer and size without running any destructors.
    ///
    /// The parts can be used to reconstruct the UniqueArray with [`UniqueArray::from_parts`].
    pub const fn into_parts(self) -> (NonNull<T>, usize) {
        let ret = (self.ptr, self.size);
        mem::forget(self);
        ret
    }

    /// Creates a UniqueArray from its raw components.
    ///
    /// # Safety
    /// - `ptr` needs to have been allocated by a UniqueArray with the same element type and size,
    ///   usually obtained from [`UniqueArray::into_parts`].
    /// - `ptr` needs to refer to `size` properly initialized values of `T`.
    pub const unsafe fn from_parts(ptr: NonNull<T>, size: usize) -> UniqueArray<T> {
        UniqueArray {
            ptr,
            size,
            _phantom: PhantomData,
        }
    }

    /// Interprets self as a `UniqueArray<MaybeUninit<T>>`, the counterpart of
    /// [`UniqueArray::assume_init`]. The elements are not dropped.
    pub fn forget_init(self) -> UniqueArray<MaybeUninit<T>> {
        let (ptr, size) = self.into_parts();
        // SAFETY: MaybeUninit<T> has the same size and alignment as T, so the allocation has the
        // same layout, and any T is a valid MaybeUninit<T>.
        unsafe { UniqueArray::from_parts(ptr.cast(), size) }
    }

    /// Creates a [`Layout`] for `size` elements of type `T`, aligned to at least [`MIN_ALIGN`].
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    pub(crate) fn make_layout(size: usize) -> Layout {
        let bytes = size_of::<T>().checked_mul(size).expect("Capacity overflow!");
        Layout::from_size_align(bytes, cmp::max(align_of::<T>(), MIN_ALIGN))
            .expect("Capacity overflow!")
    }

    /// Allocates a block for the provided `layout`, returning a dangling pointer for a zero-sized
    /// layout. Allocation failure is reported through [`alloc::handle_alloc_error`].
    pub(crate) fn make_ptr(layout: Layout) -> NonNull<T> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }
}

impl<T: Default> UniqueArray<T> {
    /// Creates a new UniqueArray holding `count` default values of `T`.
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    pub fn repeat_default(count: usize) -> UniqueArray<T> {
        let mut arr = Self::new_uninit(count);

        for slot in arr.iter_mut() {
            slot.write(T::default());
        }

        // SAFETY: All values are initialized with the default value for T.
        unsafe { arr.assume_init() }
    }
}

impl<T: Clone> UniqueArray<T> {
    /// Creates a new UniqueArray holding a clone of every element in `values`.
    ///
    /// # Panics
    /// Panics if the size of the allocation in bytes would exceed [`isize::MAX`].
    pub fn from_slice(values: &[T]) -> UniqueArray<T> {
        let mut arr = Self::new_uninit(values.len());

        for (slot, value) in arr.iter_mut().zip(values) {
            slot.write(value.clone());
        }

        // SAFETY: Every slot has been written with a clone of the matching value.
        unsafe { arr.assume_init() }
    }
}

impl<T> UniqueArray<MaybeUninit<T>> {
    /// Assume that all values of a `UniqueArray<MaybeUninit<T>>` are initialized.
    ///
    /// # Safety
    /// It is up to the caller to guarantee that every element is properly initialized.
    pub unsafe fn assume_init(self) -> UniqueArray<T> {
        let (ptr, size) = self.into_parts();
        // SAFETY: The layouts match and the caller guarantees initialization.
        unsafe { UniqueArray::from_parts(ptr.cast(), size) }
    }

    /// Reallocates the UniqueArray to hold `new_size` elements. A new block is allocated, the first
    /// `min(size, new_size)` elements are moved into it and only then is the old block freed.
    /// Slots past the old size are uninitialized.
    ///
    /// Values in slots beyond `new_size` are discarded without being dropped, it is up to the
    /// caller to drop any initialized ones first.
    ///
    /// # Panics
    /// Panics if the size of the new allocation in bytes would exceed [`isize::MAX`].
    pub fn realloc(&mut self, new_size: usize) {
        if new_size == self.size { return; }

        let mut new_arr = UniqueArray::<T>::new_uninit(new_size);
        let moved = cmp::min(self.size, new_size);

        // SAFETY: Both blocks are valid for at least `moved` elements and are distinct
        // allocations. Moves are bitwise, and the old copies are never read again because the old
        // block is dropped as MaybeUninit.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_arr.ptr.as_ptr(), moved);
        }

        mem::swap(self, &mut new_arr);
        // new_arr now holds the old block and is freed here.
    }
}

impl<T> Default for UniqueArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for UniqueArray<T> {
    fn drop(&mut self) {
        // SAFETY: All size elements are initialized and are never accessed again.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.size));
        }

        let layout = Self::make_layout(self.size);
        if layout.size() != 0 {
            // SAFETY: ptr was allocated in the global allocator with this exact layout. Zero-sized
            // layouts are never allocated.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Deref for UniqueArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The block is valid, aligned and initialized for size elements, and the borrow
        // checker prevents mutation for the lifetime of the slice.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl<T> DerefMut for UniqueArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The block is valid, aligned and initialized for size elements, and the mutable
        // borrow of self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl<T> AsRef<[T]> for UniqueArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for UniqueArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for UniqueArray<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for UniqueArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

// SAFETY: A UniqueArray owns its block exclusively, so it can be sent whenever T can.
unsafe impl<T: Send> Send for UniqueArray<T> {}
// SAFETY: Shared access only hands out shared references to the elements.
unsafe impl<T: Sync> Sync for UniqueArray<T> {}

impl<T: Clone> Clone for UniqueArray<T> {
    fn clone(&self) -> Self {
        UniqueArray::from_slice(self)
    }
}

impl<T: PartialEq> PartialEq for UniqueArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for UniqueArray<T> {}

impl<T: Debug> Debug for UniqueArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueArray")
            .field("contents", &&**self)
            .field("size", &self.size)
            .finish()
    }
}
