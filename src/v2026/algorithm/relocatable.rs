use std::ffi::{c_int, c_void};
use std::mem;

/// Sorts `slice` with the C library's `qsort`, which moves elements by copying their bytes. Not
/// stable.
///
/// Every Rust type may be moved bitwise, so any `T: Ord` is accepted.
///
/// # Panics
/// A panic inside `T::cmp` can't unwind through `qsort` and aborts the process instead.
pub fn sort_relocatable<T: Ord>(slice: &mut [T]) {
    if slice.len() < 2 || mem::size_of::<T>() == 0 {
        return;
    }
    // SAFETY: The base pointer, element count and element size describe exactly `slice`, and
    // `compare` matches the element type.
    unsafe {
        libc::qsort(
            slice.as_mut_ptr().cast::<c_void>(),
            slice.len(),
            mem::size_of::<T>(),
            Some(compare::<T>),
        );
    }
}

/// # Safety
/// Both pointers must point to valid values of type `T`.
unsafe extern "C" fn compare<T: Ord>(a: *const c_void, b: *const c_void) -> c_int {
    // SAFETY: qsort only hands out pointers to elements of the slice being sorted.
    let (a, b) = unsafe { (&*a.cast::<T>(), &*b.cast::<T>()) };
    a.cmp(b) as c_int
}
