use std::mem::MaybeUninit;
use std::ptr;

use super::{INSERTION_SORT_LIMIT, insertion_sort_by};
use crate::v2026::ptr::UniqueArray;

/// Sorts `slice` by merging, using an auxiliary buffer as long as the slice. Stable.
///
/// Blocks of [`INSERTION_SORT_LIMIT`] elements are insertion sorted first. Each pass then merges
/// neighbouring sorted runs into the buffer and moves the result back, doubling the run length
/// until a single run remains.
pub fn merge_sort<T: Ord>(slice: &mut [T]) {
    merge_sort_by(slice, T::lt);
}

pub fn merge_sort_by<T, F>(slice: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = slice.len();
    if len <= INSERTION_SORT_LIMIT {
        insertion_sort_by(slice, is_less);
        return;
    }
    for block in slice.chunks_mut(INSERTION_SORT_LIMIT) {
        insertion_sort_by(block, &mut is_less);
    }

    let mut buffer: UniqueArray<MaybeUninit<T>> = UniqueArray::new_uninit(len);
    let mut run = INSERTION_SORT_LIMIT;
    while run < len {
        let mut start = 0;
        while start < len {
            let middle = (start + run).min(len);
            let end = (start + 2 * run).min(len);
            merge_into(
                &slice[start..middle],
                &slice[middle..end],
                &mut buffer[start..end],
                &mut is_less,
            );
            start = end;
        }
        // SAFETY: The pass wrote every position of the buffer with a bitwise copy of one element
        // of the slice. Copying back overwrites the originals without dropping them, which
        // leaves each value with a single owner again.
        unsafe {
            ptr::copy_nonoverlapping(buffer.as_ptr().cast::<T>(), slice.as_mut_ptr(), len);
        }
        run *= 2;
    }
}

/// Merges two sorted runs into `out`, which is exactly as long as both together. If `is_less`
/// panics the runs are left untouched, since `out` never drops what it holds.
fn merge_into<T, F>(left: &[T], right: &[T], out: &mut [MaybeUninit<T>], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut l, mut r) = (0, 0);
    for slot in out.iter_mut() {
        // Ties go to the left run.
        let source = if l == left.len() || (r < right.len() && is_less(&right[r], &left[l])) {
            r += 1;
            &right[r - 1]
        } else {
            l += 1;
            &left[l - 1]
        };
        // SAFETY: `source` is a valid element. The copy lands in uninitialized storage and is only
        // ever moved back over its original.
        slot.write(unsafe { ptr::read(source) });
    }
}
