use super::{INSERTION_SORT_LIMIT, heap_sort_by, insertion_sort_by};

/// Statistics gathered while sorting with [`introsort_stats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntrosortStats {
    /// The deepest level of recursion reached, the top-level call being depth 0.
    pub max_depth: usize,
    /// How many subslices were finished by heap sort after the depth limit ran out.
    pub heap_sort_fallbacks: usize,
}

/// The recursion depth at which introsort gives up on partitioning a slice of `len` elements,
/// `floor(log2(len)) + 1`.
pub const fn depth_limit(len: usize) -> usize {
    match len.checked_ilog2() {
        Some(log) => log as usize + 1,
        None => 1,
    }
}

/// Sorts `slice` in place by introspective sort. Not stable.
///
/// Quicksort with a median-of-three pivot does the bulk of the work. A subslice that is reached
/// at the [`depth_limit`] is heap sorted instead, which bounds the worst case at `O(n log n)`, and
/// subslices of at most [`INSERTION_SORT_LIMIT`] elements are insertion sorted.
pub fn introsort<T: Ord>(slice: &mut [T]) {
    introsort_by(slice, T::lt);
}

pub fn introsort_by<T, F>(slice: &mut [T], is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    introsort_stats_by(slice, is_less);
}

/// As [`introsort`], returning how deep the recursion went.
pub fn introsort_stats<T: Ord>(slice: &mut [T]) -> IntrosortStats {
    introsort_stats_by(slice, T::lt)
}

pub fn introsort_stats_by<T, F>(slice: &mut [T], mut is_less: F) -> IntrosortStats
where
    F: FnMut(&T, &T) -> bool,
{
    let mut stats = IntrosortStats::default();
    let limit = depth_limit(slice.len());
    sort_level(slice, 0, limit, &mut is_less, &mut stats);
    stats
}

fn sort_level<T, F>(
    slice: &mut [T],
    depth: usize,
    limit: usize,
    is_less: &mut F,
    stats: &mut IntrosortStats,
) where
    F: FnMut(&T, &T) -> bool,
{
    stats.max_depth = stats.max_depth.max(depth);
    let len = slice.len();
    if len <= INSERTION_SORT_LIMIT {
        insertion_sort_by(slice, is_less);
        return;
    }
    if depth >= limit {
        tracing::trace!(len, depth, "introsort depth limit reached, falling back to heap sort");
        stats.heap_sort_fallbacks += 1;
        heap_sort_by(slice, is_less);
        return;
    }

    let pivot = partition_median_of_three(slice, is_less);
    let (left, right) = slice.split_at_mut(pivot);
    sort_level(left, depth + 1, limit, is_less, stats);
    sort_level(&mut right[1..], depth + 1, limit, is_less, stats);
}

/// Orders the first, middle and last elements among themselves, then partitions around the
/// middle one. Returns the pivot's final index: everything before it is less than it and
/// nothing after it is.
fn partition_median_of_three<T, F>(slice: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let last = slice.len() - 1;
    let middle = last / 2;
    if is_less(&slice[middle], &slice[0]) {
        slice.swap(middle, 0);
    }
    if is_less(&slice[last], &slice[middle]) {
        slice.swap(last, middle);
        if is_less(&slice[middle], &slice[0]) {
            slice.swap(middle, 0);
        }
    }

    // The pivot waits at the end while the rest is partitioned.
    slice.swap(middle, last);
    let mut store = 0;
    for i in 0..last {
        if is_less(&slice[i], &slice[last]) {
            slice.swap(i, store);
            store += 1;
        }
    }
    slice.swap(store, last);
    store
}
