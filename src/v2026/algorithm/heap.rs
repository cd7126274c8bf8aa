/// Sorts `slice` in place with a binary max-heap. Not stable.
pub fn heap_sort<T: Ord>(slice: &mut [T]) {
    heap_sort_by(slice, T::lt);
}

pub fn heap_sort_by<T, F>(slice: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = slice.len();
    for node in (0..len / 2).rev() {
        sift_down(slice, node, len, &mut is_less);
    }
    for end in (1..len).rev() {
        slice.swap(0, end);
        sift_down(slice, 0, end, &mut is_less);
    }
}

/// Moves the element at `node` down until neither child within `slice[..end]` is greater.
fn sift_down<T, F>(slice: &mut [T], mut node: usize, end: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let left = 2 * node + 1;
        if left >= end {
            return;
        }
        let right = left + 1;
        let larger = if right < end && is_less(&slice[left], &slice[right]) {
            right
        } else {
            left
        };
        if !is_less(&slice[node], &slice[larger]) {
            return;
        }
        slice.swap(node, larger);
        node = larger;
    }
}
