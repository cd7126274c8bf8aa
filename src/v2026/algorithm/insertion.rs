use super::min_element_by;

/// Sorts `slice` in place by insertion. Stable, and quick for short or nearly sorted input.
///
/// The first minimum is rotated to the front before the main loop, where it stops every element
/// from walking past the start of the slice.
pub fn insertion_sort<T: Ord>(slice: &mut [T]) {
    insertion_sort_by(slice, T::lt);
}

pub fn insertion_sort_by<T, F>(slice: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    match slice.len() {
        0 | 1 => {},
        2 => {
            if is_less(&slice[1], &slice[0]) {
                slice.swap(0, 1);
            }
        },
        len => {
            if let Some(min) = min_element_by(slice, &mut is_less) {
                slice[..=min].rotate_right(1);
            }
            for i in 2..len {
                let mut current = i;
                while is_less(&slice[current], &slice[current - 1]) {
                    slice.swap(current - 1, current);
                    current -= 1;
                }
            }
        },
    }
}
