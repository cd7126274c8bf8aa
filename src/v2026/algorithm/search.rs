use std::mem;

/// Exchanges two values. The borrow checker already rules out `a` and `b` being the same place.
pub const fn swap<T>(a: &mut T, b: &mut T) {
    mem::swap(a, b);
}

/// Returns the index of the first smallest element, or [`None`] if `slice` is empty.
pub fn min_element<T: Ord>(slice: &[T]) -> Option<usize> {
    min_element_by(slice, T::lt)
}

pub fn min_element_by<T, F>(slice: &[T], mut is_less: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    if slice.is_empty() {
        return None;
    }
    let mut min = 0;
    for i in 1..slice.len() {
        if is_less(&slice[i], &slice[min]) {
            min = i;
        }
    }
    Some(min)
}

/// Returns the index of the first element equal to `value`.
pub fn find<T: PartialEq>(slice: &[T], value: &T) -> Option<usize> {
    find_if(slice, |item| item == value)
}

/// Returns the index of the first element satisfying `pred`.
pub fn find_if<T, P: FnMut(&T) -> bool>(slice: &[T], mut pred: P) -> Option<usize> {
    slice.iter().position(|item| pred(item))
}

/// Returns the index of the first element not satisfying `pred`.
pub fn find_if_not<T, P: FnMut(&T) -> bool>(slice: &[T], mut pred: P) -> Option<usize> {
    slice.iter().position(|item| !pred(item))
}

/// Reorders `slice` so that every element satisfying `pred` precedes every element that doesn't,
/// and returns the number of elements satisfying it. The relative order within either group is
/// not preserved.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::algorithm::partition;
/// let mut values = [0, 5, 1, 4, 2, 3];
/// let split = partition(&mut values, |v| *v < 2);
/// assert_eq!(split, 2);
/// assert!(values[..split].iter().all(|v| *v < 2));
/// assert!(values[split..].iter().all(|v| *v >= 2));
/// ```
pub fn partition<T, P: FnMut(&T) -> bool>(slice: &mut [T], mut pred: P) -> usize {
    let Some(mut first) = find_if_not(slice, &mut pred) else {
        return slice.len();
    };
    for i in (first + 1)..slice.len() {
        if pred(&slice[i]) {
            slice.swap(i, first);
            first += 1;
        }
    }
    first
}

/// Returns the first index whose element is not less than `value`, or `slice.len()` if there is
/// none. `slice` must be sorted.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::algorithm::lower_bound;
/// let values = [1, 2, 2, 4];
/// assert_eq!(lower_bound(&values, &2), 1);
/// assert_eq!(lower_bound(&values, &3), 3);
/// assert_eq!(lower_bound(&values, &5), 4);
/// ```
pub fn lower_bound<T: Ord>(slice: &[T], value: &T) -> usize {
    lower_bound_by(slice, value, T::lt)
}

/// As [`lower_bound`], with `is_less(element, value)` deciding whether an element sorts before
/// `value`. The value may be of a different type, such as a borrowed form of the element.
pub fn lower_bound_by<T, U, F>(slice: &[T], value: &U, mut is_less: F) -> usize
where
    U: ?Sized,
    F: FnMut(&T, &U) -> bool,
{
    let mut first = 0;
    let mut count = slice.len();
    while count > 0 {
        let step = count / 2;
        let probe = first + step;
        if is_less(&slice[probe], value) {
            first = probe + 1;
            count -= step + 1;
        } else {
            count = step;
        }
    }
    first
}
