#![cfg(test)]

use proptest::prelude::*;

use super::*;
use crate::v2026::collections::contiguous::Vector;

/// Sorted by `key` only, so stability can be observed through `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tagged {
    key: u32,
    tag: u32,
}

fn by_key(a: &Tagged, b: &Tagged) -> bool {
    a.key < b.key
}

const SORTS: [fn(&mut [i32]); 5] =
    [insertion_sort, heap_sort, merge_sort, introsort, sort_relocatable];

const SHUFFLED: [i32; 20] = [6, 2, 1, 9, 3, 16, 12, 11, 19, 13, 10, 14, 15, 17, 18, 0, 4, 5, 7, 8];

#[test]
fn test_search() {
    let values = [4, 8, 1, 8, 3];
    assert_eq!(find(&values, &8), Some(1));
    assert_eq!(find(&values, &7), None);
    assert_eq!(find_if(&values, |v| *v < 4), Some(2));
    assert_eq!(find_if_not(&values, |v| *v > 0), None);
    assert_eq!(min_element(&values), Some(2));
    assert_eq!(min_element::<i32>(&[]), None);
    assert_eq!(min_element(&[2, 1, 1]), Some(1), "The first minimum should be chosen.");

    let (mut a, mut b) = (String::from("a"), String::from("b"));
    swap(&mut a, &mut b);
    assert_eq!((a.as_str(), b.as_str()), ("b", "a"));
}

#[test]
fn test_partition() {
    let mut values = [5, 0, 3, 1, 4, 1];
    let split = partition(&mut values, |v| *v < 2);
    assert_eq!(split, 3);
    assert!(values[..split].iter().all(|v| *v < 2));
    assert!(values[split..].iter().all(|v| *v >= 2));

    let mut none: [u8; 3] = [7, 8, 9];
    assert_eq!(partition(&mut none, |v| *v > 100), 0);
    assert_eq!(partition(&mut none, |_| true), 3);
    assert_eq!(partition::<u8, _>(&mut [], |_| true), 0);
}

#[test]
fn test_lower_bound() {
    let values = [10, 20, 20, 20, 30];
    assert_eq!(lower_bound(&values, &5), 0);
    assert_eq!(lower_bound(&values, &20), 1);
    assert_eq!(lower_bound(&values, &25), 4);
    assert_eq!(lower_bound(&values, &31), 5);
    assert_eq!(lower_bound::<i32>(&[], &1), 0);

    let words = ["apple", "fig", "pear"];
    assert_eq!(lower_bound_by(&words, "grape", |word, value: &str| *word < value), 2);
}

#[test]
fn test_small_sorts() {
    for sort in SORTS {
        let mut empty: [i32; 0] = [];
        sort(&mut empty);
        let mut one = [3];
        sort(&mut one);
        assert_eq!(one, [3]);
        let mut two = [2, 1];
        sort(&mut two);
        assert_eq!(two, [1, 2]);
        let mut values = SHUFFLED;
        sort(&mut values);
        assert!(values.iter().copied().eq(0..20), "Every sort should order the table.");
    }
}

#[test]
fn test_insertion_sort_stable() {
    let mut items = [
        Tagged { key: 3, tag: 0 },
        Tagged { key: 1, tag: 0 },
        Tagged { key: 3, tag: 1 },
        Tagged { key: 1, tag: 1 },
        Tagged { key: 2, tag: 0 },
        Tagged { key: 1, tag: 2 },
    ];
    insertion_sort_by(&mut items, by_key);
    let tags: Vector<(u32, u32)> = items.iter().map(|item| (item.key, item.tag)).collect();
    assert_eq!(&tags[..], &[(1, 0), (1, 1), (1, 2), (2, 0), (3, 0), (3, 1)]);
}

#[test]
fn test_merge_sort_stable() {
    let mut items: Vector<Tagged> = Vector::new();
    items.push(Tagged { key: 100_000, tag: 0 });
    for i in 0..100 {
        items.push(Tagged { key: 100 - i, tag: 1 });
    }
    for i in 0..100 {
        items.push(Tagged { key: 100 - i, tag: 0 });
    }
    items.push(Tagged { key: 0, tag: 100_000 });

    merge_sort_by(&mut items, by_key);
    assert_eq!(items.len(), 202);
    assert_eq!(items[0], Tagged { key: 0, tag: 100_000 });
    assert_eq!(items[201], Tagged { key: 100_000, tag: 0 });
    for pair in items[1..201].chunks(2) {
        assert_eq!(pair[0].key, pair[1].key);
        assert!(pair[0].tag > pair[1].tag, "Equal keys should keep their input order.");
    }
}

#[test]
fn test_merge_sort_owned_values() {
    let mut words: Vector<String> = (0..50).rev().map(|i| format!("{i:02}")).collect();
    merge_sort(&mut words);
    for (i, word) in words.iter().enumerate() {
        assert_eq!(*word, format!("{i:02}"));
    }
}

#[test]
fn test_introsort_descending() {
    let mut values: Vector<u32> = (0..10_000).rev().collect();
    let stats = introsort_stats(&mut values);
    assert!(values.iter().copied().eq(0..10_000));
    assert!(stats.max_depth <= depth_limit(10_000));
    assert_eq!(depth_limit(10_000), 14);
}

#[test]
fn test_introsort_falls_back_to_heap_sort() {
    // Every element equal makes each partition maximally lopsided.
    let mut values: Vector<u8> = std::iter::repeat_n(7, 1000).collect();
    values.push(1);
    let stats = introsort_stats(&mut values);
    assert!(stats.heap_sort_fallbacks > 0);
    assert!(stats.max_depth <= depth_limit(1001));
    assert_eq!(values[0], 1);
    assert!(values[1..].iter().all(|v| *v == 7));
}

#[test]
fn test_depth_limit() {
    assert_eq!(depth_limit(0), 1);
    assert_eq!(depth_limit(1), 1);
    assert_eq!(depth_limit(16), 5);
    assert_eq!(depth_limit(17), 5);
    assert_eq!(depth_limit(32), 6);
}

fn is_sorted_permutation(sorted: &[i32], original: &[i32]) -> bool {
    let mut reference = original.to_vec();
    reference.sort();
    sorted == &reference[..]
}

proptest! {
    #[test]
    fn prop_sorts_are_sorted_permutations(
        values in proptest::collection::vec(any::<i32>(), 0..300)
    ) {
        for sort in SORTS {
            let mut output = values.clone();
            sort(&mut output);
            prop_assert!(is_sorted_permutation(&output, &values));
        }
    }

    #[test]
    fn prop_stable_sorts_keep_ties(keys in proptest::collection::vec(0..8u32, 0..200)) {
        let items: Vec<Tagged> = keys
            .iter()
            .enumerate()
            .map(|(tag, key)| Tagged { key: *key, tag: tag as u32 })
            .collect();
        let mut reference = items.clone();
        reference.sort_by_key(|item| item.key);

        let mut by_insertion = items.clone();
        insertion_sort_by(&mut by_insertion, by_key);
        prop_assert_eq!(&by_insertion, &reference);
        let mut by_merge = items;
        merge_sort_by(&mut by_merge, by_key);
        prop_assert_eq!(&by_merge, &reference);
    }

    #[test]
    fn prop_lower_bound_is_least_index(
        mut values in proptest::collection::vec(0..50i32, 0..100),
        probe in -5..55i32,
    ) {
        values.sort();
        let index = lower_bound(&values, &probe);
        prop_assert!(values[..index].iter().all(|v| *v < probe));
        prop_assert!(values[index..].iter().all(|v| *v >= probe));
    }

    #[test]
    fn prop_partition_splits(
        mut values in proptest::collection::vec(any::<i16>(), 0..100),
        pivot in any::<i16>(),
    ) {
        let mut expected = values.clone();
        let split = partition(&mut values, |v| *v < pivot);
        prop_assert!(values[..split].iter().all(|v| *v < pivot));
        prop_assert!(values[split..].iter().all(|v| *v >= pivot));
        values.sort();
        expected.sort();
        prop_assert_eq!(values, expected);
    }
}
