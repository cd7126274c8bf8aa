#![cfg(test)]

use super::*;
use crate::v2026::collections::contiguous::Vector;
use crate::v2026::util::testing::{BadHasherBuilder, ManualHash};

fn sorted<'a>(items: impl Iterator<Item = &'a u32>) -> Vector<u32> {
    let mut vec: Vector<u32> = items.copied().collect();
    vec.sort();
    vec
}

#[test]
fn test_hash_collisions() {
    let mut set = HashSet::with_hasher(BadHasherBuilder);
    assert!(set.insert(ManualHash::new(0, "zero")));
    assert!(set.insert(ManualHash::new(0, "one")));
    assert!(set.insert(ManualHash::new(2, "two")));
    assert!(set.insert(ManualHash::new(0, "three")));
    assert!(!set.insert(ManualHash::new(0, "one")), "Inserting a present item should do nothing.");

    assert!(set.remove(&ManualHash::new(0, "zero")));
    assert!(!set.remove(&ManualHash::new(0, "zero")));

    let mut values: Vector<_> = set.into_iter().map(|i| i.value()).collect();
    values.sort();
    assert_eq!(
        &*values,
        &["one", "three", "two"],
        "HashSet should handle hash collisions so that no elements are lost during removal."
    );
}

#[test]
fn test_set_operations() {
    let left: HashSet<u32> = (0..6).collect();
    let right: HashSet<u32> = (4..9).collect();

    assert_eq!(&*sorted(left.union(&right)), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(&*sorted(left.intersection(&right)), &[4, 5]);
    assert_eq!(&*sorted(left.difference(&right)), &[0, 1, 2, 3]);
    assert_eq!(&*sorted(left.symmetric_difference(&right)), &[0, 1, 2, 3, 6, 7, 8]);

    let small: HashSet<u32> = (1..3).collect();
    assert!(small.is_subset(&left));
    assert!(left.is_superset(&small));
    assert!(!left.is_subset(&right));
    assert!(small.is_disjoint(&right));
    assert!(!left.is_disjoint(&right));
}

#[test]
fn test_take_clear_and_equality() {
    let mut set: HashSet<String> = ["x", "y"].into_iter().map(String::from).collect();
    let copy = set.clone();
    assert_eq!(set, copy);

    assert_eq!(set.take("x"), Some(String::from("x")));
    assert_eq!(set.take("x"), None);
    assert_ne!(set, copy);

    set.clear();
    assert!(set.is_empty());
    assert!(!set.contains("y"));
    assert_eq!(copy.len(), 2);
}
