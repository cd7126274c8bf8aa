#![cfg(test)]

use proptest::prelude::*;

use super::links::{Links, SENTINEL};
use super::*;
use crate::v2026::collections::contiguous::Vector;
use crate::v2026::sum::Optional;

const PERMUTATION: [u32; 26] = [
    7, 17, 19, 24, 2, 20, 14, 1, 6, 23, 8, 12, 25, 21, 15, 22, 5, 0, 18, 4, 16, 3, 11, 9, 13, 10,
];

#[test]
fn test_insert_remove_lifecycle() {
    let mut tree = RBTree::new();
    for (count, key) in PERMUTATION.iter().enumerate() {
        assert!(tree.insert(*key));
        assert_eq!(tree.len(), count + 1);
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(!tree.insert(7), "Inserting a present key should do nothing.");
    assert_eq!(tree.len(), 26);
    assert!(tree.iter().copied().eq(0..26), "Iteration should visit keys in ascending order.");

    for (count, key) in PERMUTATION.iter().enumerate() {
        assert!(tree.remove(key));
        assert!(!tree.contains(key));
        assert_eq!(tree.len(), 25 - count);
        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(
            tree.inner.links[0],
            Links::SENTINEL,
            "The sentinel should be reset after removal."
        );
    }
    assert!(tree.is_empty());
    assert_eq!(tree.inner.root, SENTINEL);
    assert!(!tree.remove(&3));
}

#[test]
fn test_map_values_follow_moved_nodes() {
    let mut map = RBMap::new();
    for key in PERMUTATION {
        map.insert(key, key * 100);
    }
    // Removing early keys moves the last arena nodes into their slots.
    for key in [7, 17, 19, 24] {
        assert_eq!(map.remove(&key), Optional::Value(key * 100));
    }
    for key in PERMUTATION.iter().filter(|k| ![7, 17, 19, 24].contains(*k)) {
        assert_eq!(map.lookup(key), Optional::Value(&(key * 100)));
    }
    assert_eq!(map.check_invariants(), Ok(()));

    if let Optional::Value(value) = map.lookup_mut(&0) {
        *value = 1;
    }
    assert_eq!(map.first(), Optional::Value((&0, &1)));
    assert_eq!(map.last(), Optional::Value((&25, &2500)));
    assert_eq!(map.insert(0, 5), Some(1));
    assert_eq!(map.lookup_entry(&99), Optional::Empty);
}

#[test]
fn test_optimize_layout() {
    let mut tree: RBTree<u32> = PERMUTATION.into_iter().collect();
    tree.optimize_layout();
    assert_eq!(tree.check_invariants(), Ok(()));
    for (position, key) in tree.inner.entries.iter().enumerate() {
        assert_eq!(key.0 as usize, position, "Arena order should be key order.");
    }

    let links_before = tree.inner.links.clone();
    let root_before = tree.inner.root;
    tree.optimize_layout();
    assert_eq!(tree.inner.links, links_before, "A second run should change nothing.");
    assert_eq!(tree.inner.root, root_before);

    assert!(tree.remove(&12));
    assert!(tree.insert(12));
    assert!(tree.into_iter().eq(0..26), "Owned iteration should be in key order.");
}

#[test]
fn test_clear_and_reuse() {
    let mut map: RBMap<String, usize> = ["pear", "apple", "fig"]
        .into_iter()
        .enumerate()
        .map(|(i, s)| (s.to_owned(), i))
        .collect();
    assert_eq!(format!("{map:?}"), r#"{"apple": 1, "fig": 2, "pear": 0}"#);
    assert!(map.contains("fig"));

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.first(), Optional::Empty);
    map.insert("kiwi".to_owned(), 3);
    assert_eq!(map.lookup("kiwi"), Optional::Value(&3));
    assert_eq!(map.check_invariants(), Ok(()));
}

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(u8),
    Remove(u8),
}

proptest! {
    #[test]
    fn prop_invariants_hold(ops in proptest::collection::vec(
        prop_oneof![any::<u8>().prop_map(TreeOp::Insert), any::<u8>().prop_map(TreeOp::Remove)],
        0..200,
    )) {
        let mut tree = RBTree::new();
        let mut reference = std::collections::BTreeSet::new();
        for op in ops {
            match op {
                TreeOp::Insert(key) => {
                    prop_assert_eq!(tree.insert(key), reference.insert(key));
                },
                TreeOp::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), reference.remove(&key));
                },
            }
            prop_assert_eq!(tree.check_invariants(), Ok(()));
        }
        let keys: Vector<u8> = tree.iter().copied().collect();
        prop_assert!(keys.iter().eq(reference.iter()));
    }

    #[test]
    fn prop_optimize_layout_is_idempotent(keys in proptest::collection::vec(any::<i32>(), 0..100)) {
        let mut tree: RBTree<i32> = keys.into_iter().collect();
        tree.optimize_layout();
        let once = (tree.inner.links.clone(), tree.inner.root);
        tree.optimize_layout();
        prop_assert_eq!((tree.inner.links.clone(), tree.inner.root), once);
        prop_assert_eq!(tree.check_invariants(), Ok(()));
    }
}
