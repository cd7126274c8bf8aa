#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::btree_map::NONE;
use super::*;
use crate::v2026::collections::contiguous::Vector;
use crate::v2026::sum::Optional;
use crate::v2026::util::testing::CountedDrop;

#[test]
fn test_root_split() {
    let mut map: BTreeMap<u32, char> = BTreeMap::new();
    for (key, value) in [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')] {
        assert_eq!(map.insert(key, value), None);
    }
    assert_eq!(map.height(), 1, "Four keys should fit in a single node.");

    map.insert(5, 'e');
    assert_eq!(map.height(), 2, "The fifth key should split the root.");
    let root = &map.nodes[map.root as usize];
    assert_eq!(&root.keys[..], &[3]);
    assert_eq!(&map.nodes[root.children[0] as usize].keys[..], &[1, 2]);
    assert_eq!(&map.nodes[root.children[1] as usize].keys[..], &[4, 5]);
    assert_eq!(map.check_invariants(), Ok(()));
}

#[test]
fn test_insert_lookup() {
    let mut map: BTreeMap<i32, i32> = BTreeMap::new();
    for key in (0..200).rev().step_by(2) {
        assert_eq!(map.insert(key, key * 10), None);
        assert_eq!(map.check_invariants(), Ok(()));
    }
    assert_eq!(map.len(), 100);
    for key in 0..200 {
        if key % 2 == 1 {
            assert_eq!(map.lookup(&key), Optional::Value(&(key * 10)));
        } else {
            assert_eq!(map.lookup(&key), Optional::Empty, "Absent keys shouldn't be found.");
        }
    }

    assert_eq!(map.insert(51, 0), Some(510), "Reinserting should replace the value.");
    assert_eq!(map.len(), 100);
    if let Optional::Value(value) = map.lookup_mut(&51) {
        *value += 7;
    }
    assert_eq!(map.lookup(&51), Optional::Value(&7));
    assert_eq!(map.first(), Optional::Value((&1, &10)));
    assert!(map.iter().map(|(key, _)| *key).eq((1..200).step_by(2)));
}

#[test]
fn test_remove_rebalance() {
    let mut map: BTreeMap<u32, u32> = (0..64).map(|key| (key, key)).collect();
    assert_eq!(map.check_invariants(), Ok(()));

    // Removing from the middle outwards exercises rotations from both sides and merges.
    let order = (0..32).rev().zip(32..64).flat_map(|(low, high)| [low, high]);
    for (count, key) in order.enumerate() {
        assert_eq!(map.remove_entry(&key), Optional::Value((key, key)));
        assert_eq!(map.remove(&key), Optional::Empty, "A removed key should be gone.");
        assert_eq!(map.len(), 63 - count);
        assert_eq!(map.check_invariants(), Ok(()));
    }
    assert!(map.is_empty());
    assert_eq!(map.root, NONE);
    assert_eq!(map.height(), 0);
    assert!(map.nodes.is_empty(), "Every node should be freed.");
}

#[test]
fn test_internal_removals_keep_structure() {
    // Removing separators of internal nodes goes through predecessor substitution, then
    // borrowing from either sibling or merging. None of those paths may hit a broken node.
    for order in [[0, 1, 2], [2, 1, 0], [1, 0, 2]] {
        let mut map: BTreeMap<u32, u32> = (0..120).map(|key| (key, key)).collect();
        for key in (0..120).step_by(3).flat_map(|base| order.map(|offset| base + offset)) {
            assert_eq!(map.remove(&key), Optional::Value(key));
            assert_eq!(map.check_invariants(), Ok(()), "after removing {key}");
        }
        assert!(map.is_empty());
        assert!(map.nodes.is_empty(), "Every node should be freed.");
    }
}

#[test]
fn test_larger_branching_factor() {
    let mut set: BTreeSet<u16, 7> = BTreeSet::new();
    for key in (0..500).map(|i| (i * 37) % 500) {
        assert!(set.insert(key));
    }
    assert!(!set.insert(37));
    assert_eq!(set.len(), 500);
    assert_eq!(set.check_invariants(), Ok(()));
    assert!(set.height() <= 5);

    for key in (0..500).filter(|key| key % 3 != 0) {
        assert!(set.remove(&key));
    }
    assert!(!set.remove(&1));
    assert_eq!(set.check_invariants(), Ok(()));
    assert!(set.iter().copied().eq((0..500).step_by(3)));
    assert!(set.contains(&0) && !set.contains(&500));
}

#[test]
fn test_drops() {
    let counter = Rc::new(Cell::new(0));
    let mut map: BTreeMap<u32, CountedDrop> = BTreeMap::new();
    for key in 0..40 {
        map.insert(key, CountedDrop::new(&counter));
    }
    map.insert(3, CountedDrop::new(&counter));
    assert_eq!(counter.get(), 1, "The replaced value should be dropped.");

    for key in 0..10 {
        let _ = map.remove(&key);
    }
    assert_eq!(counter.get(), 11);

    map.clear();
    assert_eq!(counter.get(), 41);
    assert!(map.is_empty());
    map.insert(1, CountedDrop::new(&counter));
    drop(map);
    assert_eq!(counter.get(), 42);
}

#[test]
fn test_debug() {
    let set: BTreeSet<char> = "btree".chars().collect();
    assert_eq!(format!("{set:?}"), "{'b', 'e', 'r', 't'}");
    let map: BTreeMap<u8, bool> = [(2, true), (1, false)].into_iter().collect();
    assert_eq!(format!("{map:?}"), "{1: false, 2: true}");
}

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u8, u16),
    Remove(u8),
}

proptest! {
    #[test]
    fn prop_matches_reference(ops in proptest::collection::vec(
        prop_oneof![
            (any::<u8>(), any::<u16>()).prop_map(|(key, value)| MapOp::Insert(key, value)),
            any::<u8>().prop_map(MapOp::Remove),
        ],
        0..300,
    )) {
        let mut map: BTreeMap<u8, u16> = BTreeMap::new();
        let mut reference = std::collections::BTreeMap::new();
        for op in ops {
            match op {
                MapOp::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), reference.insert(key, value));
                },
                MapOp::Remove(key) => {
                    prop_assert_eq!(map.remove(&key).into_option(), reference.remove(&key));
                },
            }
            prop_assert_eq!(map.check_invariants(), Ok(()));
        }
        prop_assert_eq!(map.len(), reference.len());
        let entries: Vector<(u8, u16)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert!(entries.iter().copied().eq(reference.into_iter()));
    }

    #[test]
    fn prop_wide_nodes_hold_invariants(keys in proptest::collection::vec(any::<i16>(), 0..400)) {
        let mut set: BTreeSet<i16, 9> = keys.iter().copied().collect();
        prop_assert_eq!(set.check_invariants(), Ok(()));
        for key in keys.iter().step_by(2) {
            set.remove(key);
            prop_assert_eq!(set.check_invariants(), Ok(()));
        }
    }
}
