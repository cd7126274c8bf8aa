#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use proptest::collection::hash_set;
use proptest::prelude::*;

use super::*;
use crate::v2026::collections::contiguous::Vector;
use crate::v2026::error::KeyMissing;
use crate::v2026::sum::Optional;
use crate::v2026::util::panic::assert_panics;
use crate::v2026::util::testing::{BadHasherBuilder, CountedDrop, ManualHash};

#[test]
fn test_insert_lookup_overwrite() {
    let mut map: HashMap<String, i32> = HashMap::new();
    assert_eq!(map.cap(), 16, "A new map should start with 16 slots.");

    map.insert("one".to_owned(), 1);
    map.insert("two".to_owned(), 2);
    *map.insert("one".to_owned(), 10) += 1;

    assert_eq!(map.len(), 2, "Overwriting shouldn't add an entry.");
    assert_eq!(map.lookup("one"), Optional::Value(&11));
    assert_eq!(map.lookup("three"), Optional::Empty);
    assert_eq!(map.at("two"), Ok(&2));
    assert_eq!(map.at("three"), Err(KeyMissing));
    assert_eq!(map["two"], 2);
    assert!(map.contains("one"));

    if let Optional::Value(value) = map.lookup_mut("two") {
        *value = 20;
    }
    assert_eq!(map.at("two"), Ok(&20));

    assert_panics!({
        let _ = map["missing"];
    }, message = "Key not present in map!");
}

#[test]
fn test_hash_collisions() {
    let mut map = HashMap::with_hasher(BadHasherBuilder);
    map.insert(ManualHash::new(0, "zero"), 0);
    map.insert(ManualHash::new(0, "one"), 1);
    map.insert(ManualHash::new(2, "two"), 2);
    map.insert(ManualHash::new(0, "three"), 3);
    map.insert(ManualHash::new(2, "four"), 4);
    map.insert(ManualHash::new(1, "five"), 5);

    assert_eq!(map.remove(&ManualHash::new(0, "zero")), Optional::Value(0));
    assert_eq!(map.remove(&ManualHash::new(2, "two")), Optional::Value(2));
    assert_eq!(map.tombstones, 2, "Removing from the middle of a chain should leave tombstones.");

    for (name, value) in [("one", 1), ("three", 3), ("four", 4), ("five", 5)] {
        let hash = match name {
            "four" => 2,
            "five" => 1,
            _ => 0,
        };
        assert_eq!(
            map.lookup(&ManualHash::new(hash, name)),
            Optional::Value(&value),
            "No entry should be lost when a collision chain has holes."
        );
    }

    // Slot 15 wraps around to slot 0.
    map.insert(ManualHash::new(15, "wrap"), 15);
    map.insert(ManualHash::new(15, "wrapped"), 16);
    assert_eq!(map.lookup(&ManualHash::new(15, "wrapped")), Optional::Value(&16));
}

#[test]
fn test_remove_marks_empty_between_empties() {
    let mut map = HashMap::with_hasher(BadHasherBuilder);
    map.insert(ManualHash::new(4, 'a'), ());
    map.insert(ManualHash::new(9, 'b'), ());
    map.remove(&ManualHash::new(4, 'a'));
    assert_eq!(map.tombstones, 0, "A slot with empty neighbors should become empty.");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_tombstones_trigger_rehash() {
    let mut map = HashMap::with_hasher(BadHasherBuilder);
    // One long chain from slot 0, then empty its front so each removal leaves a tombstone.
    for i in 0..11 {
        map.insert(ManualHash::new(0, i), i);
    }
    for i in 0..10 {
        map.remove(&ManualHash::new(0, i));
    }
    assert_eq!(map.len(), 1);
    assert_eq!(map.tombstones, 10);

    map.insert(ManualHash::new(3, 100), 100);
    map.insert(ManualHash::new(3, 101), 101);
    assert_eq!(map.cap(), 16, "Few live entries should rehash at the same size.");
    assert_eq!(map.tombstones, 0, "A rehash should clear every tombstone.");
    assert_eq!(map.lookup(&ManualHash::new(0, 10)), Optional::Value(&10));
    assert_eq!(map.lookup(&ManualHash::new(3, 101)), Optional::Value(&101));
}

#[test]
fn test_growth_and_reserve() {
    let mut map: HashMap<usize, usize> = HashMap::new();
    for i in 0..11 {
        map.insert(i, i);
    }
    assert_eq!(map.cap(), 16, "11 entries fit in 16 slots at a 0.7 load.");
    map.insert(11, 11);
    assert_eq!(map.cap(), 32, "The 12th entry should double the table.");

    map.reserve(100);
    assert!(map.cap() * 7 >= (map.len() + 100) * 10);
    assert!(map.cap().is_power_of_two());
    for i in 0..12 {
        assert_eq!(map.at(&i), Ok(&i));
    }

    let sized: HashMap<u8, u8> = HashMap::with_cap(100);
    assert_eq!(sized.cap(), 256);
}

#[test]
fn test_entry_or_default_and_iteration() {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in ["a", "b", "a", "c", "a"] {
        *counts.entry_or_default(word) += 1;
    }
    assert_eq!(counts.len(), 3);
    assert_eq!(counts["a"], 3);

    for value in counts.values_mut() {
        *value *= 10;
    }
    let mut pairs: Vector<_> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    pairs.sort();
    assert_eq!(&*pairs, &[("a", 30), ("b", 10), ("c", 10)]);
    assert_eq!(counts.keys().len(), 3);
    assert_eq!(counts.values().sum::<usize>(), 50);
}

#[test]
fn test_clear_clone_and_drops() {
    let counter = Rc::new(Cell::new(0));
    let mut map: HashMap<u32, CountedDrop> = HashMap::new();
    for i in 0..20 {
        map.insert(i, CountedDrop::new(&counter));
    }
    map.insert(0, CountedDrop::new(&counter));
    assert_eq!(counter.get(), 1, "Overwriting should drop the old value.");

    let copy = map.clone();
    assert_eq!(copy.len(), 20);
    assert!(copy.contains(&19));

    map.clear();
    assert_eq!(counter.get(), 21);
    assert!(map.is_empty());
    assert!(map.lookup(&3).is_empty());

    let mut iter = copy.into_iter();
    drop(iter.next());
    assert_eq!(counter.get(), 22);
    drop(iter);
    assert_eq!(counter.get(), 41, "Dropping an IntoIter should drop the remaining entries.");
}

#[test]
fn test_instances_use_distinct_salts() {
    let first: HashMap<u8, ()> = HashMap::new();
    let second: HashMap<u8, ()> = HashMap::new();
    assert_ne!(first.salt, second.salt);
    assert_ne!(first.hash_key(&7), second.hash_key(&7));
}

#[test]
fn test_salt_follows_growth() {
    let mut first: HashMap<u8, u8> = HashMap::new();
    let initial_salt = first.salt;
    for key in 0..12 {
        first.insert(key, key);
    }
    assert!(first.cap() > 16, "Twelve entries should have grown the table.");
    assert_ne!(first.salt, initial_salt, "Growing should move the salt to the new block.");
    assert_eq!(first.salt, first.metadata.as_ptr() as usize);

    // The freed block may be reused by the next map, which must not share the salt.
    let second: HashMap<u8, u8> = HashMap::new();
    assert_ne!(first.salt, second.salt, "Two live maps should never share a salt.");
    for key in 0..12 {
        assert_eq!(first.lookup(&key), Optional::Value(&key), "Entries survive growth.");
    }
}

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u16, u32),
    Remove(u16),
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        (0..64_u16, any::<u32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        (0..64_u16).prop_map(MapOp::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_functional_law(keys in hash_set(any::<u32>(), 0..200)) {
        let mut map: HashMap<u32, u64> = HashMap::new();
        for key in &keys {
            map.insert(*key, u64::from(*key) * 3);
        }
        prop_assert_eq!(map.len(), keys.len());
        for key in &keys {
            prop_assert_eq!(map.lookup(key), Optional::Value(&(u64::from(*key) * 3)));
        }

        for (removed, key) in keys.iter().enumerate() {
            prop_assert_eq!(map.remove(key), Optional::Value(u64::from(*key) * 3));
            prop_assert!(map.lookup(key).is_empty());
            prop_assert_eq!(map.len(), keys.len() - removed - 1);
        }
    }

    #[test]
    fn prop_matches_reference_map(ops in proptest::collection::vec(map_op(), 0..300)) {
        let mut map: HashMap<u16, u32> = HashMap::new();
        let mut reference = std::collections::HashMap::new();
        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    map.insert(k, v);
                    reference.insert(k, v);
                },
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k).into_option(), reference.remove(&k));
                },
            }
            prop_assert!((map.len() + map.tombstones) * 10 <= map.cap() * 7);
        }
        prop_assert_eq!(map.len(), reference.len());
        for (k, v) in &reference {
            prop_assert_eq!(map.at(k), Ok(v));
        }
    }

    #[test]
    fn prop_resize_preserves_entries(count in 0..500_usize) {
        let mut map: HashMap<usize, usize> = HashMap::new();
        for i in 0..count {
            map.insert(i, count - i);
        }
        let before = map.cap();
        map.reserve(map.cap());
        prop_assert!(map.cap() > before);
        for i in 0..count {
            prop_assert_eq!(map.at(&i), Ok(&(count - i)));
        }
    }
}
