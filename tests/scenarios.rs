#![cfg(feature = "v2026")]

use std::mem;

use epoch_std::v2026::algorithm::{self, IntrosortStats};
use epoch_std::v2026::collections::contiguous::Vector;
use epoch_std::v2026::collections::hash::HashMap;
use epoch_std::v2026::collections::tree::RBTree;
use epoch_std::v2026::error::BadVariantAccess;
use epoch_std::v2026::string::U8String;
use epoch_std::v2026::sum::{Optional, Variant};
use epoch_std::v2026::variant;

#[test]
fn word_counter() {
    let lines = ["a b\n", "b c\n", "a\n"];
    let mut counts: HashMap<U8String, usize> = HashMap::new();
    for line in lines {
        let line: U8String = line.parse().unwrap();
        for word in line.split_ascii() {
            *counts.entry_or_default(word) += 1;
        }
    }

    let mut entries: Vector<(U8String, usize)> = counts.into_iter().collect();
    // Ties on both count and length are broken by the word itself, since map order is arbitrary.
    algorithm::merge_sort_by(&mut entries, |(a_word, a_count), (b_word, b_count)| {
        (b_count, b_word.len(), a_word) < (a_count, a_word.len(), b_word)
    });

    let result: Vec<(&str, usize)> = entries.iter().map(|(w, c)| (w.as_str(), *c)).collect();
    assert_eq!(result, [("a", 2), ("b", 2), ("c", 1)]);
}

#[test]
fn red_black_lifecycle() {
    let order = [
        7, 17, 19, 24, 2, 20, 14, 1, 6, 23, 8, 12, 25, 21, 15, 22, 5, 0, 18, 4, 16, 3, 11, 9, 13,
        10,
    ];
    let mut tree = RBTree::new();
    for key in order {
        assert!(tree.insert(key));
        tree.check_invariants().unwrap();
    }
    assert_eq!(tree.len(), 26);
    assert!(tree.iter().copied().eq(0..=25));

    for (removed, key) in order.iter().enumerate() {
        assert!(tree.remove(key), "{key} should still be present");
        tree.check_invariants().unwrap();
        assert_eq!(tree.len(), 25 - removed);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.first(), Optional::Empty);
}

#[test]
fn reverse_utf8_iteration() {
    let text: U8String = "大刀".parse().unwrap();
    assert_eq!(text.len(), 6);
    let mut rev = text.chars_rev();
    assert_eq!(rev.next().map(u32::from), Some(0x5200));
    assert_eq!(rev.next().map(u32::from), Some(0x5927));
    assert_eq!(rev.next(), None);
}

#[test]
fn hash_map_growth() {
    let mut map: HashMap<i32, i32> = HashMap::new();
    for i in 0..32 {
        map.insert(i, 32 - i);
        for j in 0..32 {
            let expected = if j <= i { Optional::Value(32 - j) } else { Optional::Empty };
            assert_eq!(map.lookup(&j).copied(), expected, "lookup({j}) after inserting {i}");
        }
    }
    assert_eq!(map.len(), 32);

    for i in 0..32 {
        assert_eq!(map.remove(&i), Optional::Value(32 - i));
        assert_eq!(map.lookup(&i), Optional::Empty);
        for j in i + 1..32 {
            assert_eq!(map.lookup(&j).copied(), Optional::Value(32 - j));
        }
    }
    assert!(map.is_empty());
}

variant! {
    #[derive(Debug, Clone, PartialEq)]
    enum NameOrNumber {
        Number(i32),
        Name(U8String),
    }
}

#[test]
fn variant_move_assignment() {
    let mut source = NameOrNumber::from("bob".parse::<U8String>().unwrap());
    let mut destination = NameOrNumber::from(666_i32);
    assert_eq!(destination.get::<i32>(), Ok(&666));

    destination = mem::take(&mut source);
    assert_eq!(destination.get::<U8String>().map(U8String::as_str), Ok("bob"));
    assert_eq!(source, NameOrNumber::default(), "The source is left holding the default.");

    let err = destination.get::<i32>().unwrap_err();
    assert_eq!(err, BadVariantAccess {
        expected: "i32",
        held: std::any::type_name::<U8String>(),
    });
}

#[test]
fn introsort_descending_input() {
    let mut values: Vec<u32> = (0..10_000).rev().collect();
    let IntrosortStats { max_depth, .. } = algorithm::introsort_stats(&mut values);
    assert!(values.iter().copied().eq(0..10_000));
    assert!(
        max_depth <= 10_000_f64.log2() as usize + 1,
        "recursion reached depth {max_depth}"
    );
}
