#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use proptest::prelude::*;

use super::*;
use crate::v2026::ptr::MIN_ALIGN;
use crate::v2026::sum::Optional;
use crate::v2026::util::panic::assert_panics;
use crate::v2026::util::testing::{CountedDrop, OrderedDrop, ZeroSizedType};

#[test]
fn test_min_cap_and_growth() {
    let mut vec = Vector::new();
    assert_eq!(vec.cap(), 0, "A new Vector shouldn't allocate.");

    vec.push(1_u8);
    assert_eq!(vec.cap(), MIN_CAP, "The first allocation should use the minimum capacity.");

    vec.extend(2..=17);
    assert_eq!(vec.cap(), MIN_CAP * 2, "Capacity should double when exceeded.");
    assert_eq!(vec.as_ptr() as usize % MIN_ALIGN, 0, "The block should be aligned to MIN_ALIGN.");

    vec.reserve(100);
    assert!(vec.cap() >= vec.len() + 100);
}

#[test]
fn test_pop_and_access() {
    let mut vec: Vector<_> = (0..3).collect();
    assert_eq!(vec.front(), Ok(&0));
    assert_eq!(vec.back(), Ok(&2));
    assert_eq!(vec.at(1), Ok(&1));
    assert_eq!(vec.at(3).map_err(|e| e.index), Err(3));

    assert_eq!(vec.pop(), Optional::Value(2));
    assert_eq!(vec.pop(), Optional::Value(1));
    assert_eq!(vec.pop(), Optional::Value(0));
    assert_eq!(vec.pop(), Optional::Empty, "Popping an empty Vector should yield Empty.");
    assert!(vec.front().is_err());
    assert!(vec.back().is_err());
}

#[test]
fn test_insert_remove() {
    let mut vec: Vector<_> = "Hello world!".chars().collect();
    assert_eq!(vec.remove(1), 'e');
    assert_eq!(vec.remove(4), ' ');
    assert_eq!(vec.iter().collect::<String>(), "Hlloworld!");

    vec.insert(0, '>');
    vec.insert(vec.len(), '<');
    assert_eq!(vec.iter().collect::<String>(), ">Hlloworld!<");

    assert_eq!(vec.swap_remove(0), '>');
    assert_eq!(vec[0], '<');

    assert_panics!({
        vec.insert(100, 'x');
    }, "Inserting past the end should panic.");
    let len = vec.len();
    assert_panics!({
        vec.remove(len);
    }, message = format!("Index {len} out of bounds for collection with {len} elements!"));
}

#[test]
fn test_push_copy_of_while_growing() {
    let mut vec = Vector::with_cap(1);
    vec.push(String::from("first"));
    assert_eq!(vec.len(), vec.cap(), "The next push has to grow.");

    vec.push_copy_of(0).expect("index 0 exists");
    assert_eq!(&*vec, &["first", "first"]);
    assert!(vec.push_copy_of(2).is_err());
}

#[test]
fn test_emplace() {
    let mut vec = Vector::new();
    let value = vec.emplace_with(|| String::from("built in place"));
    value.push('!');
    assert_eq!(vec.back().map(String::as_str), Ok("built in place!"));
}

#[test]
fn test_clear_drops_in_reverse() {
    let log = Rc::new(RefCell::new(Vector::new()));
    let mut vec: Vector<_> = (0..4)
        .map(|id| OrderedDrop { id, log: Rc::clone(&log) })
        .collect();

    vec.clear();
    assert_eq!(&**log.borrow(), &[3, 2, 1, 0], "Elements should be destroyed last first.");
    assert!(vec.cap() > 0, "Clearing should keep the capacity.");

    vec.push(OrderedDrop { id: 9, log: Rc::clone(&log) });
    vec.push(OrderedDrop { id: 8, log: Rc::clone(&log) });
    drop(vec);
    assert_eq!(&**log.borrow(), &[3, 2, 1, 0, 8, 9]);
}

#[test]
fn test_into_iter_drops_remainder() {
    let drops = Rc::new(Cell::new(0));
    let vec: Vector<_> = (0..5).map(|_| CountedDrop::new(&drops)).collect();

    let mut iter = vec.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(drops.get(), 2);
    assert_eq!(iter.len(), 3);

    drop(iter);
    assert_eq!(drops.get(), 5, "Unyielded elements should be dropped with the iterator.");
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::new();
    for _ in 0..100 {
        vec.push(ZeroSizedType);
    }
    assert_eq!(vec.len(), 100);
    assert_eq!(vec.pop(), Optional::Value(ZeroSizedType));
    assert_eq!(vec.into_iter().count(), 99);
}

#[test]
fn test_clone_and_compare() {
    let vec: Vector<_> = ["b", "a"].into_iter().collect();
    let copy = vec.clone();
    assert_eq!(vec, copy);
    let greater: Vector<_> = ["c"].into_iter().collect();
    assert!(copy < greater, "Vectors should order lexicographically.");

    let mut assigned = Vector::new();
    assigned.assign(copy.iter().rev().copied());
    assert_eq!(&*assigned, &["a", "b"]);
}

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Reserve(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
        (0_usize..64).prop_map(Op::Reserve),
    ]
}

proptest! {
    #[test]
    fn prop_matches_reference_list(ops in proptest::collection::vec(op_strategy(), 0..200)) {
        let mut vec = Vector::new();
        let mut reference = std::vec::Vec::new();

        for op in ops {
            match op {
                Op::Push(value) => {
                    vec.push(value);
                    reference.push(value);
                },
                Op::Pop => {
                    prop_assert_eq!(vec.pop().into_option(), reference.pop());
                },
                Op::Reserve(extra) => vec.reserve(extra),
            }
            prop_assert_eq!(&*vec, reference.as_slice());
        }
    }

    #[test]
    fn prop_push_then_access(values in proptest::collection::vec(any::<u64>(), 0..100)) {
        let mut vec = Vector::new();
        for value in &values {
            vec.push(*value);
        }
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(vec.at(index), Ok(value));
        }
    }
}
