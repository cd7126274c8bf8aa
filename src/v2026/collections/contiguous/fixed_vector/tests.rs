#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::v2026::error::CapacityExhausted;
use crate::v2026::sum::Optional;
use crate::v2026::util::panic::assert_panics;
use crate::v2026::util::testing::CountedDrop;

#[test]
fn test_push_until_full() {
    let mut vec: FixedVector<u32, 3> = FixedVector::new();
    for i in 0..3 {
        vec.push(i);
    }
    assert!(vec.is_full());
    assert_eq!(vec.try_push(3), Err(3), "A full FixedVector should hand the value back.");
    assert_eq!(&*vec, &[0, 1, 2]);

    assert_panics!({
        vec.push(3);
    }, "Pushing onto a full FixedVector should panic.");
}

#[test]
fn test_insert_and_remove() {
    let mut vec: FixedVector<char, 4> = FixedVector::new();
    vec.push('b');
    vec.insert(0, 'a');
    vec.insert(2, 'd');
    vec.insert(2, 'c');
    assert_eq!(&*vec, &['a', 'b', 'c', 'd']);
    assert_eq!(vec.try_insert(0, 'z'), Err('z'));

    assert_eq!(vec.remove(1), 'b');
    assert_eq!(vec.pop_front(), Optional::Value('a'));
    assert_eq!(vec.pop(), Optional::Value('d'));
    assert_eq!(&*vec, &['c']);
    assert_eq!(vec.try_insert(5, 'x'), Err('x'), "Inserting past the end should fail.");

    assert_eq!(vec.delete_at(0), Ok(()));
    assert_eq!(vec.delete_at(0).map_err(|e| e.len), Err(0));
    assert_eq!(vec.pop(), Optional::Empty);
    assert_eq!(vec.pop_front(), Optional::Empty);

    assert_panics!({
        vec.remove(0);
    });
}

#[test]
fn test_append_all_or_nothing() {
    let mut left: FixedVector<u8, 4> = FixedVector::new();
    let mut right: FixedVector<u8, 4> = FixedVector::new();
    left.push(1);
    left.push(2);
    right.push(3);
    right.push(4);
    right.push(5);

    assert_eq!(left.append(&mut right), Err(CapacityExhausted { cap: 4 }));
    assert_eq!(&*left, &[1, 2], "A failed append shouldn't change the destination.");
    assert_eq!(&*right, &[3, 4, 5], "A failed append shouldn't change the source.");

    right.pop();
    assert_eq!(left.append(&mut right), Ok(()));
    assert_eq!(&*left, &[1, 2, 3, 4]);
    assert!(right.is_empty());
}

#[test]
fn test_split_off() {
    let mut vec: FixedVector<String, 5> = FixedVector::new();
    for word in ["a", "b", "c", "d"] {
        vec.push(word.to_owned());
    }
    let tail = vec.split_off(1);
    assert_eq!(&*vec, &["a"]);
    assert_eq!(&*tail, &["b", "c", "d"]);
    assert_eq!(vec.front(), Ok(&String::from("a")));
    assert_eq!(tail.back(), Ok(&String::from("d")));
}

#[test]
fn test_drops() {
    let counter = Rc::new(Cell::new(0));
    {
        let mut vec: FixedVector<CountedDrop, 8> = FixedVector::new();
        for _ in 0..6 {
            vec.push(CountedDrop::new(&counter));
        }
        drop(vec.remove(0));
        assert_eq!(counter.get(), 1);
        vec.truncate(3);
        assert_eq!(counter.get(), 3);

        let mut iter = vec.into_iter();
        drop(iter.next());
        assert_eq!(counter.get(), 4);
    }
    assert_eq!(counter.get(), 6, "Every element should be dropped exactly once.");
}

#[test]
fn test_clone_and_compare() {
    let mut vec: FixedVector<u16, 3> = FixedVector::new();
    vec.push(7);
    vec.push(9);
    let copy = vec.clone();
    assert_eq!(vec, copy);
    assert_eq!(format!("{copy:?}"), "[7, 9]");
    assert_eq!(copy.into_iter().rev().collect::<Vec<_>>(), [9, 7]);
}
