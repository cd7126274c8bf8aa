#![cfg(test)]

use std::cell::Cell;
use std::mem::MaybeUninit;
use std::rc::Rc;

use super::*;
use crate::v2026::util::panic::assert_panics;
use crate::v2026::util::testing::{CountedDrop, ZeroSizedType};

#[repr(align(32))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct OverAligned(u8);

#[test]
fn test_alignment() {
    let small = UniqueArray::<u8>::repeat_default(3);
    assert_eq!(
        small.as_ptr() as usize % MIN_ALIGN, 0,
        "Blocks should be aligned to at least MIN_ALIGN."
    );

    let big = UniqueArray::<OverAligned>::repeat_default(3);
    assert_eq!(
        big.as_ptr() as usize % 32, 0,
        "Blocks should honor alignments greater than MIN_ALIGN."
    );
}

#[test]
fn test_at_bounds() {
    let mut arr = UniqueArray::from_slice(&[1_u16, 2, 3]);
    assert_eq!(arr.size(), 3);
    assert_eq!(arr.size_bytes(), 6);
    assert_eq!(arr.at(0), Ok(&1));
    *arr.at_mut(1).expect("Index 1 is in bounds.") = 20;
    assert_eq!(&*arr, &[1, 20, 3]);

    let error = arr.at(3).expect_err("Index 3 is out of bounds.");
    assert_eq!((error.index, error.len), (3, 3));
}

#[test]
fn test_realloc_moves_values() {
    let mut arr = UniqueArray::<String>::new_uninit(2);
    arr[0] = MaybeUninit::new(String::from("a"));
    arr[1] = MaybeUninit::new(String::from("b"));

    arr.realloc(4);
    assert_eq!(arr.size(), 4);
    arr[2] = MaybeUninit::new(String::from("c"));
    arr[3] = MaybeUninit::new(String::from("d"));

    // SAFETY: All four slots have been written.
    let arr = unsafe { arr.assume_init() };
    assert_eq!(&*arr, &["a", "b", "c", "d"], "Existing values should survive reallocation.");
}

#[test]
fn test_zst_support() {
    let arr = UniqueArray::<ZeroSizedType>::repeat_default(5);
    assert_eq!(arr.size(), 5);
    assert_eq!(arr.size_bytes(), 0);
    assert_eq!(arr[4], ZeroSizedType);

    let mut uninit = arr.forget_init();
    uninit.realloc(8);
    assert_eq!(uninit.size(), 8);
}

#[test]
fn test_drops_every_element() {
    let drops = Rc::new(Cell::new(0));
    let arr = UniqueArray::from_slice(&[CountedDrop::new(&drops), CountedDrop::new(&drops)]);
    // The two temporaries in the slice literal have been dropped by now.
    assert_eq!(drops.get(), 2);

    drop(arr);
    assert_eq!(drops.get(), 4, "Dropping the array should drop both clones.");
}

#[test]
fn test_unique_ptr_size() {
    assert_eq!(
        size_of::<UniquePtr<[u64; 8]>>(), size_of::<*mut [u64; 8]>(),
        "A UniquePtr should be a single pointer."
    );
}

#[test]
fn test_unique_ptr_lifecycle() {
    let drops = Rc::new(Cell::new(0));
    let mut ptr = UniquePtr::new(CountedDrop::new(&drops));
    assert!(ptr.has_value());
    assert!(ptr.get().is_ok());

    ptr.reset_with(CountedDrop::new(&drops));
    assert_eq!(drops.get(), 1, "Replacing the object should destroy the old one.");

    ptr.reset();
    assert_eq!(drops.get(), 2);
    assert!(ptr.is_empty());
    assert!(ptr.get().is_err());
    assert!(ptr.as_optional().is_empty());
}

#[test]
fn test_unique_ptr_deref() {
    let mut ptr = UniquePtr::new(String::from("heap"));
    ptr.push('!');
    assert_eq!(ptr.len(), 5);

    let released = ptr.release().expect("ptr held a value");
    assert_eq!(*released, "heap!");
    assert_panics!({
        let _ = ptr.len();
    }, "Dereferencing an empty UniquePtr should panic.");
}
