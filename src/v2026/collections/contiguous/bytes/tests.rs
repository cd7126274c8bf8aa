#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use super::*;
use crate::v2026::error::{EmptyCollection, Error, IndexOutOfBounds};

#[test]
fn test_growth_policy() {
    let mut bytes = Bytes::new();
    assert_eq!(bytes.cap(), INITIAL_CAP, "A new buffer should start with the initial capacity.");

    bytes.extend_from_slice(&[7; 16]);
    assert_eq!(bytes.cap(), 16, "Filling the buffer exactly shouldn't grow it.");

    bytes.push(8);
    assert_eq!(bytes.cap(), 32, "Capacity should double when exceeded.");

    bytes.extend_from_slice(&[9; 100]);
    assert_eq!(bytes.cap(), 128, "Capacity should double until it fits the demand.");
    assert_eq!(bytes.len(), 117);

    bytes.resize(3);
    assert_eq!(bytes.cap(), 128, "Shrinking should keep the capacity.");
    assert_eq!(&*bytes, &[7, 7, 7]);
}

#[test]
fn test_insert_and_remove() {
    let mut bytes = Bytes::from_slice(b"abcdef");
    bytes.insert(0, b">").expect("offset 0 is valid");
    bytes.insert(7, b"<").expect("offset len is valid");
    bytes.insert(4, b"--").expect("offset 4 is valid");
    assert_eq!(&*bytes, b">abc--def<");

    assert_eq!(
        bytes.insert(11, b"x"),
        Err(IndexOutOfBounds { index: 11, len: 10 }),
        "Inserting past the end should fail."
    );

    bytes.remove(4..6).expect("range is in bounds");
    assert_eq!(&*bytes, b">abcdef<");
    assert!(bytes.remove(3..9).is_err());

    bytes.pop_front(1).expect("one byte to pop");
    bytes.pop_back(1).expect("one byte to pop");
    assert_eq!(&*bytes, b"abcdef");
    assert!(bytes.pop_back(7).is_err(), "Popping more than the length should fail.");
}

#[test]
fn test_access() {
    let mut bytes = Bytes::new();
    assert_eq!(bytes.front(), Err(EmptyCollection));
    assert_eq!(bytes.back(), Err(EmptyCollection));
    assert!(bytes.at(0).is_err());

    bytes.assign(b"xyz");
    assert_eq!(bytes.front(), Ok(b'x'));
    assert_eq!(bytes.back(), Ok(b'z'));
    assert_eq!(bytes.at(1), Ok(b'y'));
    assert_eq!(bytes.at(3), Err(IndexOutOfBounds { index: 3, len: 3 }));

    bytes.resize(5);
    assert_eq!(&*bytes, b"xyz\0\0", "Growing with resize should zero the new bytes.");

    bytes.clear();
    assert!(bytes.is_empty());
}

#[test]
fn test_ordering_and_equality() {
    let a = Bytes::from("apple");
    let b = Bytes::from("apricot");
    let short = Bytes::from("ap");

    assert!(a < b, "Ordering should be lexicographic.");
    assert!(short < a, "A prefix should order first.");
    assert_eq!(a, Bytes::from_slice(b"apple"));
    assert_ne!(a, b);
    assert_eq!(a.view(), a);

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&a), state.hash_one(&a.clone()),
        "Equal buffers should hash equally."
    );
    assert_eq!(state.hash_one(&a), state.hash_one(a.view()));
}

#[test]
fn test_raw_interop() {
    let source = Bytes::from("shared");
    // SAFETY: The pointer and length come from a live buffer.
    let copy = unsafe { Bytes::from_raw_parts(source.as_ptr(), source.len()) };
    assert_eq!(copy, source);
    assert_ne!(copy.as_ptr(), source.as_ptr(), "The copy should own its storage.");

    let mut target = Bytes::from("[]");
    // SAFETY: source is live for the duration of the call.
    unsafe { target.insert_raw(1, source.as_ptr(), source.len()) }
        .expect("source is a separate allocation");
    assert_eq!(&*target, b"[shared]");
}

#[test]
fn test_raw_insert_rejects_self_alias() {
    let mut bytes = Bytes::from("loop");
    let ptr = bytes.as_ptr();
    // SAFETY: ptr is valid for 4 bytes, the call is expected to refuse it.
    let result = unsafe { bytes.insert_raw(0, ptr, 4) };
    assert!(
        matches!(result, Err(Error::Unsupported(_))),
        "Inserting a buffer into itself should be refused."
    );
    assert_eq!(&*bytes, b"loop", "A refused insertion shouldn't modify the buffer.");
}

#[test]
fn test_view_overlap() {
    let bytes = Bytes::from("overlapping");
    let left = BytesView::new(&bytes[0..5]);
    let right = BytesView::new(&bytes[4..]);
    let far = BytesView::new(&bytes[6..]);

    assert!(left.overlaps(&right));
    assert!(right.overlaps(&left));
    assert!(!left.overlaps(&far));
    assert_eq!(left.to_bytes(), Bytes::from("overl"));
}
