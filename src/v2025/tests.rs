#![cfg(test)]

use std::panic;

use super::*;
use super::error::{EmbeddedNul, Error, OutOfRange};

fn panic_message<F: FnOnce() + panic::UnwindSafe>(run: F) -> String {
    let payload = panic::catch_unwind(run).expect_err("the operation should have panicked");
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(_) => String::from("<non-string payload>"),
    }
}

#[test]
fn test_bytes_growth() {
    let mut bytes = Bytes::new();
    assert_eq!(bytes.capacity(), bytes::INITIAL_CAPACITY);
    for i in 0..40 {
        bytes.append(i);
    }
    assert_eq!(bytes.size(), 40);
    assert_eq!(bytes.capacity(), 64, "Capacity should double from 16 until it fits.");
    assert_eq!(bytes.front(), 0);
    assert_eq!(bytes.back(), 39);

    let mut empty = Bytes::with_capacity(0);
    empty.append(7);
    assert_eq!(empty.capacity(), 16);
    assert_eq!(empty.get(0), 7);
}

#[test]
fn test_bytes_editing() {
    let mut bytes = Bytes::from_slice(b"hello world");
    bytes.pop_front(6);
    assert_eq!(bytes.as_slice(), b"world");
    bytes.pop_back(2);
    assert_eq!(bytes.as_slice(), b"wor");
    bytes.extend(2);
    assert_eq!(bytes.as_slice(), b"wor\0\0");
    bytes.assign(b"xy");
    bytes += &Bytes::from_slice(b"z");
    assert_eq!(bytes, Bytes::from_slice(b"xyz"));
    assert!(Bytes::from_slice(b"ab") < Bytes::from_slice(b"abc"));
    assert_eq!(Bytes::zeroed(3).as_slice(), &[0, 0, 0]);
    bytes.clear();
    assert!(bytes.is_empty());
}

#[test]
fn test_bytes_panics() {
    let message = panic_message(|| {
        let bytes = Bytes::from_slice(b"ab");
        let _ = bytes[2];
    });
    assert_eq!(message, "Index 2 is out of range for size 2!");

    let message = panic_message(|| Bytes::new().pop_back(1));
    assert_eq!(message, OutOfRange { index: 1, size: 0 }.to_string());

    let message = panic_message(|| {
        Bytes::new().front();
    });
    assert_eq!(message, "Buffer is empty!");
}

#[test]
fn test_cstring() {
    let mut text = CString::try_from("\t two words  ").unwrap();
    text.strip();
    assert_eq!(text, "two words");
    assert_eq!(text.size(), 9);
    assert_eq!(text[9], 0, "The terminator is indexable.");
    assert_eq!(text.substr(4, 5), "words");
    assert_eq!(text.split().len(), 2);

    text.append(b'!');
    text += &CString::try_from("?").unwrap();
    assert_eq!(text.c_str().to_bytes(), b"two words!?");
    assert_eq!((text.front(), text.back()), (b't', b'?'));
    assert_eq!(text.to_string(), "two words!?");

    let mut blank = CString::try_from("   ").unwrap();
    blank.strip();
    assert!(blank.is_empty());
    assert_eq!(blank.c_str().to_bytes_with_nul(), b"\0");
}

#[test]
fn test_cstring_errors() {
    assert_eq!(CString::try_from("a\0b"), Err(EmbeddedNul { offset: 1 }));
    assert!(Error::from(EmbeddedNul { offset: 1 }).is_embedded_nul());

    let message = panic_message(|| CString::new().append(0));
    assert_eq!(message, "String contains a zero byte at 0!");

    let message = panic_message(|| {
        CString::try_from("abc").unwrap().substr(2, 5);
    });
    assert_eq!(message, "Index 7 is out of range for size 3!");
}

#[cfg(feature = "v2026")]
#[test]
fn test_interop_with_2026() {
    use crate::v2026::string::U8String;

    let old = Bytes::from_slice("大刀".as_bytes());
    // SAFETY: data() and size() describe old's live contents.
    let new = unsafe { U8String::from_raw_parts(old.data(), old.size()) }.unwrap();
    assert_eq!(new, "大刀");

    // SAFETY: As above, in the other direction.
    let back = unsafe { Bytes::from_raw(new.as_bytes().as_ptr(), new.len()) };
    assert_eq!(back, old);

    let invalid = Bytes::from_slice(b"\xE5\xA4");
    // SAFETY: As above.
    assert!(unsafe { U8String::from_raw_parts(invalid.data(), invalid.size()) }.is_err());
}
