#![cfg(test)]

use std::mem;
use std::ptr::NonNull;

use super::*;
use crate::v2026::error::BadVariantAccess;
use crate::v2026::util::panic::assert_panics;

crate::v2026::variant! {
    #[derive(Debug, Clone, PartialEq)]
    enum NumOrText {
        Num(i32),
        Text(std::string::String),
    }
}

#[derive(Debug, Default, PartialEq)]
struct FailingClone(u8);

impl Clone for FailingClone {
    fn clone(&self) -> Self {
        panic!("clone failed")
    }
}

crate::v2026::variant! {
    #[derive(Debug, Clone, PartialEq)]
    enum Fragile {
        Solid(u8),
        Brittle(FailingClone),
    }
}

#[test]
fn test_optional_pointer_size() {
    assert_eq!(
        size_of::<Optional<&u64>>(), size_of::<&u64>(),
        "An Optional reference should be a single pointer."
    );
    assert_eq!(
        size_of::<Optional<NonNull<[u8; 64]>>>(), size_of::<*mut [u8; 64]>(),
        "An Optional non-null pointer should be a single pointer."
    );
    assert_eq!(
        size_of::<Optional<Box<String>>>(), size_of::<Box<String>>(),
        "An Optional box should be a single pointer."
    );
}

#[test]
fn test_optional_null_is_empty() {
    let empty = Optional::<NonNull<u8>>::from_raw(std::ptr::null_mut());
    assert!(empty.is_empty(), "A null pointer should produce an empty Optional.");
    assert!(empty.as_ptr().is_null());

    let mut byte = 7_u8;
    let full = Optional::from_raw(&mut byte as *mut u8);
    assert!(full.has_value());
    assert_eq!(full.as_ptr(), &mut byte as *mut u8);
}

#[test]
fn test_optional_access() {
    let mut opt = Optional::new(3);
    assert_eq!(*opt, 3, "Deref should yield the held value.");
    *opt += 1;
    assert_eq!(opt.get(), Ok(&4));

    opt.reset();
    assert!(opt.get().is_err(), "A reset Optional should be empty.");
    assert_panics!({
        let _ = *opt;
    });

    assert_eq!(*opt.insert(9), 9);
    assert_eq!(opt.replace(10), Optional::Value(9));
    assert_eq!(opt.take(), Optional::Value(10));
    assert_eq!(opt, Optional::Empty);
    assert_eq!(Option::from(Optional::new("x")), Some("x"));
    assert_eq!(Optional::<u8>::from(None::<u8>), Optional::Empty);
}

#[test]
fn test_expected_sides() {
    let good: Expected<u32, &str> = Expected::Value(4);
    assert!(good.has_value() && !good.has_error());
    assert_eq!(*good.value(), 4);
    assert_panics!({
        let _ = good.error();
    }, "Reading the error of a value should panic.");

    let bad: Expected<u32, &str> = Unexpected("nope").into();
    assert!(bad.has_error());
    assert_eq!(*bad.error(), "nope");
    assert_panics!({
        let _ = bad.value();
    }, "Reading the value of an error should panic.");

    assert_eq!(bad.ok(), Optional::Empty);
    assert_eq!(Result::from(good.map(|v| v * 2)), Ok(8));
}

#[test]
fn test_expected_moves() {
    let mut first: Expected<String, i32> = Expected::Value(String::from("moved"));
    let second = mem::replace(&mut first, Unexpected(1).into());
    assert_eq!(second.into_value(), "moved");
    assert_eq!(first.into_error(), 1);
}

#[test]
fn test_variant_default_and_index() {
    let value = NumOrText::default();
    assert_eq!(value, NumOrText::Num(0), "Default should hold the first alternative.");
    assert_eq!(value.index(), 0);
    assert_eq!(NumOrText::ALTERNATIVES, 2);
    assert_eq!(<NumOrText as Alternative<String>>::INDEX, 1);
}

#[test]
fn test_variant_checked_access() {
    let mut value = NumOrText::from(String::from("bob"));
    assert!(value.contains::<String>());
    assert!(!value.contains::<i32>());
    assert_eq!(value.get::<String>().map(String::as_str), Ok("bob"));

    let error = value.get::<i32>().expect_err("Holding a String, not an i32.");
    assert_eq!(
        error,
        BadVariantAccess {
            expected: "i32",
            held: std::any::type_name::<String>(),
        }
    );

    value.get_mut::<String>().expect("Holds a String.").push('!');
    // SAFETY: value holds a String.
    assert_eq!(unsafe { value.get_unchecked::<String>() }, "bob!");

    *value.insert(5_i32) += 1;
    assert_eq!(value, NumOrText::Num(6));
    assert_eq!(<NumOrText as Alternative<i32>>::into_alt(value), Ok(6));
}

#[test]
fn test_variant_equality() {
    assert_eq!(NumOrText::Num(1), NumOrText::Num(1));
    assert_ne!(NumOrText::Num(1), NumOrText::Num(2));
    assert_ne!(
        NumOrText::Num(1),
        NumOrText::Text(String::from("1")),
        "Variants holding different alternatives are never equal."
    );
}

#[test]
fn test_variant_assign_strong_guarantee() {
    let mut target = Fragile::Solid(42);
    let source = Fragile::Brittle(FailingClone(1));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        target.assign_from(&source);
    }));
    assert!(result.is_err(), "The clone should have panicked.");
    assert_eq!(
        target,
        Fragile::Solid(42),
        "A failed copy assignment should leave the previous value in place."
    );

    let mut other = Fragile::Brittle(FailingClone(0));
    other.assign_from(&Fragile::Solid(3));
    assert_eq!(other, Fragile::Solid(3));
}

#[test]
fn test_variant_drops_live_alternative() {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::v2026::util::testing::CountedDrop;

    crate::v2026::variant! {
        enum Dropper {
            Plain(u8),
            Counted(CountedDrop),
        }
    }

    let drops = Rc::new(Cell::new(0));
    let mut value = Dropper::from(CountedDrop::new(&drops));
    value.insert(1_u8);
    assert_eq!(drops.get(), 1, "Inserting should destroy the previous alternative.");

    value.insert(CountedDrop::new(&drops));
    drop(value);
    assert_eq!(drops.get(), 2, "Dropping should destroy the live alternative.");
}
