#![cfg(test)]

use proptest::prelude::*;

use super::case::{lowercase, uppercase};
use super::utf8::{self, CharInfo};
use super::*;
use crate::v2026::collections::contiguous::Bytes;
use crate::v2026::collections::hash::HashMap;
use crate::v2026::error::{EmbeddedNul, Error, IndexOutOfBounds, InvalidCodepoint, InvalidUtf8};
use crate::v2026::sum::Optional;

fn u8s(text: &str) -> U8String {
    text.parse().unwrap()
}

#[test]
fn test_validation() {
    assert_eq!(utf8::validate(b""), Ok(()));
    assert_eq!(utf8::validate("aé大😀".as_bytes()), Ok(()));

    let bad: [(&[u8], usize); 8] = [
        (b"\x80", 0),                // Lone continuation byte.
        (b"a\xC3", 1),               // Truncated.
        (b"ab\xE5\xA4x", 2),         // Non-continuation inside a sequence.
        (b"\xC0\xAF", 0),            // Overlong slash.
        (b"\xE0\x80\xAF", 0),        // Overlong, three bytes.
        (b"x\xED\xA0\x80", 1),       // Surrogate.
        (b"\xF4\x90\x80\x80", 0),    // Above U+10FFFF.
        (b"ok\xFF", 2),              // Never a leading byte.
    ];
    for (bytes, offset) in bad {
        assert_eq!(utf8::validate(bytes), Err(InvalidUtf8 { offset }), "{bytes:x?}");
    }
}

#[test]
fn test_decode_encode() {
    assert_eq!(utf8::decode("刀".as_bytes()), Some(CharInfo { codepoint: '刀', len: 3 }));
    assert_eq!(utf8::decode(b""), None);

    let mut buf = [0; 4];
    for c in ['a', 'é', '大', '😀', '\u{10FFFF}'] {
        assert_eq!(utf8::encode(c, &mut buf), c.to_string().as_bytes());
    }
    assert_eq!(utf8::to_char(0xD800), Err(InvalidCodepoint { codepoint: 0xD800 }));
    assert_eq!(utf8::to_char(0x5927), Ok('大'));
}

#[test]
fn test_iterators() {
    let text = u8s("大刀");
    let mut rev = text.chars_rev();
    assert_eq!(rev.next(), Some('\u{5200}'));
    assert_eq!(rev.next(), Some('\u{5927}'));
    assert_eq!(rev.next(), None);
    assert_eq!(rev.next(), None);

    let mut forward = text.chars();
    assert_eq!(forward.peek(), Some('大'));
    assert_eq!(forward.peek(), Some('大'), "Peeking shouldn't advance.");
    assert_eq!(forward.offset(), 0);
    assert_eq!(forward.next(), Some('大'));
    assert_eq!(forward.offset(), 3);
    assert_eq!(forward.next(), Some('刀'));
    assert_eq!(forward.next(), None);

    let mixed = u8s("a😀b");
    assert!(mixed.chars_rev().eq(['b', '😀', 'a']));
}

#[test]
fn test_construction() {
    assert_eq!(
        U8String::from_slice(b"\xE5\xA4"),
        Err(Error::InvalidUtf8(InvalidUtf8 { offset: 0 }))
    );
    assert_eq!(
        U8String::from_slice(b"a\0b"),
        Err(Error::EmbeddedNul(EmbeddedNul { offset: 1 }))
    );
    assert_eq!("a\0".parse::<U8String>(), Err(EmbeddedNul { offset: 1 }));

    let text = U8String::from_bytes(Bytes::from_slice("grüße".as_bytes())).unwrap();
    assert_eq!(text.len(), 7);
    assert_eq!(text.c_str().to_bytes_with_nul(), "grüße\0".as_bytes());

    // SAFETY: The pointer and length describe text's own contents.
    let copied = unsafe { U8String::from_raw_parts(text.as_bytes().as_ptr(), text.len()) };
    let copied = copied.unwrap();
    assert_eq!(copied, text);
    assert!(!copied.contains(text.view()), "A copy doesn't share storage.");
}

#[test]
fn test_substr_and_boundaries() {
    let text = u8s("a大b");
    assert_eq!(text.substr(1, 3).unwrap(), "大");
    assert_eq!(text.substr(0, 2), Err(Error::InvalidUtf8(InvalidUtf8 { offset: 2 })));
    let err = text.substr(4, 2).unwrap_err();
    assert_eq!(err, Error::IndexOutOfBounds(IndexOutOfBounds { index: 6, len: 5 }));
    assert_eq!(err.to_string(), "Index 6 out of bounds for collection with 5 elements!");
}

#[test]
fn test_editing() {
    let mut text = u8s("hello");
    let other = u8s("大 world");
    text.insert(5, other.view()).unwrap();
    assert_eq!(text, "hello大 world");
    assert!(text.insert(6, other.view()).is_err(), "Offset 6 is inside a code point.");

    assert_eq!(text.pop_front(), Optional::Value('h'));
    assert_eq!(text.pop_back(), Optional::Value('d'));
    assert_eq!(text.pop_back(), Optional::Value('l'));
    assert_eq!(text, "ello大 wor");

    text.append_codepoint(0x1F600).unwrap();
    assert!(text.append_codepoint(0x11_0000).is_err());
    assert_eq!(text.push('\0'), Err(EmbeddedNul { offset: text.len() }));
    text += &u8s("!");
    assert_eq!(text, "ello大 wor😀!");

    let mut empty = U8String::new();
    assert_eq!(empty.pop_front(), Optional::Empty);
    assert_eq!(empty.pop_back(), Optional::Empty);
}

#[test]
fn test_views() {
    let text = u8s("one two three");
    let words = text.split(|c| c == ' ').collect::<Vec<_>>();
    assert_eq!(words.len(), 3);
    assert!(text.contains(words[1]));
    assert!(text.overlaps(words[2]));
    assert!(!words[0].overlaps(&words[1]));
    assert!(words[1] == "two");
    assert_eq!(text.range_of(words[1]), Optional::Value(4..7));

    let elsewhere = u8s("two");
    assert!(!text.contains(elsewhere.view()));
    assert_eq!(text.range_of(elsewhere.view()), Optional::Empty);

    let range = text.range_of(words[2]).unwrap();
    let mut text = text.clone();
    text.remove(range).unwrap();
    assert_eq!(text, "one two ");

    let stop = text.view().stop();
    let start = elsewhere.chars();
    assert!(U8StringView::from_range(&start, &stop).is_err());
    assert!(U8StringView::from_range(&stop, &text.chars()).is_err());
}

#[test]
fn test_split_find_join() {
    let text = u8s("  a b\tc\n\n ");
    let pieces = text.split_ascii();
    assert_eq!(pieces.len(), 3);
    assert_eq!(u8s("-").join(pieces.iter()), "a-b-c");
    assert_eq!(u8s(", ").join(&[] as &[U8String]), "");
    assert!(u8s("   ").split_ascii().is_empty());

    let text = u8s("abcabc");
    assert_eq!(text.find("ca"), Optional::Value(2));
    assert_eq!(text.find("x"), Optional::Empty);
    assert!(text.starts_with("ab"));
}

#[test]
fn test_casing() {
    assert!(uppercase('ß').eq(['S', 'S']));
    assert!(lowercase('İ').eq(['i', '\u{307}']));
    assert!(uppercase('ŉ').eq(['ʼ', 'N']));
    assert_eq!(uppercase('ä').as_slice(), &['Ä']);
    assert_eq!(lowercase('Ä').as_slice(), &['ä']);
    assert_eq!(uppercase('大').as_slice(), &['大']);
    assert_eq!(uppercase('q').len(), 1);

    let text = u8s("Straße İstanbul");
    assert_eq!(text.upper(), "STRASSE İSTANBUL");
    assert_eq!(text.lower(), "straße i\u{307}stanbul");
    assert_eq!(text.view().upper(), text.upper());
}

#[test]
fn test_cstring() {
    let mut text = CString::try_from("  some words\there ").unwrap();
    assert_eq!(text.len(), 18);
    text.strip();
    assert_eq!(text, "some words\there");
    assert_eq!(text.split_ascii().len(), 3);
    assert_eq!(text.split_by(b'o').len(), 3);
    assert_eq!(text.rfind(b'e'), Optional::Value(14));
    assert_eq!(text.find(b"word"), Optional::Value(5));

    assert_eq!(text.push(0), Err(EmbeddedNul { offset: 15 }));
    assert_eq!(text.append(b"ab\0"), Err(EmbeddedNul { offset: 17 }));
    assert_eq!(text.len(), 15, "A failed append should change nothing.");
    assert!(text.insert(0, b"\0").is_err());
    text.insert(0, b">").unwrap();
    assert_eq!(text.pop(), Optional::Value(b'e'));
    assert_eq!(text.back(), Ok(b'r'));
    assert_eq!(text.to_ascii_uppercase(), ">SOME WORDS\tHER");
    assert_eq!(text.substr(1, 4).unwrap(), "some");
    assert!(text.substr(10, 10).is_err());
    assert_eq!(text.as_bytes_with_nul().last(), Some(&0));

    let mut blank = CString::try_from(" \t ").unwrap();
    blank.strip();
    assert!(blank.is_empty());
    assert_eq!(blank.pop(), Optional::Empty);
    assert_eq!(blank.c_str().to_bytes(), b"");
}

#[test]
fn test_hash_map_with_str_lookup() {
    let mut counts: HashMap<U8String, usize> = HashMap::new();
    for word in u8s("a b a").split_ascii() {
        *counts.entry_or_default(word) += 1;
    }
    assert_eq!(counts.lookup("a"), Optional::Value(&2));
    assert_eq!(counts.lookup("b"), Optional::Value(&1));
    assert_eq!(counts.lookup("c"), Optional::Empty);
}

proptest! {
    #[test]
    fn prop_round_trip(text in any::<String>()) {
        let clean: String = text.chars().filter(|c| *c != '\0').collect();
        let owned = U8String::from_slice(clean.as_bytes()).unwrap();
        let mut encoded = Vec::new();
        let mut buf = [0; 4];
        for c in owned.chars() {
            encoded.extend_from_slice(utf8::encode(c, &mut buf));
        }
        prop_assert_eq!(&encoded[..], clean.as_bytes());
        let mut reversed: Vec<char> = owned.chars_rev().collect();
        reversed.reverse();
        prop_assert!(reversed.iter().copied().eq(clean.chars()));
    }

    #[test]
    fn prop_validation_agrees_with_std(
        bytes in proptest::collection::vec(any::<u8>(), 0..64)
    ) {
        prop_assert_eq!(utf8::validate(&bytes).is_ok(), std::str::from_utf8(&bytes).is_ok());
        if let Err(err) = std::str::from_utf8(&bytes) {
            let expected = InvalidUtf8 { offset: err.valid_up_to() };
            prop_assert_eq!(utf8::validate(&bytes), Err(expected));
        }
    }
}
