use std::iter::FusedIterator;

use crate::v2026::error::{InvalidCodepoint, InvalidUtf8, internal_failure};

const CONTINUATION_MASK: u8 = 0b1100_0000;
const CONTINUATION_TAG: u8 = 0b1000_0000;
const CONTINUATION_DATA_BITS: u32 = 6;

/// The smallest code point that needs a sequence of the indexed length, anything below is an
/// overlong encoding.
const MIN_FOR_LEN: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

/// A decoded code point together with the length of its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    pub codepoint: char,
    pub len: usize,
}

/// Returns true for bytes of the form `0b10xxxxxx`, which never start a sequence.
pub const fn is_continuation(byte: u8) -> bool {
    byte & CONTINUATION_MASK == CONTINUATION_TAG
}

pub const fn is_ascii_whitespace(codepoint: char) -> bool {
    matches!(codepoint, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Splits a leading byte into its payload bits and the length of the sequence it starts.
const fn classify(lead: u8) -> Option<(u32, usize)> {
    if lead < 0x80 {
        Some((lead as u32, 1))
    } else if lead & 0b1110_0000 == 0b1100_0000 {
        Some(((lead & 0b0001_1111) as u32, 2))
    } else if lead & 0b1111_0000 == 0b1110_0000 {
        Some(((lead & 0b0000_1111) as u32, 3))
    } else if lead & 0b1111_1000 == 0b1111_0000 {
        Some(((lead & 0b0000_0111) as u32, 4))
    } else {
        None
    }
}

/// Decodes the sequence at the start of `bytes`, or returns [`None`] if it is malformed,
/// truncated, overlong, a surrogate or beyond U+10FFFF.
pub fn decode(bytes: &[u8]) -> Option<CharInfo> {
    let (mut value, len) = classify(*bytes.first()?)?;
    if bytes.len() < len {
        return None;
    }
    for byte in &bytes[1..len] {
        if !is_continuation(*byte) {
            return None;
        }
        value = (value << CONTINUATION_DATA_BITS) | (byte & !CONTINUATION_MASK) as u32;
    }
    if value < MIN_FOR_LEN[len] {
        return None;
    }
    Some(CharInfo {
        codepoint: char::from_u32(value)?,
        len,
    })
}

/// Decodes bytes which have already passed [`validate`].
fn decode_validated(bytes: &[u8]) -> CharInfo {
    match decode(bytes) {
        Some(info) => info,
        None => internal_failure("decoding bytes which were never validated as UTF-8"),
    }
}

/// Checks that all of `bytes` is well-formed UTF-8.
///
/// # Errors
/// Returns [`InvalidUtf8`] with the offset of the first sequence that doesn't decode.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::string::utf8::validate;
/// assert!(validate("大刀".as_bytes()).is_ok());
/// assert_eq!(validate(b"ok\xC0\xAF").unwrap_err().offset, 2);
/// ```
pub fn validate(bytes: &[u8]) -> Result<(), InvalidUtf8> {
    let mut offset = 0;
    while offset < bytes.len() {
        match decode(&bytes[offset..]) {
            Some(info) => offset += info.len,
            None => return Err(InvalidUtf8 { offset }),
        }
    }
    Ok(())
}

/// Writes the encoding of `codepoint` to the start of `buf` and returns the written part.
pub fn encode(codepoint: char, buf: &mut [u8; 4]) -> &[u8] {
    let value = codepoint as u32;
    let len = match value {
        0..0x80 => {
            buf[0] = value as u8;
            1
        },
        0x80..0x800 => {
            buf[0] = 0xC0 | (value >> 6 & 0x1F) as u8;
            buf[1] = 0x80 | (value & 0x3F) as u8;
            2
        },
        0x800..0x1_0000 => {
            buf[0] = 0xE0 | (value >> 12 & 0x0F) as u8;
            buf[1] = 0x80 | (value >> 6 & 0x3F) as u8;
            buf[2] = 0x80 | (value & 0x3F) as u8;
            3
        },
        _ => {
            buf[0] = 0xF0 | (value >> 18 & 0x07) as u8;
            buf[1] = 0x80 | (value >> 12 & 0x3F) as u8;
            buf[2] = 0x80 | (value >> 6 & 0x3F) as u8;
            buf[3] = 0x80 | (value & 0x3F) as u8;
            4
        },
    };
    &buf[..len]
}

/// Converts a raw code point, rejecting surrogates and values beyond U+10FFFF.
///
/// # Errors
/// Returns [`InvalidCodepoint`] if `codepoint` isn't a Unicode scalar value.
pub fn to_char(codepoint: u32) -> Result<char, InvalidCodepoint> {
    char::from_u32(codepoint).ok_or(InvalidCodepoint { codepoint })
}

/// A forward iterator over the code points of validated UTF-8.
///
/// The code point at the current position is decoded on first access and cached until the
/// iterator advances past it. The iterator also serves as a position: [`Utf8Iter::offset`] is the
/// byte offset of the next code point.
#[derive(Debug, Clone)]
pub struct Utf8Iter<'a> {
    bytes: &'a [u8],
    offset: usize,
    cached: Option<CharInfo>,
}

impl<'a> Utf8Iter<'a> {
    /// `bytes` must be valid UTF-8 and `offset` must be on a code point boundary.
    pub(crate) const fn new(bytes: &'a [u8], offset: usize) -> Utf8Iter<'a> {
        Utf8Iter {
            bytes,
            offset,
            cached: None,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the whole buffer being iterated, not only the remainder.
    pub const fn source(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns true if both iterators walk the same buffer, so that their offsets are comparable.
    pub fn same_source(&self, other: &Utf8Iter<'_>) -> bool {
        self.bytes.as_ptr_range() == other.bytes.as_ptr_range()
    }

    /// Returns the next code point without advancing.
    pub fn peek(&mut self) -> Option<char> {
        self.char_info().map(|info| info.codepoint)
    }

    fn char_info(&mut self) -> Option<CharInfo> {
        if self.cached.is_none() && self.offset < self.bytes.len() {
            self.cached = Some(decode_validated(&self.bytes[self.offset..]));
        }
        self.cached
    }
}

impl Iterator for Utf8Iter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let info = self.char_info()?;
        self.offset += info.len;
        self.cached = None;
        Some(info.codepoint)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.offset;
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl FusedIterator for Utf8Iter<'_> {}

/// A reverse iterator over the code points of validated UTF-8. Each step skips backwards over
/// continuation bytes to the start of the previous sequence, then decodes forwards from there.
#[derive(Debug, Clone)]
pub struct Utf8RevIter<'a> {
    bytes: &'a [u8],
    end: usize,
}

impl<'a> Utf8RevIter<'a> {
    /// `bytes` must be valid UTF-8.
    pub(crate) const fn new(bytes: &'a [u8]) -> Utf8RevIter<'a> {
        Utf8RevIter {
            bytes,
            end: bytes.len(),
        }
    }

    /// The byte offset just past the next code point to be yielded.
    pub const fn offset(&self) -> usize {
        self.end
    }
}

impl Iterator for Utf8RevIter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end == 0 {
            return None;
        }
        let mut start = self.end - 1;
        while start > 0 && is_continuation(self.bytes[start]) {
            start -= 1;
        }
        let info = decode_validated(&self.bytes[start..self.end]);
        self.end = start;
        Some(info.codepoint)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.end.div_ceil(4), Some(self.end))
    }
}

impl FusedIterator for Utf8RevIter<'_> {}
