use std::borrow::Borrow;
use std::ffi::CStr;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{AddAssign, Range};
use std::slice;
use std::str::{self, FromStr};

use super::utf8::{self, Utf8Iter, Utf8RevIter, is_ascii_whitespace, is_continuation};
use super::{CString, U8StringView};
use crate::v2026::collections::contiguous::{Bytes, Vector};
use crate::v2026::error::{EmbeddedNul, Error, IndexOutOfBounds, InvalidUtf8};
use crate::v2026::sum::Optional;
use crate::v2026::util::extension::ResultExtension;

/// An owned string of validated UTF-8, stored NUL-terminated.
///
/// Every constructor taking raw bytes validates them, so the contents are always well-formed
/// UTF-8 without a NUL byte and can be read as a [`str`] or handed to C as a [`CStr`]. Offsets
/// are in bytes, and every offset passed in has to fall on a code point boundary.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the U8String.
/// - `m`: The number of bytes being added or searched for.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`* |
/// | `append` | `O(m)`* |
/// | `insert` | `O(n+m)` |
/// | `pop_back` | `O(1)` |
/// | `pop_front` | `O(n)` |
/// | `find` | `O(n*m)` |
///
/// \* Amortized, see [`Bytes`].
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct U8String {
    cstring: CString,
}

impl U8String {
    pub fn new() -> U8String {
        U8String {
            cstring: CString::new(),
        }
    }

    /// Takes ownership of `bytes` after validating them.
    ///
    /// # Errors
    /// Returns [`InvalidUtf8`] for malformed input, and [`EmbeddedNul`] if the input contains a
    /// NUL byte.
    pub fn from_bytes(bytes: Bytes) -> Result<U8String, Error> {
        utf8::validate(&bytes)?;
        Ok(U8String {
            cstring: CString::from_bytes(bytes)?,
        })
    }

    /// # Errors
    /// Returns [`InvalidUtf8`] for malformed input, and [`EmbeddedNul`] if the input contains a
    /// NUL byte.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::U8String;
    /// # use epoch_std::v2026::error::{Error, InvalidUtf8};
    /// assert_eq!(U8String::from_slice("大刀".as_bytes()).unwrap(), "大刀");
    /// assert_eq!(
    ///     U8String::from_slice(b"\xE5\xA4"),
    ///     Err(Error::InvalidUtf8(InvalidUtf8 { offset: 0 }))
    /// );
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<U8String, Error> {
        utf8::validate(bytes)?;
        Ok(U8String {
            cstring: CString::from_slice(bytes)?,
        })
    }

    /// Copies and validates `len` bytes starting at `ptr`. This is the way in for bytes owned by
    /// another epoch of the library.
    ///
    /// # Errors
    /// As [`U8String::from_slice`].
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes, or may be dangling if `len` is 0.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Result<U8String, Error> {
        if len == 0 {
            return Ok(U8String::new());
        }
        // SAFETY: The caller guarantees that ptr is valid for len bytes.
        U8String::from_slice(unsafe { slice::from_raw_parts(ptr, len) })
    }

    /// The length in bytes.
    pub const fn len(&self) -> usize {
        self.cstring.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.cstring.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.cstring.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: The contents are validated on every path that adds bytes.
        unsafe { str::from_utf8_unchecked(self.as_bytes()) }
    }

    pub fn c_str(&self) -> &CStr {
        self.cstring.c_str()
    }

    pub fn view(&self) -> U8StringView<'_> {
        U8StringView::from_validated(self.as_bytes())
    }

    pub fn chars(&self) -> Utf8Iter<'_> {
        Utf8Iter::new(self.as_bytes(), 0)
    }

    /// Iterates over the code points from last to first.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::U8String;
    /// let text: U8String = "大刀".parse().unwrap();
    /// let mut rev = text.chars_rev();
    /// assert_eq!(rev.next(), Some('\u{5200}'));
    /// assert_eq!(rev.next(), Some('\u{5927}'));
    /// assert_eq!(rev.next(), None);
    /// ```
    pub fn chars_rev(&self) -> Utf8RevIter<'_> {
        Utf8RevIter::new(self.as_bytes())
    }

    /// Copies `len` bytes starting at `offset` into a new string.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the range ends past the string, and [`InvalidUtf8`] if
    /// either end splits a code point.
    pub fn substr(&self, offset: usize, len: usize) -> Result<U8String, Error> {
        let end = offset.saturating_add(len);
        self.check_boundary(offset)?;
        self.check_boundary(end)?;
        Ok(U8String {
            cstring: CString::from_slice(&self.as_bytes()[offset..end])?,
        })
    }

    /// Appends a code point.
    ///
    /// # Errors
    /// Returns [`EmbeddedNul`] if `codepoint` is NUL.
    pub fn push(&mut self, codepoint: char) -> Result<(), EmbeddedNul> {
        if codepoint == '\0' {
            return Err(EmbeddedNul {
                offset: self.len(),
            });
        }
        self.push_validated(codepoint);
        Ok(())
    }

    /// Appends a raw code point, encoded as UTF-8.
    ///
    /// # Errors
    /// Returns [`InvalidCodepoint`](crate::v2026::error::InvalidCodepoint) if `codepoint` is a
    /// surrogate or beyond U+10FFFF, and [`EmbeddedNul`] if it is NUL.
    pub fn append_codepoint(&mut self, codepoint: u32) -> Result<(), Error> {
        Ok(self.push(utf8::to_char(codepoint)?)?)
    }

    /// Appends the contents of `view`, which may come from any string.
    pub fn append(&mut self, view: U8StringView<'_>) {
        self.cstring.append(view.as_bytes()).throw();
    }

    /// Inserts the contents of `view` at byte `offset`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `offset` is past the end, and [`InvalidUtf8`] if it splits
    /// a code point.
    pub fn insert(&mut self, offset: usize, view: U8StringView<'_>) -> Result<(), Error> {
        self.check_boundary(offset)?;
        self.cstring.insert(offset, view.as_bytes())
    }

    /// Removes the bytes in `range`. Use [`U8String::range_of`] to remove a view of this string.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the range ends past the string or is inverted, and
    /// [`InvalidUtf8`] if either end splits a code point.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::U8String;
    /// let mut text: U8String = "a 大 b".parse().unwrap();
    /// assert_eq!(text.split_ascii()[1].len(), 3);
    /// text.remove(2..5).unwrap();
    /// assert_eq!(text, "a  b");
    /// assert!(text.remove(0..9).is_err());
    /// ```
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), Error> {
        self.check_boundary(range.start)?;
        self.check_boundary(range.end)?;
        Ok(self.cstring.remove(range)?)
    }

    /// Returns the byte range `view` occupies within this string, or Empty if the view borrows
    /// some other storage.
    pub fn range_of(&self, view: U8StringView<'_>) -> Optional<Range<usize>> {
        if !self.contains(view) {
            return Optional::Empty;
        }
        let start = view.as_bytes().as_ptr() as usize - self.as_bytes().as_ptr() as usize;
        Optional::Value(start..start + view.len())
    }

    /// Removes and returns the first code point.
    pub fn pop_front(&mut self) -> Optional<char> {
        let Some(first) = self.chars().next() else {
            return Optional::Empty;
        };
        self.cstring.remove(0..first.len_utf8()).throw();
        Optional::Value(first)
    }

    /// Removes and returns the last code point.
    pub fn pop_back(&mut self) -> Optional<char> {
        let Some(last) = self.chars_rev().next() else {
            return Optional::Empty;
        };
        let len = self.len();
        self.cstring.remove(len - last.len_utf8()..len).throw();
        Optional::Value(last)
    }

    /// Returns true if `view` lies entirely within this string's storage. Equal contents stored
    /// elsewhere don't count.
    pub fn contains(&self, view: U8StringView<'_>) -> bool {
        let own = self.as_bytes().as_ptr_range();
        let theirs = view.as_bytes().as_ptr_range();
        own.start <= theirs.start && theirs.end <= own.end
    }

    /// Returns true if `view` shares at least one byte of storage with this string.
    pub fn overlaps(&self, view: U8StringView<'_>) -> bool {
        self.view().overlaps(&view)
    }

    /// Returns the byte offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Optional<usize> {
        self.cstring.find(needle.as_bytes())
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_bytes().starts_with(prefix.as_bytes())
    }

    /// Splits the string into the pieces between runs of code points matching `is_split`.
    /// Empty pieces are skipped.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::U8String;
    /// let text: U8String = "a,,b;c".parse().unwrap();
    /// let pieces: Vec<_> = text.split(|c| c == ',' || c == ';').map(|v| v.as_str()).collect();
    /// assert_eq!(pieces, ["a", "b", "c"]);
    /// ```
    pub fn split<F: FnMut(char) -> bool>(&self, is_split: F) -> Split<'_, F> {
        Split {
            rest: self.chars(),
            is_split,
        }
    }

    /// Splits the string at runs of ASCII whitespace into owned pieces.
    pub fn split_ascii(&self) -> Vector<U8String> {
        self.split(is_ascii_whitespace).map(U8String::from).collect()
    }

    /// Concatenates `parts`, placing this string between each neighbouring pair.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::U8String;
    /// let separator: U8String = ", ".parse().unwrap();
    /// let words = ["x", "y", "z"].map(|w| w.parse::<U8String>().unwrap());
    /// assert_eq!(separator.join(&words), "x, y, z");
    /// ```
    pub fn join<'b, I: IntoIterator<Item = &'b U8String>>(&self, parts: I) -> U8String {
        let mut result = U8String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i != 0 {
                result += self;
            }
            result += part;
        }
        result
    }

    pub fn upper(&self) -> U8String {
        self.view().upper()
    }

    pub fn lower(&self) -> U8String {
        self.view().lower()
    }

    pub fn reserve(&mut self, extra: usize) {
        self.cstring.reserve(extra);
    }

    pub fn clear(&mut self) {
        self.cstring.clear();
    }

    /// `codepoint` must not be NUL.
    pub(crate) fn push_validated(&mut self, codepoint: char) {
        let mut buf = [0; 4];
        self.cstring.append(utf8::encode(codepoint, &mut buf)).throw();
    }

    fn check_boundary(&self, offset: usize) -> Result<(), Error> {
        let bytes = self.as_bytes();
        if offset > bytes.len() {
            return Err(IndexOutOfBounds {
                index: offset,
                len: bytes.len(),
            }.into());
        }
        if offset < bytes.len() && is_continuation(bytes[offset]) {
            return Err(InvalidUtf8 { offset }.into());
        }
        Ok(())
    }
}

/// Hashes exactly like the equivalent [`str`], so that maps keyed by U8String can be searched
/// with a `&str`.
impl Hash for U8String {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for U8String {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for U8String {
    type Err = EmbeddedNul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(U8String {
            cstring: CString::try_from(s)?,
        })
    }
}

impl TryFrom<&str> for U8String {
    type Error = EmbeddedNul;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<Bytes> for U8String {
    type Error = Error;

    fn try_from(value: Bytes) -> Result<Self, Self::Error> {
        U8String::from_bytes(value)
    }
}

impl From<U8StringView<'_>> for U8String {
    fn from(value: U8StringView<'_>) -> Self {
        let mut result = U8String::new();
        result.append(value);
        result
    }
}

impl PartialEq<str> for U8String {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for U8String {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl AddAssign<&U8String> for U8String {
    fn add_assign(&mut self, rhs: &U8String) {
        self.cstring += &rhs.cstring;
    }
}

impl AddAssign<U8StringView<'_>> for U8String {
    fn add_assign(&mut self, rhs: U8StringView<'_>) {
        self.append(rhs);
    }
}

impl<'a> IntoIterator for &'a U8String {
    type Item = char;

    type IntoIter = Utf8Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars()
    }
}

impl Debug for U8String {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for U8String {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}

/// An iterator over the pieces of a [`U8String`] between separator code points, see
/// [`U8String::split`].
pub struct Split<'a, F> {
    rest: Utf8Iter<'a>,
    is_split: F,
}

impl<'a, F: FnMut(char) -> bool> Iterator for Split<'a, F> {
    type Item = U8StringView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.rest.peek().is_some_and(&mut self.is_split) {
            self.rest.next();
        }
        self.rest.peek()?;
        let start = self.rest.offset();
        while self.rest.peek().is_some_and(|c| !(self.is_split)(c)) {
            self.rest.next();
        }
        let bytes = &self.rest.source()[start..self.rest.offset()];
        Some(U8StringView::from_validated(bytes))
    }
}

impl<F: FnMut(char) -> bool> FusedIterator for Split<'_, F> {}
