use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str;

use super::U8String;
use super::case::{lowercase, uppercase};
use super::utf8::{Utf8Iter, Utf8RevIter};
use crate::v2026::collections::contiguous::BytesView;
use crate::v2026::error::{Error, IndexOutOfBounds, Unsupported};

/// A borrowed range of a validated UTF-8 string, delimited by two code point positions.
///
/// Like the string it was taken from, a view never contains a NUL byte. Views compare by
/// contents, while [`U8StringView::overlaps`] compares by storage.
#[derive(Clone, Copy, Default)]
pub struct U8StringView<'a> {
    bytes: &'a [u8],
}

impl<'a> U8StringView<'a> {
    /// `bytes` must be valid UTF-8 without NUL bytes.
    pub(crate) const fn from_validated(bytes: &'a [u8]) -> U8StringView<'a> {
        U8StringView {
            bytes,
        }
    }

    /// Creates a view of everything between two positions of the same string.
    ///
    /// # Errors
    /// Returns [`Unsupported`] if the iterators walk different strings, and [`IndexOutOfBounds`]
    /// if `start` lies after `stop`.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::{U8String, U8StringView};
    /// let text: U8String = "grüße".parse().unwrap();
    /// let mut start = text.chars();
    /// start.next();
    /// let mut stop = start.clone();
    /// stop.nth(1);
    /// assert_eq!(U8StringView::from_range(&start, &stop).unwrap(), "rü");
    /// ```
    pub fn from_range(
        start: &Utf8Iter<'a>,
        stop: &Utf8Iter<'a>,
    ) -> Result<U8StringView<'a>, Error> {
        if !start.same_source(stop) {
            return Err(Unsupported {
                reason: "view endpoints belong to different strings",
            }.into());
        }
        if start.offset() > stop.offset() {
            return Err(IndexOutOfBounds {
                index: start.offset(),
                len: stop.offset(),
            }.into());
        }
        Ok(U8StringView::from_validated(&start.source()[start.offset()..stop.offset()]))
    }

    /// The length of the view in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub const fn raw_view(&self) -> BytesView<'a> {
        BytesView::new(self.bytes)
    }

    pub const fn as_str(&self) -> &'a str {
        // SAFETY: Views are only ever created over validated UTF-8.
        unsafe { str::from_utf8_unchecked(self.bytes) }
    }

    /// Returns a position at the first code point of the view.
    pub const fn start(&self) -> Utf8Iter<'a> {
        Utf8Iter::new(self.bytes, 0)
    }

    /// Returns the position just past the last code point of the view.
    pub const fn stop(&self) -> Utf8Iter<'a> {
        Utf8Iter::new(self.bytes, self.bytes.len())
    }

    pub const fn chars(&self) -> Utf8Iter<'a> {
        self.start()
    }

    pub const fn chars_rev(&self) -> Utf8RevIter<'a> {
        Utf8RevIter::new(self.bytes)
    }

    /// Returns true if the two views share at least one byte of storage.
    pub fn overlaps(&self, other: &U8StringView<'_>) -> bool {
        self.raw_view().overlaps(&other.raw_view())
    }

    /// Returns an owned copy of the view with every code point mapped to upper case.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::string::U8String;
    /// let text: U8String = "straße".parse().unwrap();
    /// assert_eq!(text.view().upper(), "STRASSE");
    /// ```
    pub fn upper(&self) -> U8String {
        self.map_case(uppercase)
    }

    pub fn lower(&self) -> U8String {
        self.map_case(lowercase)
    }

    fn map_case<F, I>(&self, map: F) -> U8String
    where
        F: Fn(char) -> I,
        I: IntoIterator<Item = char>,
    {
        let mut result = U8String::new();
        result.reserve(self.len());
        for mapped in self.chars().flat_map(map) {
            result.push_validated(mapped);
        }
        result
    }
}

impl PartialEq for U8StringView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for U8StringView<'_> {}

impl PartialEq<str> for U8StringView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for U8StringView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl Hash for U8StringView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<'a> From<&'a U8String> for U8StringView<'a> {
    fn from(value: &'a U8String) -> Self {
        value.view()
    }
}

impl Debug for U8StringView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for U8StringView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}
