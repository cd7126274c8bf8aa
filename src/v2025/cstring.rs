use std::ffi::CStr;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{AddAssign, Index};

use super::Bytes;
use super::error::{EmbeddedNul, EmptyBuffer, OutOfRange};

/// A string of bytes that always ends with a zero terminator, and holds no other zero byte.
///
/// # Examples
/// ```
/// # use epoch_std::v2025::CString;
/// let mut text = CString::try_from("  padded ").unwrap();
/// text.strip();
/// assert_eq!(text, "padded");
/// assert_eq!(text.c_str().to_bytes_with_nul(), b"padded\0");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CString {
    bytes: Bytes,
}

impl CString {
    pub fn new() -> CString {
        let mut bytes = Bytes::new();
        bytes.append(0);
        CString { bytes }
    }

    /// Takes ownership of `bytes`, appending the terminator.
    ///
    /// # Errors
    /// Returns [`EmbeddedNul`] if `bytes` contains a zero byte.
    pub fn from_bytes(mut bytes: Bytes) -> Result<CString, EmbeddedNul> {
        if let Some(offset) = bytes.as_slice().iter().position(|byte| *byte == 0) {
            return Err(EmbeddedNul { offset });
        }
        bytes.append(0);
        Ok(CString { bytes })
    }

    pub fn c_str(&self) -> &CStr {
        // SAFETY: The bytes end with the only zero byte they contain.
        unsafe { CStr::from_bytes_with_nul_unchecked(self.bytes.as_slice()) }
    }

    /// Returns a pointer to the first byte of the terminated string.
    pub const fn data(&self) -> *const u8 {
        self.bytes.data()
    }

    /// The length without the terminator.
    pub const fn size(&self) -> usize {
        self.bytes.size() - 1
    }

    pub const fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes.as_slice()[..self.size()]
    }

    /// Appends one byte.
    ///
    /// # Panics
    /// Panics if `byte` is zero.
    pub fn append(&mut self, byte: u8) {
        if byte == 0 {
            panic!("{}", EmbeddedNul {
                offset: self.size(),
            });
        }
        self.bytes.pop_back(1);
        self.bytes.append(byte);
        self.bytes.append(0);
    }

    /// Removes ASCII whitespace from both ends.
    pub fn strip(&mut self) {
        let contents = self.as_bytes();
        let start = contents.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let trailing = contents.iter().rev().take_while(|b| b.is_ascii_whitespace()).count();
        let end = contents.len() - trailing;
        if start >= end {
            self.bytes.assign(&[0]);
            return;
        }
        self.bytes.pop_back(self.bytes.size() - end);
        self.bytes.append(0);
        self.bytes.pop_front(start);
    }

    /// # Panics
    /// Panics if the range runs past the end of the string.
    pub fn substr(&self, offset: usize, length: usize) -> CString {
        let end = offset.saturating_add(length);
        if end > self.size() {
            panic!("{}", OutOfRange {
                index: end,
                size: self.size(),
            });
        }
        let mut bytes = Bytes::from_slice(&self.as_bytes()[offset..end]);
        bytes.append(0);
        CString { bytes }
    }

    /// Splits at runs of ASCII whitespace, skipping empty pieces.
    pub fn split(&self) -> Vec<CString> {
        self.as_bytes()
            .split(u8::is_ascii_whitespace)
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let mut bytes = Bytes::from_slice(piece);
                bytes.append(0);
                CString { bytes }
            })
            .collect()
    }

    /// # Panics
    /// Panics if the string is empty.
    pub fn front(&self) -> u8 {
        match self.as_bytes().first() {
            Some(byte) => *byte,
            None => panic!("{}", EmptyBuffer),
        }
    }

    /// # Panics
    /// Panics if the string is empty.
    pub fn back(&self) -> u8 {
        match self.as_bytes().last() {
            Some(byte) => *byte,
            None => panic!("{}", EmptyBuffer),
        }
    }
}

impl Default for CString {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for CString {
    type Error = EmbeddedNul;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        CString::from_bytes(Bytes::from_slice(value.as_bytes()))
    }
}

impl Index<usize> for CString {
    type Output = u8;

    /// Indexing the terminator is allowed and yields zero.
    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl AddAssign<&CString> for CString {
    fn add_assign(&mut self, other: &CString) {
        self.bytes.pop_back(1);
        self.bytes += &other.bytes;
    }
}

impl PartialEq<str> for CString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for CString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Debug for CString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.c_str(), f)
    }
}

impl Display for CString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}
