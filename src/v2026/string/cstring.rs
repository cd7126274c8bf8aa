use std::ffi::{CStr, c_char};
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{AddAssign, Range};

use crate::v2026::collections::contiguous::{Bytes, Vector};
use crate::v2026::error::{EmbeddedNul, EmptyCollection, Error, IndexOutOfBounds};
use crate::v2026::sum::Optional;
use crate::v2026::util::extension::ResultExtension;

/// A byte string which is always followed by a NUL byte, so that it can be handed to C as is.
///
/// The trailing NUL is not part of the logical contents, and the contents never contain a NUL of
/// their own. No encoding is assumed.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the CString.
/// - `m`: The number of bytes being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`* |
/// | `append` | `O(m)`* |
/// | `insert` | `O(n+m)` |
/// | `c_str` | `O(1)` |
///
/// \* Amortized, see [`Bytes`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CString {
    bytes: Bytes,
}

impl CString {
    /// Creates an empty string, which holds only its terminator.
    pub fn new() -> CString {
        let mut bytes = Bytes::new();
        bytes.push(0);
        CString {
            bytes,
        }
    }

    /// Takes ownership of `bytes` and terminates it.
    ///
    /// # Errors
    /// Returns [`EmbeddedNul`] if `bytes` contains a NUL byte.
    pub fn from_bytes(mut bytes: Bytes) -> Result<CString, EmbeddedNul> {
        check_nul(&bytes)?;
        bytes.push(0);
        Ok(CString {
            bytes,
        })
    }

    /// # Errors
    /// Returns [`EmbeddedNul`] if `bytes` contains a NUL byte.
    pub fn from_slice(bytes: &[u8]) -> Result<CString, EmbeddedNul> {
        check_nul(bytes)?;
        let mut owned = Bytes::with_cap(bytes.len() + 1);
        owned.extend_from_slice(bytes);
        owned.push(0);
        Ok(CString {
            bytes: owned,
        })
    }

    /// The length of the contents, excluding the terminator.
    pub const fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    pub fn c_str(&self) -> &CStr {
        // SAFETY: The buffer ends with the only NUL byte it contains.
        unsafe { CStr::from_bytes_with_nul_unchecked(&self.bytes) }
    }

    pub const fn as_ptr(&self) -> *const c_char {
        self.bytes.as_ptr().cast()
    }

    /// Appends one byte.
    ///
    /// # Errors
    /// Returns [`EmbeddedNul`] if `byte` is NUL.
    pub fn push(&mut self, byte: u8) -> Result<(), EmbeddedNul> {
        if byte == 0 {
            return Err(EmbeddedNul {
                offset: self.len(),
            });
        }
        self.replace_terminator(|bytes| bytes.push(byte));
        Ok(())
    }

    /// Appends `bytes`, leaving the string unchanged on failure.
    ///
    /// # Errors
    /// Returns [`EmbeddedNul`] if `bytes` contains a NUL byte.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), EmbeddedNul> {
        check_nul(bytes).map_err(|err| EmbeddedNul {
            offset: self.len() + err.offset,
        })?;
        self.replace_terminator(|own| own.extend_from_slice(bytes));
        Ok(())
    }

    /// Inserts `bytes` at `offset`, moving the following contents back.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `offset` is past the end of the contents, and
    /// [`EmbeddedNul`] if `bytes` contains a NUL byte.
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<(), Error> {
        self.check_offset(offset)?;
        check_nul(bytes)?;
        self.bytes.insert(offset, bytes)?;
        Ok(())
    }

    /// Removes the contents in `range`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the range ends past the contents or is inverted.
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), IndexOutOfBounds> {
        self.check_offset(range.end)?;
        self.bytes.remove(range)
    }

    /// Removes and returns the last byte of the contents.
    pub fn pop(&mut self) -> Optional<u8> {
        let last = match self.back() {
            Ok(byte) => byte,
            Err(_) => return Optional::Empty,
        };
        self.replace_terminator(|bytes| {
            bytes.pop_back(1).throw();
        });
        Optional::Value(last)
    }

    /// Returns the last byte of the contents.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the string is empty.
    pub fn back(&self) -> Result<u8, EmptyCollection> {
        self.as_bytes().last().copied().ok_or(EmptyCollection)
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.bytes.push(0);
    }

    pub fn reserve(&mut self, extra: usize) {
        self.bytes.reserve(extra);
    }

    /// Copies `len` bytes starting at `offset` into a new string.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the range ends past the contents.
    pub fn substr(&self, offset: usize, len: usize) -> Result<CString, IndexOutOfBounds> {
        let end = offset.saturating_add(len);
        self.check_offset(end)?;
        Ok(CString::from_slice(&self.as_bytes()[offset..end]).throw())
    }

    /// Returns the offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &[u8]) -> Optional<usize> {
        if needle.is_empty() {
            return Optional::Value(0);
        }
        self.as_bytes()
            .windows(needle.len())
            .position(|window| window == needle)
            .into()
    }

    /// Returns the offset of the last occurrence of `byte`.
    pub fn rfind(&self, byte: u8) -> Optional<usize> {
        self.as_bytes().iter().rposition(|b| *b == byte).into()
    }

    /// Removes leading and trailing ASCII whitespace.
    pub fn strip(&mut self) {
        let contents = self.as_bytes();
        let leading = contents.iter().take_while(|b| b.is_ascii_whitespace()).count();
        if leading == contents.len() {
            self.clear();
            return;
        }
        let trailing = contents.iter().rev().take_while(|b| b.is_ascii_whitespace()).count();
        let end = self.len();
        self.remove(end - trailing..end).throw();
        self.remove(0..leading).throw();
    }

    /// Splits the contents into the pieces between runs of ASCII whitespace.
    pub fn split_ascii(&self) -> Vector<CString> {
        self.split_where(|byte| byte.is_ascii_whitespace())
    }

    /// Splits the contents into the pieces between runs of `separator`.
    pub fn split_by(&self, separator: u8) -> Vector<CString> {
        self.split_where(|byte| *byte == separator)
    }

    pub fn to_ascii_uppercase(&self) -> CString {
        self.map_bytes(u8::to_ascii_uppercase)
    }

    pub fn to_ascii_lowercase(&self) -> CString {
        self.map_bytes(u8::to_ascii_lowercase)
    }

    fn split_where<F: FnMut(&u8) -> bool>(&self, mut is_separator: F) -> Vector<CString> {
        self.as_bytes()
            .split(|byte| is_separator(byte))
            .filter(|piece| !piece.is_empty())
            .map(|piece| CString::from_slice(piece).throw())
            .collect()
    }

    fn map_bytes<F: FnMut(&u8) -> u8>(&self, map: F) -> CString {
        let mut bytes: Bytes = self.as_bytes().iter().map(map).collect();
        bytes.push(0);
        CString {
            bytes,
        }
    }

    /// Runs `edit` on the contents with the terminator temporarily removed.
    fn replace_terminator<F: FnOnce(&mut Bytes)>(&mut self, edit: F) {
        self.bytes.pop_back(1).throw();
        edit(&mut self.bytes);
        self.bytes.push(0);
    }

    fn check_offset(&self, offset: usize) -> Result<(), IndexOutOfBounds> {
        if offset > self.len() {
            Err(IndexOutOfBounds {
                index: offset,
                len: self.len(),
            })
        } else {
            Ok(())
        }
    }
}

fn check_nul(bytes: &[u8]) -> Result<(), EmbeddedNul> {
    match bytes.iter().position(|byte| *byte == 0) {
        Some(offset) => Err(EmbeddedNul { offset }),
        None => Ok(()),
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
        CString::from_slice(value.as_bytes())
    }
}

impl TryFrom<Bytes> for CString {
    type Error = EmbeddedNul;

    fn try_from(value: Bytes) -> Result<Self, Self::Error> {
        CString::from_bytes(value)
    }
}

impl From<&CStr> for CString {
    fn from(value: &CStr) -> Self {
        CString {
            bytes: Bytes::from_slice(value.to_bytes_with_nul()),
        }
    }
}

impl PartialEq<[u8]> for CString {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
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

impl AddAssign<&CString> for CString {
    fn add_assign(&mut self, rhs: &CString) {
        self.replace_terminator(|bytes| bytes.extend_from_slice(rhs.as_bytes()));
    }
}

impl Debug for CString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.c_str(), f)
    }
}

/// Bytes which aren't UTF-8 are shown as replacement characters.
impl Display for CString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}
