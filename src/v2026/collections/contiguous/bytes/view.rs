use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::Bytes;

/// A borrowed pointer and length into the storage of some byte container.
///
/// The view can't outlive the container it borrows from, and the container can't be modified
/// while the view exists.
#[derive(Clone, Copy, Default)]
pub struct BytesView<'a> {
    data: &'a [u8],
}

impl<'a> BytesView<'a> {
    pub const fn new(data: &'a [u8]) -> BytesView<'a> {
        BytesView {
            data,
        }
    }

    pub const fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the viewed bytes with the lifetime of the underlying container.
    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns true if the two views share at least one byte of storage.
    pub fn overlaps(&self, other: &BytesView<'_>) -> bool {
        let own = self.data.as_ptr_range();
        let theirs = other.data.as_ptr_range();
        !self.is_empty() && !other.is_empty() && own.start < theirs.end && theirs.start < own.end
    }

    /// Copies the viewed bytes into a new buffer.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from_slice(self.data)
    }
}

impl Deref for BytesView<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a> From<&'a [u8]> for BytesView<'a> {
    fn from(value: &'a [u8]) -> Self {
        BytesView::new(value)
    }
}

impl<'a> From<&'a Bytes> for BytesView<'a> {
    fn from(value: &'a Bytes) -> Self {
        value.view()
    }
}

impl PartialEq for BytesView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for BytesView<'_> {}

impl PartialEq<Bytes> for BytesView<'_> {
    fn eq(&self, other: &Bytes) -> bool {
        self.data == &**other
    }
}

impl PartialEq<BytesView<'_>> for Bytes {
    fn eq(&self, other: &BytesView<'_>) -> bool {
        &**self == other.data
    }
}

impl PartialOrd for BytesView<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BytesView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data.cmp(other.data)
    }
}

impl Hash for BytesView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl Debug for BytesView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BytesView(b\"{}\")", self.data.escape_ascii())
    }
}
