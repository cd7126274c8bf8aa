//! Error types for the 2026 epoch.
//!
//! Every failure kind is its own type so that functions can state exactly what they might return.
//! [`Error`] composes them for callers that don't care which one occurred.

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// Indexed access, insertion or removal past the logical length of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Index {index} out of bounds for collection with {len} elements!")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

/// Access to an element of an empty container, or dereferencing an empty owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Attempted to access the contents of an empty container!")]
pub struct EmptyCollection;

/// Bytes which are not well-formed UTF-8, `offset` is the start of the first bad sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid UTF-8 sequence at byte {offset}!")]
pub struct InvalidUtf8 {
    pub offset: usize,
}

/// A NUL byte inside the logical contents of a NUL-terminated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Embedded NUL byte at offset {offset}!")]
pub struct EmbeddedNul {
    pub offset: usize,
}

/// A value that isn't a Unicode scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("{codepoint:#x} is not a valid code point!")]
pub struct InvalidCodepoint {
    pub codepoint: u32,
}

/// Insertion into a bounded container which is already full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Container is full, capacity is {cap}!")]
pub struct CapacityExhausted {
    pub cap: usize,
}

/// Typed access to a variant holding another alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Attempted to access a variant as `{expected}` while it holds `{held}`!")]
pub struct BadVariantAccess {
    pub expected: &'static str,
    pub held: &'static str,
}

/// Lookup of a key that isn't in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Key not present in map!")]
pub struct KeyMissing;

/// An aliasing case the library refuses to handle, such as inserting a buffer into itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Unsupported operation: {reason}")]
pub struct Unsupported {
    pub reason: &'static str,
}

/// A structural invariant of a container that doesn't hold. Returned by the `check_invariants`
/// methods, which exist to be called from tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Internal invariant violated: {reason}")]
pub struct InternalInvariant {
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum Error {
    IndexOutOfBounds(IndexOutOfBounds),
    EmptyCollection(EmptyCollection),
    InvalidUtf8(InvalidUtf8),
    EmbeddedNul(EmbeddedNul),
    InvalidCodepoint(InvalidCodepoint),
    CapacityExhausted(CapacityExhausted),
    BadVariantAccess(BadVariantAccess),
    KeyMissing(KeyMissing),
    Unsupported(Unsupported),
    InternalInvariant(InternalInvariant),
}

/// Logs the broken invariant and aborts the process. Used where continuing would read
/// uninitialized or freed memory.
#[cold]
pub(crate) fn internal_failure(reason: &'static str) -> ! {
    tracing::error!(reason, "internal invariant violated, aborting");
    std::process::abort()
}
