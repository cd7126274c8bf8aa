//! Errors of the 2025 epoch. Most of them are only ever seen as panic messages.

use derive_more::{Display, Error, From, IsVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Index {index} is out of range for size {size}!")]
pub struct OutOfRange {
    pub index: usize,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Buffer is empty!")]
pub struct EmptyBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("String contains a zero byte at {offset}!")]
pub struct EmbeddedNul {
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, IsVariant)]
pub enum Error {
    OutOfRange(OutOfRange),
    EmptyBuffer(EmptyBuffer),
    EmbeddedNul(EmbeddedNul),
}
