//! The raw growable byte buffer [`Bytes`] and its borrowed counterpart [`BytesView`].
//!
//! Bytes is the storage underneath the string types of this epoch. It is also the interop surface
//! between epochs: [`Bytes::from_raw_parts`] accepts the pointer and length exposed by any other
//! byte container.

mod bytes;
mod tests;
mod view;

pub use bytes::*;
pub use view::*;
