//! Contiguous containers. [`Bytes`] is the raw growable byte buffer, [`Vector`] the generic
//! growable sequence and [`FixedVector`] a bounded sequence stored inline without any heap
//! allocation.

pub mod bytes;
pub mod fixed_vector;
pub mod vector;

#[doc(inline)]
pub use bytes::{Bytes, BytesView};
#[doc(inline)]
pub use fixed_vector::FixedVector;
#[doc(inline)]
pub use vector::Vector;
