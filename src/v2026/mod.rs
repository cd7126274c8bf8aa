//! The 2026 epoch: the full in-memory core of the library.
//!
//! Layering, leaves first:
//! - [`ptr`]: owning single-object and owning-array containers.
//! - [`sum`]: [`Optional`](sum::Optional), [`Expected`](sum::Expected) and the [`variant!`]
//!   declaration macro.
//! - [`collections`]: byte buffers, vectors, hash tables and ordered trees.
//! - [`string`]: validated UTF-8 and NUL-terminated strings.
//! - [`algorithm`]: searching, partitioning and the sort family.

pub mod algorithm;
pub mod collections;
pub mod error;
pub mod ptr;
pub mod string;
pub mod sum;

pub(crate) mod util;

/// The declaration macro for tagged unions, see [`sum::Variant`].
pub use crate::__v2026_variant as variant;
