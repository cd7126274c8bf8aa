//! The 2025 epoch: a byte buffer and a NUL-terminated string.
//!
//! This epoch is frozen. Its API predates the fallible accessors of [`v2026`](crate::v2026), so
//! most operations panic on misuse, and lengths are reported by `size()`. Data moves between the
//! epochs only as raw pointer/length pairs, taken from [`Bytes::data`] and [`Bytes::size`].
//!
//! # Examples
//! ```
//! # use epoch_std::v2025::Bytes;
//! let mut bytes = Bytes::from_slice(b"abc");
//! bytes.append(b'd');
//! assert_eq!(bytes.size(), 4);
//! assert_eq!(bytes[3], b'd');
//! ```
pub mod bytes;
pub mod cstring;
pub mod error;
mod tests;

#[doc(inline)]
pub use bytes::Bytes;
#[doc(inline)]
pub use cstring::CString;
