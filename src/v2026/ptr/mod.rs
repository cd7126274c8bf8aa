//! Owning containers for a single heap object ([`UniquePtr`]) and for a runtime-sized heap array
//! ([`UniqueArray`]).
//!
//! [`UniqueArray`] is also the allocation primitive underneath the byte buffer, [`Vector`] and the
//! hash tables: every heap block in this epoch is aligned to at least [`MIN_ALIGN`].
//!
//! [`Vector`]: crate::v2026::collections::contiguous::Vector

mod tests;
mod unique_array;
mod unique_ptr;

pub use unique_array::*;
pub use unique_ptr::*;
