//! Containers of the 2026 epoch.
//!
//! - [`contiguous`]: [`Bytes`](contiguous::Bytes), [`Vector`](contiguous::Vector) and the inline
//!   [`FixedVector`](contiguous::FixedVector).
//! - [`hash`]: the open-addressed [`HashMap`](hash::HashMap) and [`HashSet`](hash::HashSet).
//! - [`tree`]: the arena-backed red-black tree and B-tree.

pub mod contiguous;
pub mod hash;
pub mod tree;
