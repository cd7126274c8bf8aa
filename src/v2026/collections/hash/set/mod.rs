//! [`HashSet`], a [`HashMap`](super::HashMap) with unit values, and its iterators.
//!
//! Besides owned and borrowed iteration there are lazy iterators for the four set operations,
//! each borrowing both operands. Elements are never handed out mutably, since changing one in
//! place could change its hash.

mod hash_set;
mod iter;
mod tests;

pub use hash_set::*;
pub use iter::*;
