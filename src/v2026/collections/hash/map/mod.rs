//! A module containing [`HashMap`] and its iterators.
//!
//! The iterators provide owned and borrowed access to a map's entries, or to its keys or values
//! alone. There is no iterator with mutable access to keys, because changing a key in place would
//! break the table.
//!
//! [`HashMap`] is also re-exported under the parent module.

mod hash_map;
mod iter;
mod metadata;
mod tests;

pub use hash_map::*;
pub use iter::*;
