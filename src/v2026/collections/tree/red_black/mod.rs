//! A module containing the arena-backed red-black tree: the ordered map [`RBMap`], the key-only
//! set [`RBTree`] and their in-order iterators.

mod iter;
mod links;
mod rb_map;
mod rb_tree;
mod tests;

pub use iter::{IntoIter, Iter};
pub use rb_map::*;
pub use rb_tree::*;
