//! A module containing the arena-backed B-tree: the ordered map [`BTreeMap`], the key-only set
//! [`BTreeSet`] and their in-order iterators.

mod btree_map;
mod btree_set;
mod iter;
mod tests;

pub use btree_map::BTreeMap;
pub use btree_set::*;
pub use iter::*;
