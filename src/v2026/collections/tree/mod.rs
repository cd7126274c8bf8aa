//! Ordered containers built on index-linked arenas rather than pointers.
//!
//! - [`red_black`]: [`RBMap`] and the key-only [`RBTree`].
//! - [`btree`]: [`BTreeMap`] and the key-only [`BTreeSet`], with a compile-time branching factor.

pub mod btree;
pub mod red_black;

#[doc(inline)]
pub use btree::{BTreeMap, BTreeSet};
#[doc(inline)]
pub use red_black::{RBMap, RBTree};
