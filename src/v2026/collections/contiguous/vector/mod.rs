//! A module containing [`Vector`] and its owned iterator [`IntoIter`]. Borrowed iteration uses
//! [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from [`std::slice`], through
//! Vector's [`Deref`](std::ops::Deref) to a slice.

mod iter;
mod tests;
mod vector;

pub use iter::*;
pub use vector::*;
