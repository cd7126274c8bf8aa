//! A module containing [`FixedVector`], a bounded sequence stored entirely inline, and its owned
//! iterator [`IntoIter`].

mod fixed_vector;
mod iter;
mod tests;

pub use fixed_vector::*;
pub use iter::*;
