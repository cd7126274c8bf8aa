//! Free algorithms over slices: searching, partitioning and the sort family.
//!
//! Every algorithm that orders elements comes in two forms, one using [`Ord`] and a `_by` twin
//! taking an `is_less(a, b)` predicate, which must describe a strict weak ordering. An
//! inconsistent predicate never causes undefined behaviour, but the output order is unspecified
//! and an algorithm may panic.
//!
//! | Sort | Stable | Extra memory | Worst case |
//! |-|-|-|-|
//! | [`insertion_sort`] | yes | none | `O(n^2)` |
//! | [`heap_sort`] | no | none | `O(n log n)` |
//! | [`merge_sort`] | yes | `n` elements | `O(n log n)` |
//! | [`introsort`] | no | `O(log n)` stack | `O(n log n)` |
//! | [`sort_relocatable`] | no | none | C library `qsort` |

mod heap;
mod insertion;
mod introsort;
mod merge;
mod relocatable;
mod search;
mod tests;

pub use heap::*;
pub use insertion::*;
pub use introsort::*;
pub use merge::*;
pub use relocatable::*;
pub use search::*;

/// Slices this short are finished with insertion sort by the recursive sorts.
pub const INSERTION_SORT_LIMIT: usize = 16;
