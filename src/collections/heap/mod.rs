//! A module containing [`BinaryHeap`] and the [`Compare`] trait used to order it.

mod binary_heap;
mod compare;
mod iter;

pub use binary_heap::*;
pub use compare::*;
pub use iter::*;
