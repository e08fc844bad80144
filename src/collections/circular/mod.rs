//! A module containing [`CircularDeque`] and associated types.
//!
//! Borrowed iteration is provided by [`Iter`] and [`IterMut`], owned iteration by [`IntoIter`].
//! [`Cursor`] is a detached position that can outlive a borrow of the deque, checking for
//! modifications on every step instead.

mod circular_deque;
mod cursor;
mod iter;
mod tests;

pub use circular_deque::*;
pub use cursor::*;
pub use iter::*;
