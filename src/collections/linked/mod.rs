//! Linked collection types. Revolves around [`LinkedDeque`] and the [`Handle`]s it hands out for
//! `O(1)` access and removal anywhere in the chain.

mod cursor;
mod iter;
mod linked_deque;
mod node;
mod tests;

pub use cursor::*;
pub use iter::*;
pub use linked_deque::*;
pub(crate) use node::*;
