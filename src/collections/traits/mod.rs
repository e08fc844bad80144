//! Traits shared between collection types.

pub mod deque;

pub use deque::Deque;
