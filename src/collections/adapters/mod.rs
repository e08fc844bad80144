//! Adapters that restrict a [`Deque`](super::traits::Deque) to a single access discipline.
//!
//! Both adapters default to a [`CircularDeque`](super::circular::CircularDeque), but accept any
//! other deque, such as a [`LinkedDeque`](super::linked::LinkedDeque).

mod queue;
mod stack;
mod tests;

pub use queue::*;
pub use stack::*;
