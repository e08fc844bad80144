use crate::error::EmptyContainer;

#[cfg(feature = "circular")]
use crate::collections::circular::CircularDeque;
#[cfg(feature = "linked")]
use crate::collections::linked::LinkedDeque;

/// A collection that can be pushed to and popped from at both ends in `O(1)`.
///
/// Implemented by [`CircularDeque`] and [`LinkedDeque`], and used by the
/// [`Stack`](crate::collections::adapters::Stack) and
/// [`Queue`](crate::collections::adapters::Queue) adapters to work over either one.
pub trait Deque<T> {
    fn push_front(&mut self, value: T);

    fn push_back(&mut self, value: T);

    fn pop_front(&mut self) -> Result<T, EmptyContainer>;

    fn pop_back(&mut self) -> Result<T, EmptyContainer>;

    fn peek_front(&self) -> Result<&T, EmptyContainer>;

    fn peek_back(&self) -> Result<&T, EmptyContainer>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(feature = "circular")]
impl<T> Deque<T> for CircularDeque<T> {
    fn push_front(&mut self, value: T) {
        CircularDeque::push_front(self, value);
    }

    fn push_back(&mut self, value: T) {
        CircularDeque::push_back(self, value);
    }

    fn pop_front(&mut self) -> Result<T, EmptyContainer> {
        CircularDeque::pop_front(self)
    }

    fn pop_back(&mut self) -> Result<T, EmptyContainer> {
        CircularDeque::pop_back(self)
    }

    fn peek_front(&self) -> Result<&T, EmptyContainer> {
        CircularDeque::peek_front(self)
    }

    fn peek_back(&self) -> Result<&T, EmptyContainer> {
        CircularDeque::peek_back(self)
    }

    fn len(&self) -> usize {
        CircularDeque::len(self)
    }

    fn is_empty(&self) -> bool {
        CircularDeque::is_empty(self)
    }
}

#[cfg(feature = "linked")]
impl<T> Deque<T> for LinkedDeque<T> {
    // The Handles are dropped, there's no way to use them through the trait.
    fn push_front(&mut self, value: T) {
        LinkedDeque::push_front(self, value);
    }

    fn push_back(&mut self, value: T) {
        LinkedDeque::push_back(self, value);
    }

    fn pop_front(&mut self) -> Result<T, EmptyContainer> {
        LinkedDeque::pop_front(self)
    }

    fn pop_back(&mut self) -> Result<T, EmptyContainer> {
        LinkedDeque::pop_back(self)
    }

    fn peek_front(&self) -> Result<&T, EmptyContainer> {
        LinkedDeque::peek_front(self)
    }

    fn peek_back(&self) -> Result<&T, EmptyContainer> {
        LinkedDeque::peek_back(self)
    }

    fn len(&self) -> usize {
        LinkedDeque::len(self)
    }

    fn is_empty(&self) -> bool {
        LinkedDeque::is_empty(self)
    }
}
