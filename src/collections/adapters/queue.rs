use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::collections::circular::CircularDeque;
use crate::collections::traits::Deque;
use crate::error::EmptyContainer;

/// A first-in, first-out queue, enqueueing at the back of a [`Deque`] and dequeueing from the
/// front.
///
/// # Examples
/// ```
/// # use collections_core::collections::adapters::Queue;
/// # use collections_core::collections::linked::LinkedDeque;
/// let mut queue: Queue<u32, LinkedDeque<u32>> = Queue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
/// assert_eq!(queue.dequeue(), Ok(1));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct Queue<T, D: Deque<T> = CircularDeque<T>> {
    pub(crate) inner: D,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, D: Deque<T> + Default> Queue<T, D> {
    /// Creates a new Queue over an empty deque.
    pub fn new() -> Queue<T, D> {
        Queue::from_deque(D::default())
    }
}

impl<T, D: Deque<T>> Queue<T, D> {
    /// Creates a Queue over an existing deque, whose front is the next element to be dequeued.
    pub fn from_deque(inner: D) -> Queue<T, D> {
        Queue {
            inner,
            _phantom: PhantomData,
        }
    }

    /// Adds `value` to the back of the Queue.
    pub fn enqueue(&mut self, value: T) {
        self.inner.push_back(value);
    }

    /// Removes the element at the front of the Queue and returns it.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn dequeue(&mut self) -> Result<T, EmptyContainer> {
        self.inner.pop_front()
    }

    /// Returns a reference to the element at the front of the Queue.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek(&self) -> Result<&T, EmptyContainer> {
        self.inner.peek_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Consumes the Queue, returning the underlying deque.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<T, D: Deque<T> + Default> Default for Queue<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D: Deque<T>> Extend<T> for Queue<T, D> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T, D: Deque<T> + Default> FromIterator<T> for Queue<T, D> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<T, D: Deque<T> + Clone> Clone for Queue<T, D> {
    fn clone(&self) -> Self {
        Queue::from_deque(self.inner.clone())
    }
}

impl<T, D: Deque<T> + Debug> Debug for Queue<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("inner", &self.inner).finish()
    }
}
