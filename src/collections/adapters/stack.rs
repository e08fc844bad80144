use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::collections::circular::CircularDeque;
use crate::collections::traits::Deque;
use crate::error::EmptyContainer;

/// A last-in, first-out stack, pushing and popping at the back of a [`Deque`].
///
/// # Examples
/// ```
/// # use collections_core::collections::adapters::Stack;
/// let mut stack: Stack<char> = Stack::new();
/// stack.push('a');
/// stack.push('b');
/// assert_eq!(stack.pop(), Ok('b'));
/// assert_eq!(stack.peek(), Ok(&'a'));
/// ```
pub struct Stack<T, D: Deque<T> = CircularDeque<T>> {
    pub(crate) inner: D,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, D: Deque<T> + Default> Stack<T, D> {
    /// Creates a new Stack over an empty deque.
    pub fn new() -> Stack<T, D> {
        Stack::from_deque(D::default())
    }
}

impl<T, D: Deque<T>> Stack<T, D> {
    /// Creates a Stack over an existing deque, whose back is the top of the stack.
    pub fn from_deque(inner: D) -> Stack<T, D> {
        Stack {
            inner,
            _phantom: PhantomData,
        }
    }

    /// Pushes `value` onto the top of the Stack.
    pub fn push(&mut self, value: T) {
        self.inner.push_back(value);
    }

    /// Removes the top element and returns it.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn pop(&mut self) -> Result<T, EmptyContainer> {
        self.inner.pop_back()
    }

    /// Returns a reference to the top element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek(&self) -> Result<&T, EmptyContainer> {
        self.inner.peek_back()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Consumes the Stack, returning the underlying deque.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<T, D: Deque<T> + Default> Default for Stack<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D: Deque<T>> Extend<T> for Stack<T, D> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, D: Deque<T> + Default> FromIterator<T> for Stack<T, D> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack::new();
        stack.extend(iter);
        stack
    }
}

impl<T, D: Deque<T> + Clone> Clone for Stack<T, D> {
    fn clone(&self) -> Self {
        Stack::from_deque(self.inner.clone())
    }
}

impl<T, D: Deque<T> + Debug> Debug for Stack<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("inner", &self.inner).finish()
    }
}
