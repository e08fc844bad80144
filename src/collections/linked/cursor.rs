use super::{Link, LinkedDeque};
use crate::error::{CollectionError, ConcurrentModification, NoCurrentElement};
use crate::util::generation::Generation;

/// A detached, front-to-back position in a [`LinkedDeque`].
///
/// Works like the [`Cursor`](crate::collections::circular::Cursor) of a
/// [`CircularDeque`](crate::collections::circular::CircularDeque): each step fails with
/// [`ConcurrentModification`] if the deque has been modified since the cursor last touched it,
/// except through [`remove_current`](Cursor::remove_current).
///
/// # Examples
/// ```
/// # use collections_core::collections::linked::LinkedDeque;
/// let mut deque: LinkedDeque<_> = "a1b2c3".chars().collect();
/// let mut cursor = deque.cursor();
/// while let Some(c) = cursor.next(&deque).unwrap() {
///     if c.is_ascii_digit() {
///         cursor.remove_current(&mut deque).unwrap();
///     }
/// }
/// assert_eq!(deque.iter().collect::<String>(), "abc");
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    pub(crate) next: Link,
    pub(crate) current: Option<usize>,
    pub(crate) generation: Generation,
    pub(crate) owner: u64,
}

impl<T> LinkedDeque<T> {
    /// Creates a [`Cursor`] positioned before the first element.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            next: self.state.head(),
            current: None,
            generation: self.generation,
            owner: self.id,
        }
    }
}

impl Cursor {
    fn check<T>(&self, deque: &LinkedDeque<T>) -> Result<(), ConcurrentModification> {
        // Clearing gives the deque a new id, so this also catches a cursor from before a clear.
        if self.owner != deque.id {
            return Err(ConcurrentModification {
                expected: self.generation.get(),
                found: deque.generation.get(),
            });
        }
        deque.generation.check(self.generation)
    }

    /// Advances the cursor and returns the next element, or `None` once all elements have been
    /// yielded.
    ///
    /// # Errors
    /// Returns [`ConcurrentModification`] if `deque` has been structurally modified since this
    /// cursor was created or last removed an element.
    pub fn next<'a, T>(
        &mut self,
        deque: &'a LinkedDeque<T>,
    ) -> Result<Option<&'a T>, ConcurrentModification> {
        self.check(deque)?;

        match self.next {
            Some(index) => {
                let node = deque.node(index);
                self.current = Some(index);
                self.next = node.next;
                Ok(Some(&node.value))
            },
            None => Ok(None),
        }
    }

    /// Removes the element most recently returned by [`next`](Cursor::next). The following call
    /// to `next` returns the element after the removed one.
    ///
    /// # Errors
    /// - [`ConcurrentModification`] if `deque` was modified by something other than this cursor.
    /// - [`NoCurrentElement`] if `next` hasn't yielded an element since the cursor was created or
    ///   since the last removal.
    pub fn remove_current<T>(&mut self, deque: &mut LinkedDeque<T>) -> Result<T, CollectionError> {
        self.check(deque)?;
        let index = self.current.take().ok_or(NoCurrentElement)?;

        // The successor is already stored in self.next and isn't affected by the unlink.
        let value = deque.unlink(index);
        self.generation = deque.generation;

        Ok(value)
    }

    /// Moves the cursor back before the first element of `deque`, accepting any modifications
    /// made so far.
    pub fn reset<T>(&mut self, deque: &LinkedDeque<T>) {
        *self = deque.cursor();
    }
}
