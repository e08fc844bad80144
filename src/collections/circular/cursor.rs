use super::CircularDeque;
use crate::error::{CollectionError, ConcurrentModification, NoCurrentElement};
use crate::util::generation::Generation;

/// A detached, front-to-back position in a [`CircularDeque`].
///
/// Unlike [`Iter`](super::Iter), a Cursor doesn't borrow the deque between steps, so the deque can
/// be passed around (or mutated) while iteration is paused. Each step checks that the deque hasn't
/// been structurally modified since the cursor last touched it, failing with
/// [`ConcurrentModification`] otherwise. Removing elements during iteration is supported through
/// [`remove_current`](Cursor::remove_current), which keeps the cursor in sync.
///
/// A Cursor only works with the deque that created it. Passing any other deque, including a clone
/// of the original, fails with [`ConcurrentModification`].
///
/// # Examples
/// ```
/// # use collections_core::collections::circular::CircularDeque;
/// let mut deque: CircularDeque<_> = (0..8).collect();
/// let mut cursor = deque.cursor();
/// while let Some(value) = cursor.next(&deque).unwrap() {
///     if value % 2 == 1 {
///         cursor.remove_current(&mut deque).unwrap();
///     }
/// }
/// assert!(deque.iter().eq(&[0, 2, 4, 6]));
///
/// // Anything else that modifies the deque invalidates the cursor.
/// let mut cursor = deque.cursor();
/// deque.push_back(8);
/// assert!(cursor.next(&deque).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    pub(crate) next: usize,
    pub(crate) current: Option<usize>,
    pub(crate) generation: Generation,
    pub(crate) owner: u64,
}

impl<T> CircularDeque<T> {
    /// Creates a [`Cursor`] positioned before the first element.
    pub const fn cursor(&self) -> Cursor {
        Cursor {
            next: 0,
            current: None,
            generation: self.generation,
            owner: self.id,
        }
    }
}

impl Cursor {
    fn check<T>(&self, deque: &CircularDeque<T>) -> Result<(), ConcurrentModification> {
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
        deque: &'a CircularDeque<T>,
    ) -> Result<Option<&'a T>, ConcurrentModification> {
        self.check(deque)?;

        match deque.get(self.next) {
            Ok(value) => {
                self.current = Some(self.next);
                self.next += 1;
                Ok(Some(value))
            },
            Err(_) => Ok(None),
        }
    }

    /// Removes the element most recently returned by [`next`](Cursor::next). The following call
    /// to `next` returns the element after the removed one.
    ///
    /// # Errors
    /// - [`ConcurrentModification`] if `deque` was modified by something other than this cursor.
    /// - [`NoCurrentElement`] if `next` hasn't yielded an element since the cursor was created or
    ///   since the last removal.
    pub fn remove_current<T>(&mut self, deque: &mut CircularDeque<T>) -> Result<T, CollectionError> {
        self.check(deque)?;
        let index = self.current.take().ok_or(NoCurrentElement)?;

        let value = deque.remove_at(index)?;
        self.next = index;
        self.generation = deque.generation;

        Ok(value)
    }

    /// Moves the cursor back before the first element of `deque`, accepting any modifications
    /// made so far.
    pub fn reset<T>(&mut self, deque: &CircularDeque<T>) {
        *self = deque.cursor();
    }
}
