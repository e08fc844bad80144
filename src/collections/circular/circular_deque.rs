use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr;
use std::slice;

use tracing::trace;

use super::{Iter, IterMut};
use crate::collections::contiguous::buffer::RawBuffer;
use crate::error::{CapacityOverflow, EmptyContainer, IndexOutOfRange};
use crate::util::generation::{Generation, next_owner_id};
use crate::util::result::ResultExtension;

/// The smallest capacity a CircularDeque will grow to.
const MIN_GROW_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// A double-ended queue stored in a ring buffer.
///
/// Elements occupy the `len` slots starting at `head`, wrapping around to the start of the buffer
/// once they reach the end. Both ends can be pushed to and popped from in `O(1)`. When a push finds
/// the buffer full, it is reallocated at double the capacity (and at least 8) with the elements
/// copied to the start of the new buffer in logical order. The capacity never shrinks.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the CircularDeque.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `get` | `O(1)` |
/// | `peek_front/back` | `O(1)` |
/// | `push_front/back` | `O(1)`*, `O(n)` |
/// | `pop_front/back` | `O(1)` |
/// | `remove_at` | `O(min(i, n-i))` |
///
/// \* If the CircularDeque is full, a push will take `O(n)` to reallocate.
///
/// # Iteration
/// [`iter`](CircularDeque::iter) borrows the deque, so it can't be modified while the iterator is
/// alive:
/// ```compile_fail
/// # use collections_core::collections::circular::CircularDeque;
/// let mut deque: CircularDeque<_> = (0..4).collect();
/// for value in deque.iter() {
///     deque.push_back(*value);
/// }
/// ```
/// A [`Cursor`](super::Cursor) remembers its position without borrowing, and fails with
/// [`ConcurrentModification`](crate::error::ConcurrentModification) if it is used after a
/// modification it didn't make itself.
pub struct CircularDeque<T> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) head: usize,
    pub(crate) len: usize,
    pub(crate) id: u64,
    pub(crate) generation: Generation,
}

impl<T> CircularDeque<T> {
    /// Creates a new CircularDeque with capacity 0. The first push allocates room for 8 elements.
    pub fn new() -> CircularDeque<T> {
        CircularDeque {
            buf: RawBuffer::new(),
            head: 0,
            len: 0,
            id: next_owner_id(),
            generation: Generation::new(),
        }
    }

    /// Creates a new CircularDeque with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::circular::CircularDeque;
    /// let mut deque = CircularDeque::with_cap(4);
    /// for i in 1..=4 {
    ///     deque.push_back(i);
    /// }
    /// assert_eq!(deque.capacity(), 4);
    ///
    /// deque.push_back(5);
    /// assert_eq!(deque.capacity(), 8);
    /// assert!(deque.iter().eq(&[1, 2, 3, 4, 5]));
    /// ```
    pub fn with_cap(cap: usize) -> CircularDeque<T> {
        CircularDeque {
            buf: RawBuffer::with_cap(cap),
            head: 0,
            len: 0,
            id: next_owner_id(),
            generation: Generation::new(),
        }
    }

    /// Returns the number of elements in the CircularDeque.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the CircularDeque contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the CircularDeque can hold without reallocating.
    pub const fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Adds the provided element to the front of the CircularDeque, growing if it is full.
    ///
    /// # Panics
    /// Panics if the memory layout of the CircularDeque would have a size that exceeds
    /// [`isize::MAX`].
    pub fn push_front(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }

        self.head = self.wrap_sub(self.head, 1);
        // SAFETY: The deque isn't full, so the slot before the old head is free.
        unsafe { self.buf.write(self.head, value); }
        self.len += 1;
        self.generation.bump();
    }

    /// Adds the provided element to the back of the CircularDeque, growing if it is full.
    ///
    /// # Panics
    /// Panics if the memory layout of the CircularDeque would have a size that exceeds
    /// [`isize::MAX`].
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }

        let tail = self.physical(self.len);
        // SAFETY: The deque isn't full, so the slot after the last element is free.
        unsafe { self.buf.write(tail, value); }
        self.len += 1;
        self.generation.bump();
    }

    /// Removes the first element and returns it.
    ///
    /// The vacated slot isn't cleared, it is simply no longer considered part of the deque.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn pop_front(&mut self) -> Result<T, EmptyContainer> {
        if self.len == 0 {
            return Err(EmptyContainer);
        }

        // SAFETY: The deque isn't empty, so head is initialized. It is excluded from the deque
        // immediately after reading.
        let value = unsafe { self.buf.read(self.head) };
        self.head = self.physical(1);
        self.len -= 1;
        self.generation.bump();

        Ok(value)
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn pop_back(&mut self) -> Result<T, EmptyContainer> {
        if self.len == 0 {
            return Err(EmptyContainer);
        }

        self.len -= 1;
        // SAFETY: The slot at the old last index is initialized and now outside of the deque.
        let value = unsafe { self.buf.read(self.physical(self.len)) };
        self.generation.bump();

        Ok(value)
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_front(&self) -> Result<&T, EmptyContainer> {
        self.get(0).map_err(|_| EmptyContainer)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_front_mut(&mut self) -> Result<&mut T, EmptyContainer> {
        self.get_mut(0).map_err(|_| EmptyContainer)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_back(&self) -> Result<&T, EmptyContainer> {
        match self.len.checked_sub(1) {
            Some(last) => self.get(last).map_err(|_| EmptyContainer),
            None => Err(EmptyContainer),
        }
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_back_mut(&mut self) -> Result<&mut T, EmptyContainer> {
        match self.len.checked_sub(1) {
            Some(last) => self.get_mut(last).map_err(|_| EmptyContainer),
            None => Err(EmptyContainer),
        }
    }

    /// Returns a reference to the element at the provided logical `index`, where 0 is the front.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.check_index(index)?;
        // SAFETY: index < len, so the physical slot is initialized.
        Ok(unsafe { self.buf.get(self.physical(index)) })
    }

    /// Returns a mutable reference to the element at the provided logical `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
        self.check_index(index)?;
        let slot = self.physical(index);
        // SAFETY: index < len, so the physical slot is initialized.
        Ok(unsafe { self.buf.get_mut(slot) })
    }

    /// Removes and returns the element at the provided logical `index`, closing the gap by moving
    /// whichever side of the deque is shorter.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::circular::CircularDeque;
    /// let mut deque: CircularDeque<_> = (0..6).collect();
    /// assert_eq!(deque.remove_at(1), Ok(1));
    /// assert_eq!(deque.remove_at(3), Ok(4));
    /// assert!(deque.iter().eq(&[0, 2, 3, 5]));
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        self.check_index(index)?;

        // SAFETY: index < len, so the slot is initialized. After it is read, every move below
        // takes an initialized slot and writes it into the slot that was vacated just before, so
        // exactly one slot (the new front or back) ends up outside of the deque.
        let value = unsafe { self.buf.read(self.physical(index)) };

        if index < self.len / 2 {
            for i in (0..index).rev() {
                // SAFETY: Slot i is initialized and slot i + 1 was vacated by the previous move.
                unsafe { self.move_slot(self.physical(i), self.physical(i + 1)); }
            }
            self.head = self.physical(1);
        } else {
            for i in index + 1..self.len {
                // SAFETY: Slot i is initialized and slot i - 1 was vacated by the previous move.
                unsafe { self.move_slot(self.physical(i), self.physical(i - 1)); }
            }
        }

        self.len -= 1;
        self.generation.bump();

        Ok(value)
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        let (front, back) = self.as_mut_slices();
        let (front, back) = (front as *mut [T], back as *mut [T]);
        self.head = 0;
        self.len = 0;
        self.generation.bump();

        // SAFETY: Both slices were initialized and are no longer part of the deque. len is
        // already 0, so a panicking drop leaks the rest rather than dropping them twice.
        unsafe {
            ptr::drop_in_place(front);
            ptr::drop_in_place(back);
        }
    }

    /// Returns the contents of the deque as two slices which, when concatenated, are in logical
    /// order. The second slice is empty unless the elements wrap around the end of the buffer.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first_len, second_len) = self.segment_lens();
        // SAFETY: head..head + first_len and 0..second_len are disjoint, initialized and
        // within the buffer.
        unsafe {
            (
                slice::from_raw_parts(self.buf.slot(self.head), first_len),
                slice::from_raw_parts(self.buf.slot(0), second_len),
            )
        }
    }

    /// Returns the contents of the deque as two mutable slices, see
    /// [`as_slices`](CircularDeque::as_slices).
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first_len, second_len) = self.segment_lens();
        // SAFETY: head..head + first_len and 0..second_len are disjoint, initialized and
        // within the buffer, so the two mutable slices never alias.
        unsafe {
            (
                slice::from_raw_parts_mut(self.buf.slot(self.head), first_len),
                slice::from_raw_parts_mut(self.buf.slot(0), second_len),
            )
        }
    }

    /// Returns an iterator over references to the elements, from front to back. Use
    /// [`rev`](Iterator::rev) to iterate from back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Returns an iterator over mutable references to the elements, from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    /// Reallocates with double the capacity and moves the elements to the start of the new
    /// buffer in logical order, so that afterwards `head == 0`.
    ///
    /// # Panics
    /// Panics if the memory layout of the CircularDeque would have a size that exceeds
    /// [`isize::MAX`]. The deque is unchanged in that case.
    pub(crate) fn grow(&mut self) {
        let new_cap = cmp::max(
            self.capacity().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow).throw(),
            MIN_GROW_CAP,
        );
        trace!(from = self.capacity(), to = new_cap, head = self.head, "growing circular deque");

        let mut new_buf = RawBuffer::with_cap(new_cap);
        let (first_len, second_len) = self.segment_lens();

        // SAFETY: The two segments are the initialized contents of the deque and the new buffer
        // has room for both. The old buffer is only deallocated afterwards, without dropping.
        unsafe {
            self.buf.copy_to(self.head, &mut new_buf, 0, first_len);
            self.buf.copy_to(0, &mut new_buf, first_len, second_len);
        }

        drop(mem::replace(&mut self.buf, new_buf));
        self.head = 0;
        self.generation.bump();
    }

    /// Returns the lengths of the segment starting at head and of the wrapped segment starting
    /// at 0.
    pub(crate) fn segment_lens(&self) -> (usize, usize) {
        let first_len = cmp::min(self.len, self.capacity() - self.head);
        (first_len, self.len - first_len)
    }

    /// Converts a logical offset from head into a physical slot index. `offset` must not exceed
    /// the capacity.
    pub(crate) const fn physical(&self, offset: usize) -> usize {
        self.wrap_add(self.head, offset)
    }

    pub(crate) const fn wrap_add(&self, index: usize, offset: usize) -> usize {
        let sum = index + offset;
        if sum >= self.capacity() {
            sum - self.capacity()
        } else {
            sum
        }
    }

    pub(crate) const fn wrap_sub(&self, index: usize, offset: usize) -> usize {
        if index >= offset {
            index - offset
        } else {
            index + self.capacity() - offset
        }
    }

    /// # Safety
    /// `src` must be initialized and `dst` must be free. `src` is free afterwards.
    unsafe fn move_slot(&mut self, src: usize, dst: usize) {
        // SAFETY: Upheld by the caller.
        unsafe {
            let value = self.buf.read(src);
            self.buf.write(dst, value);
        }
    }

    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }
}

impl<T> Index<usize> for CircularDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> IndexMut<usize> for CircularDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T> Extend<T> for CircularDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for CircularDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = CircularDeque::with_cap(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<T> Default for CircularDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for CircularDeque<T> {
    fn drop(&mut self) {
        self.clear();
        // Implicitly drop self.buf, which only deallocates.
    }
}

impl<T: Clone> Clone for CircularDeque<T> {
    fn clone(&self) -> Self {
        let mut deque = CircularDeque::with_cap(self.capacity());
        deque.extend(self.iter().cloned());
        deque
    }
}

impl<T: PartialEq> PartialEq for CircularDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularDeque<T> {}

impl<T: Hash> Hash for CircularDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Debug> Debug for CircularDeque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularDeque")
            .field("contents", &DebugContents(self))
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .field("head", &self.head)
            .finish()
    }
}

impl<T: Debug> Display for CircularDeque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

struct DebugContents<'a, T>(&'a CircularDeque<T>);

impl<T: Debug> Debug for DebugContents<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
