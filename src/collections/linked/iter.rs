use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Entry, Handle, Link, LinkedDeque, Slot};

impl<T> IntoIterator for LinkedDeque<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            deque: self,
        }
    }
}

/// A type for owned iteration over a [`LinkedDeque`], from front to back.
pub struct IntoIter<T> {
    pub(crate) deque: LinkedDeque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a LinkedDeque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            deque: self,
            front: self.state.head(),
            back: self.state.tail(),
            len: self.len,
        }
    }
}

/// A type for borrowed iteration over a [`LinkedDeque`]. See [`LinkedDeque::iter`].
pub struct Iter<'a, T> {
    pub(crate) deque: &'a LinkedDeque<T>,
    pub(crate) front: Link,
    pub(crate) back: Link,
    // Stops the two ends from crossing over each other.
    pub(crate) len: usize,
}

impl<'a, T> Iter<'a, T> {
    fn next_entry(&mut self) -> Option<(usize, &'a T)> {
        if self.len == 0 {
            return None;
        }
        let index = self.front?;
        let deque = self.deque;
        let node = deque.node(index);
        self.front = node.next;
        self.len -= 1;
        Some((index, &node.value))
    }

    fn next_back_entry(&mut self) -> Option<(usize, &'a T)> {
        if self.len == 0 {
            return None;
        }
        let index = self.back?;
        let deque = self.deque;
        let node = deque.node(index);
        self.back = node.prev;
        self.len -= 1;
        Some((index, &node.value))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_entry().map(|(_, value)| value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            deque: self.deque,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedDeque<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            slots: self.slots.as_mut_ptr(),
            front: self.state.head(),
            back: self.state.tail(),
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

/// A type for mutably borrowed iteration over a [`LinkedDeque`]. See [`LinkedDeque::iter_mut`].
pub struct IterMut<'a, T> {
    pub(crate) slots: *mut Slot<T>,
    pub(crate) front: Link,
    pub(crate) back: Link,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

// SAFETY: IterMut acts as a `&mut` borrow of the deque's nodes, so it can be sent whenever
// `&mut T` can.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: A shared IterMut gives no access to the nodes at all.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    /// # Safety
    /// `index` has to be an occupied slot in the borrowed deque that hasn't been yielded yet.
    unsafe fn take_node(&mut self, index: usize) -> (&'a mut T, Link, Link) {
        // SAFETY: The deque is mutably borrowed for 'a, so the arena can't move, and each node is
        // yielded at most once, so no two returned references alias.
        let slot = unsafe { &mut *self.slots.add(index) };
        match &mut slot.entry {
            Entry::Occupied(node) => (&mut node.value, node.prev, node.next),
            Entry::Vacant { .. } => unreachable!("followed a link to a vacant slot"),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let index = self.front?;
        // SAFETY: front is always linked to a live node that hasn't been yielded while len > 0.
        let (value, _, next) = unsafe { self.take_node(index) };
        self.front = next;
        self.len -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let index = self.back?;
        // SAFETY: back is always linked to a live node that hasn't been yielded while len > 0.
        let (value, prev, _) = unsafe { self.take_node(index) };
        self.back = prev;
        self.len -= 1;
        Some(value)
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// An iterator over the elements of a [`LinkedDeque`] paired with a [`Handle`] to their node. See
/// [`LinkedDeque::handles`].
pub struct Handles<'a, T> {
    pub(crate) iter: Iter<'a, T>,
}

impl<'a, T> Iterator for Handles<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, value) = self.iter.next_entry()?;
        Some((self.iter.deque.handle_for(index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for Handles<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (index, value) = self.iter.next_back_entry()?;
        Some((self.iter.deque.handle_for(index), value))
    }
}

impl<T> FusedIterator for Handles<'_, T> {}

impl<T> ExactSizeIterator for Handles<'_, T> {}
