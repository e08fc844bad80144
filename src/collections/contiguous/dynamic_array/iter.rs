use std::iter::FusedIterator;
use std::mem;

use super::DynamicArray;
use crate::collections::contiguous::buffer::RawBuffer;

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let end = self.len;
        // Take the buffer and leave an empty one behind, so that dropping self does nothing.
        self.len = 0;
        IntoIter {
            buf: mem::replace(&mut self.buf, RawBuffer::new()),
            start: 0,
            end,
        }
    }
}

/// A type for owned iteration over a [`DynamicArray`]. See [`DynamicArray::into_iter`].
pub struct IntoIter<T> {
    pub(crate) buf: RawBuffer<T>,
    // Slots in start..end are initialized and haven't been yielded yet.
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start is within the initialized range and is moved past immediately, so the
            // value is effectively moved off of the heap.
            let value = unsafe { self.buf.read(self.start) };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: The newly decremented end is within the initialized range and is now
            // excluded from it.
            Some(unsafe { self.buf.read(self.end) })
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
