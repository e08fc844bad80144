use std::fmt::{self, Debug, Formatter};

use tracing::trace;

use super::{Compare, DrainSorted, Iter, Natural};
use crate::collections::contiguous::DynamicArray;
use crate::error::EmptyContainer;

/// A priority queue implemented as a binary heap on top of a [`DynamicArray`]. The element at the
/// top is always the one that compares [`Less`](std::cmp::Ordering::Less) than all others under
/// the heap's comparator, so a heap using [`Natural`] ordering is a min-heap and one using
/// [`Inverted`](super::Inverted) is a max-heap.
///
/// The children of the element at index `i` are stored at `2i + 1` and `2i + 2`. Iterating over
/// the heap visits elements in this storage order, use [`into_sorted`](BinaryHeap::into_sorted)
/// or [`drain_sorted`](BinaryHeap::drain_sorted) to visit them by priority. Elements that compare
/// as equal are extracted in no particular order.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the BinaryHeap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `peek_top` | `O(1)` |
/// | `insert` | `O(log n)`*, `O(n)` |
/// | `extract_top` | `O(log n)` |
/// | `from_iter_with` | `O(n)` |
/// | `into_sorted` | `O(n log n)` |
///
/// \* Insertion only takes `O(n)` when the backing array has to grow.
///
/// # Examples
/// ```
/// # use collections_core::collections::heap::BinaryHeap;
/// let mut heap = BinaryHeap::new();
/// for i in [5, 3, 8, 1, 9, 2] {
///     heap.insert(i);
/// }
///
/// let mut sorted = Vec::new();
/// while let Ok(top) = heap.extract_top() {
///     sorted.push(top);
/// }
/// assert_eq!(sorted, [1, 2, 3, 5, 8, 9]);
/// ```
pub struct BinaryHeap<T, C = Natural> {
    pub(crate) data: DynamicArray<T>,
    pub(crate) comparator: C,
}

impl<T: Ord> BinaryHeap<T> {
    /// Creates a new min-heap, ordered by [`Ord`].
    pub const fn new() -> BinaryHeap<T> {
        BinaryHeap {
            data: DynamicArray::new(),
            comparator: Natural,
        }
    }
}

impl<T, C: Compare<T>> BinaryHeap<T, C> {
    /// Creates a new, empty BinaryHeap ordered by `comparator`.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::heap::BinaryHeap;
    /// let mut heap = BinaryHeap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// heap.extend(["three", "one", "eleven"]);
    /// assert_eq!(heap.peek_top(), Ok(&"one"));
    /// ```
    pub const fn with_comparator(comparator: C) -> BinaryHeap<T, C> {
        BinaryHeap {
            data: DynamicArray::new(),
            comparator,
        }
    }

    /// Creates a new BinaryHeap ordered by `comparator`, with space for at least `cap` elements.
    pub fn with_cap_and_comparator(cap: usize, comparator: C) -> BinaryHeap<T, C> {
        BinaryHeap {
            data: DynamicArray::with_cap(cap),
            comparator,
        }
    }

    /// Builds a heap out of all elements of `iter` at once, which is faster than inserting them
    /// one at a time.
    pub fn from_iter_with<I: IntoIterator<Item = T>>(iter: I, comparator: C) -> BinaryHeap<T, C> {
        let mut heap = BinaryHeap {
            data: iter.into_iter().collect(),
            comparator,
        };
        heap.rebuild();
        heap
    }

    /// Returns the number of elements in the BinaryHeap.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the BinaryHeap contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements the BinaryHeap can hold without reallocating.
    pub const fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the comparator that orders this heap.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Adds `item` to the heap, moving it up until its parent no longer compares greater.
    pub fn insert(&mut self, item: T) {
        self.data.push_back(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes the top element and returns it.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn extract_top(&mut self) -> Result<T, EmptyContainer> {
        let last = self.data.pop_back().ok_or(EmptyContainer)?;
        if self.data.is_empty() {
            return Ok(last);
        }

        let top = std::mem::replace(&mut self.data[0], last);
        self.sift_down(0, self.data.len());
        Ok(top)
    }

    /// Returns a reference to the top element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_top(&self) -> Result<&T, EmptyContainer> {
        self.data.first().ok_or(EmptyContainer)
    }

    /// Replaces the top element with `item`, returning the old top. This is a single sift
    /// instead of an extraction followed by an insertion. If the heap is empty, `item` is inserted
    /// and `None` is returned.
    pub fn replace_top(&mut self, item: T) -> Option<T> {
        if self.data.is_empty() {
            self.data.push_back(item);
            return None;
        }

        let top = std::mem::replace(&mut self.data[0], item);
        self.sift_down(0, self.data.len());
        Some(top)
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns an iterator over the elements in storage order, which is not sorted.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.data.iter(),
        }
    }

    /// Removes and yields the elements from top to bottom. Elements that haven't been yielded
    /// when the iterator is dropped are removed anyway.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, C> {
        DrainSorted {
            heap: self,
        }
    }

    /// Consumes the heap, returning its elements from top to bottom. Sorts in place, without
    /// allocating.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::heap::{BinaryHeap, Inverted, Natural};
    /// let heap = BinaryHeap::from_iter_with([4, 1, 7, 3], Inverted(Natural));
    /// assert_eq!(&*heap.into_sorted(), &[7, 4, 3, 1]);
    /// ```
    pub fn into_sorted(mut self) -> DynamicArray<T> {
        for end in (1..self.data.len()).rev() {
            let data: &mut [T] = &mut self.data;
            data.swap(0, end);
            self.sift_down(0, end);
        }

        // Each sift moved the current top to the back.
        let data: &mut [T] = &mut self.data;
        data.reverse();
        self.data
    }

    /// Consumes the heap, returning its backing array in storage order.
    pub fn into_inner(self) -> DynamicArray<T> {
        self.data
    }

    /// Restores the heap property for the whole array, sifting down every parent from the
    /// bottom up.
    pub(crate) fn rebuild(&mut self) {
        let len = self.data.len();
        trace!(len, "heapifying binary heap");
        for index in (0..len / 2).rev() {
            self.sift_down(index, len);
        }
    }

    /// Moves the element at `index` up while it precedes its parent. Equal elements stay put.
    fn sift_up(&mut self, mut index: usize) {
        let data: &mut [T] = &mut self.data;
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.comparator.precedes(&data[index], &data[parent]) {
                break;
            }
            data.swap(index, parent);
            index = parent;
        }
    }

    /// Moves the element at `index` down, swapping with the preceding child, until neither child
    /// within `end` precedes it.
    fn sift_down(&mut self, mut index: usize, end: usize) {
        let data: &mut [T] = &mut self.data;
        loop {
            let left = 2 * index + 1;
            if left >= end {
                break;
            }

            let right = left + 1;
            let child = if right < end && self.comparator.precedes(&data[right], &data[left]) {
                right
            } else {
                left
            };

            if !self.comparator.precedes(&data[child], &data[index]) {
                break;
            }
            data.swap(index, child);
            index = child;
        }
    }

    /// Panics if any element precedes its parent.
    #[cfg(test)]
    pub(crate) fn verify_heap(&self) {
        for index in 1..self.data.len() {
            let parent = (index - 1) / 2;
            assert!(
                !self.comparator.precedes(&self.data[index], &self.data[parent]),
                "Element {index} precedes its parent {parent}."
            );
        }
    }
}

impl<T, C: Compare<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinaryHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        BinaryHeap::from_iter_with(iter, Natural)
    }
}

impl<T, C: Compare<T> + Default> Default for BinaryHeap<T, C> {
    fn default() -> Self {
        BinaryHeap::with_comparator(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for BinaryHeap<T, C> {
    fn clone(&self) -> Self {
        BinaryHeap {
            data: self.data.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: Debug, C> Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("contents", &&*self.data)
            .field("len", &self.data.len())
            .finish()
    }
}
