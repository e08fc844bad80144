use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice;

use tracing::trace;

use crate::collections::contiguous::buffer::RawBuffer;
use crate::error::{CapacityOverflow, IndexOutOfRange};
use crate::util::result::ResultExtension;

const MIN_CAP: usize = 1;

// Growth factor of 1.5, rounded up so that small capacities always grow.
const GROWTH_NUMERATOR: usize = 3;
const GROWTH_DENOMINATOR: usize = 2;

/// A variable size contiguous collection, storing `len` elements at the start of an allocation
/// with room for `capacity` elements.
///
/// Growth happens when pushing or inserting into a full DynamicArray, to `ceil(capacity * 1.5)`
/// (or a capacity of 1 from empty). Reallocating moves the elements, so references into a
/// DynamicArray can't be held across a mutation. Positions should be kept as indices instead. The
/// capacity never shrinks unless requested with [`shrink_to_fit`](DynamicArray::shrink_to_fit).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynamicArray.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `set` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `pop_back` | `O(1)` |
/// | `insert_at` | `O(n-i)` |
/// | `remove_at` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
///
/// \* If the DynamicArray doesn't have enough capacity for the new element, `push_back` will take
/// `O(n)`.
///
/// \** If the DynamicArray has enough capacity for the additional items already, `reserve` is
/// `O(1)`.
pub struct DynamicArray<T> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates a new DynamicArray with length and capacity 0. Memory will be allocated when the
    /// capacity changes.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<u8> = DynamicArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.capacity(), 0);
    /// ```
    pub const fn new() -> DynamicArray<T> {
        DynamicArray {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates a new DynamicArray with capacity exactly equal to the provided value, allowing
    /// values to be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<u8> = DynamicArray::with_cap(5);
    /// assert_eq!(arr.capacity(), 5);
    /// arr.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(arr.capacity(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> DynamicArray<T> {
        DynamicArray {
            buf: RawBuffer::with_cap(cap),
            len: 0,
        }
    }

    /// Returns the number of elements in the DynamicArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynamicArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the DynamicArray can hold without reallocating.
    pub const fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Pushes the provided value onto the end of the DynamicArray, growing if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u8>::new();
    /// for i in 0..=5 {
    ///     arr.push_back(i);
    /// }
    /// assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }

        // SAFETY: There is at least one uninitialized slot at len after growing.
        unsafe { self.buf.write(self.len, value); }
        self.len += 1;
    }

    /// Removes the last value from the DynamicArray and returns it, if there is one.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;
            // SAFETY: The slot at the new len was initialized and is now outside of 0..len, so
            // it won't be read or dropped again.
            Some(unsafe { self.buf.read(self.len) })
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::contiguous::DynamicArray;
    /// # use collections_core::error::IndexOutOfRange;
    /// let arr: DynamicArray<_> = (10..13).collect();
    /// assert_eq!(arr.get(1), Ok(&11));
    /// assert_eq!(arr.get(3), Err(IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { self.buf.get(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { self.buf.get_mut(index) })
    }

    /// Replaces the element at `index` with `value`, returning the old value.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`. The provided value is dropped in that
    /// case.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, IndexOutOfRange> {
        Ok(std::mem::replace(self.get_mut(index)?, value))
    }

    /// Inserts `value` at `index`, moving all following elements back by one. Inserting at
    /// `index == len` is equivalent to [`push_back`](DynamicArray::push_back).
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index > len`, without growing.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = (0..3).collect();
    /// arr.insert_at(1, 100).unwrap();
    /// arr.insert_at(1, 200).unwrap();
    /// arr.insert_at(5, 300).unwrap();
    /// assert_eq!(&*arr, &[0, 200, 100, 1, 2, 300]);
    /// assert!(arr.insert_at(7, 400).is_err());
    /// ```
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), IndexOutOfRange> {
        if index > self.len {
            return Err(IndexOutOfRange { index, len: self.len });
        }

        if self.len == self.capacity() {
            self.grow();
        }

        // SAFETY: index <= len < cap, so both the source range index..len and the destination
        // range index + 1..len + 1 are in bounds. The gap left at index is written immediately.
        unsafe {
            self.buf.shift(index, index + 1, self.len - index);
            self.buf.write(index, value);
        }
        self.len += 1;

        Ok(())
    }

    /// Removes the element at `index`, moving all following elements forward to fill the gap.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::contiguous::DynamicArray;
    /// let mut arr: DynamicArray<_> = "Hello world!".chars().collect();
    /// assert_eq!(arr.remove_at(1), Ok('e'));
    /// assert_eq!(arr.remove_at(4), Ok(' '));
    /// assert_eq!(arr, "Hlloworld!".chars().collect::<DynamicArray<_>>());
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        self.check_index(index)?;

        // SAFETY: index < len, so the slot is initialized. It is moved out first and then
        // overwritten by shifting index + 1..len forward, after which len - 1 is the end.
        let value = unsafe {
            let value = self.buf.read(index);
            self.buf.shift(index + 1, index, self.len - index - 1);
            value
        };
        self.len -= 1;

        Ok(value)
    }

    /// Swaps the elements at indices `a` and `b`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] for the first index that is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), IndexOutOfRange> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.deref_mut().swap(a, b);
        Ok(())
    }

    /// Ensures that the DynamicArray has capacity to hold an additional `extra` elements. After
    /// invoking this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow).throw();

        if new_cap <= self.capacity() { return; }

        trace!(from = self.capacity(), to = new_cap, "reserving dynamic array capacity");
        self.buf.realloc(new_cap);
    }

    /// Shrinks the DynamicArray so that its capacity is equal to its length.
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.capacity() { return; }

        trace!(from = self.capacity(), to = self.len, "shrinking dynamic array");
        self.buf.realloc(self.len);
    }

    /// Drops all elements at or after `len`, keeping the capacity.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            // Dropped immediately, one at a time, so a panicking drop can't cause a double drop.
            drop(self.pop_back());
        }
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grows the internal buffer to allow for the insertion of additional elements. After calling
    /// this, the DynamicArray can take at least one more element.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        let scaled = self.capacity()
            .checked_mul(GROWTH_NUMERATOR)
            .ok_or(CapacityOverflow)
            .throw()
            .div_ceil(GROWTH_DENOMINATOR);
        let new_cap = cmp::max(scaled, MIN_CAP);

        trace!(from = self.capacity(), to = new_cap, "growing dynamic array");
        self.buf.realloc(new_cap);
    }

    /// Checks that the provided index refers to an initialized element.
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

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index` is out of range.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    /// # Panics
    /// Panics if `index` is out of range.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = DynamicArray::new();
        arr.extend(iter);
        arr
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // Call drop on all initialized values in place.
        // SAFETY: The first len values are initialized, and the slice is never used again.
        unsafe { std::ptr::drop_in_place(self.deref_mut() as *mut [T]); }

        // Implicitly drop self.buf, which only deallocates.
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The buffer is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull and properly aligned, and the borrow checker prevents mutation
        // while the slice is held.
        unsafe { slice::from_raw_parts(self.buf.slot(0), self.len) }
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The buffer is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull and properly aligned, and the slice borrows self uniquely.
        unsafe { slice::from_raw_parts_mut(self.buf.slot(0), self.len) }
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut arr = Self::with_cap(self.capacity());
        for value in self.iter() {
            arr.push_back(value.clone());
        }
        arr
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .finish()
    }
}

impl<T: Debug> Display for DynamicArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
