use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

/// An ordering over `T`, used by [`BinaryHeap`](super::BinaryHeap) to decide which element sits at
/// the top. Elements for which `compare` returns [`Ordering::Less`] are closer to the top.
///
/// Implemented by [`Natural`], [`Inverted`], [`FnCompare`] and any closure of the form
/// `Fn(&T, &T) -> Ordering`.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns true if `a` should be closer to the top of the heap than `b`.
    fn precedes(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// The natural order of `T` through [`Ord`]. Produces a min-heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another comparator. `Inverted<Natural>` (the default) produces a max-heap.
///
/// # Examples
/// ```
/// # use collections_core::collections::heap::{BinaryHeap, Inverted, Natural};
/// let mut heap = BinaryHeap::with_comparator(Inverted(Natural));
/// heap.extend([3, 9, 1]);
/// assert_eq!(heap.extract_top(), Ok(9));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Inverted<C = Natural>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Inverted<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Wraps a comparison function, giving a nameable comparator type for closures.
#[derive(Clone, Copy, Default)]
pub struct FnCompare<F>(pub F);

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Compare<T> for FnCompare<F> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> Debug for FnCompare<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCompare").finish_non_exhaustive()
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Compare<T> for F {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
