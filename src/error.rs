//! Error types shared by all collections.
//!
//! Each kind of failure is its own type so that a method signature says exactly how it can fail.
//! [`CollectionError`] is the union used by the few methods that can fail in more than one way.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// A removal or peek was requested from a collection with no elements.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Attempted to access an element of an empty collection!")]
pub struct EmptyContainer;

/// A positional access fell outside of `0..len` (or `0..=len` for insertion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of range for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfRange {}

/// A [`Handle`](crate::collections::linked::Handle) didn't refer to a live node of the
/// [`LinkedDeque`](crate::collections::linked::LinkedDeque) it was used with, either because it
/// came from another deque or because its node has since been removed.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Handle doesn't refer to a live node in this collection!")]
pub struct InvalidHandle;

/// A detached cursor noticed that its collection was structurally modified by something other
/// than the cursor itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrentModification {
    /// The generation recorded by the cursor.
    pub expected: u64,
    /// The generation of the collection when the cursor was used.
    pub found: u64,
}

impl Display for ConcurrentModification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Collection was modified during iteration (expected generation {}, found {})!",
            self.expected,
            self.found,
        )
    }
}

impl Error for ConcurrentModification {}

/// A cursor was asked to remove its current element, but it hasn't yielded one since it was
/// created or since the last removal.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Cursor has no current element to remove!")]
pub struct NoCurrentElement;

/// The capacity required by a collection can't be represented by a valid memory layout.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Capacity overflow!")]
pub struct CapacityOverflow;

/// Any of the errors produced by this crate.
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    EmptyContainer(EmptyContainer),
    IndexOutOfRange(IndexOutOfRange),
    InvalidHandle(InvalidHandle),
    ConcurrentModification(ConcurrentModification),
    NoCurrentElement(NoCurrentElement),
    CapacityOverflow(CapacityOverflow),
}
