use derive_more::IsVariant;

/// A link to another node, as an index into the arena of slots.
pub(crate) type Link = Option<usize>;

pub(crate) struct Node<T> {
    pub value: T,
    pub prev: Link,
    pub next: Link,
}

#[derive(IsVariant)]
pub(crate) enum Entry<T> {
    Occupied(Node<T>),
    Vacant {
        next_free: Link,
    },
}

/// A position in the arena. The generation is bumped every time the slot is vacated, so a
/// [`Handle`](super::Handle) only matches while the node it was issued for is still in place.
/// The generation wraps, so a slot reused 2^32 times can match a very old Handle again.
pub(crate) struct Slot<T> {
    pub generation: u32,
    pub entry: Entry<T>,
}

/// The two ends of a deque. Both exist or neither does.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub(crate) enum DequeState {
    #[default]
    Empty,
    Full {
        head: usize,
        tail: usize,
    },
}

use DequeState::*;

impl DequeState {
    pub const fn head(self) -> Link {
        match self {
            Empty => None,
            Full { head, .. } => Some(head),
        }
    }

    pub const fn tail(self) -> Link {
        match self {
            Empty => None,
            Full { tail, .. } => Some(tail),
        }
    }

    /// Builds the state from both ends, which must either both exist or both be missing.
    pub const fn from_ends(head: Link, tail: Link) -> DequeState {
        match (head, tail) {
            (Some(head), Some(tail)) => Full { head, tail },
            _ => Empty,
        }
    }
}
