use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;

use super::{DequeState, Entry, Handles, Iter, IterMut, Link, Node, Slot};
use crate::collections::contiguous::DynamicArray;
use crate::error::{EmptyContainer, InvalidHandle};
use crate::util::generation::{Generation, next_owner_id};

/// A stable reference to a node in a [`LinkedDeque`], returned when the node is inserted and
/// available from [`LinkedDeque::handles`] during iteration.
///
/// A Handle stays valid for as long as its node is in the deque, regardless of what happens to
/// the other nodes. Once the node is removed (or the deque is cleared), the Handle is rejected
/// with [`InvalidHandle`], as is any Handle used with a deque other than the one that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) owner: u64,
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

/// A double-ended queue made of doubly-linked nodes, supporting `O(1)` insertion and removal at
/// both ends and, through a [`Handle`], anywhere in between.
///
/// Nodes are stored in an arena of slots and link to each other by index. Each node is only
/// reachable through its neighbours (or the ends of the deque), and a vacated slot is recycled by
/// later insertions after bumping its generation, which is what invalidates old Handles.
///
/// The arena never shrinks: removing a node leaves a vacant slot behind, and
/// [`clear`](LinkedDeque::clear) drops every node but keeps the arena's capacity.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the LinkedDeque.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `peek_front/back` | `O(1)` |
/// | `push_front/back` | `O(1)`*, `O(n)` |
/// | `pop_front/back` | `O(1)` |
/// | `insert_before/after` | `O(1)`*, `O(n)` |
/// | `remove` | `O(1)` |
/// | `get` | `O(1)` |
///
/// \* Insertion only takes `O(n)` when there is no vacant slot and the arena has to grow.
///
/// # Examples
/// ```
/// # use collections_core::collections::linked::LinkedDeque;
/// let mut deque = LinkedDeque::new();
/// deque.push_back('b');
/// let c = deque.push_back('c');
/// deque.push_front('a');
///
/// assert_eq!(deque.remove(c), Ok('c'));
/// assert!(deque.remove(c).is_err(), "A removed node can't be removed again.");
/// assert!(deque.iter().eq(&['a', 'b']));
/// ```
pub struct LinkedDeque<T> {
    pub(crate) slots: DynamicArray<Slot<T>>,
    pub(crate) free: Link,
    pub(crate) state: DequeState,
    pub(crate) len: usize,
    pub(crate) id: u64,
    pub(crate) generation: Generation,
}

impl<T> LinkedDeque<T> {
    /// Creates a new LinkedDeque with no elements.
    pub fn new() -> LinkedDeque<T> {
        LinkedDeque {
            slots: DynamicArray::new(),
            free: None,
            state: DequeState::Empty,
            len: 0,
            id: next_owner_id(),
            generation: Generation::new(),
        }
    }

    /// Returns the number of elements in the LinkedDeque.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the LinkedDeque contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds the provided element to the front of the LinkedDeque, returning a Handle to its node.
    pub fn push_front(&mut self, value: T) -> Handle {
        self.link(value, None, self.state.head())
    }

    /// Adds the provided element to the back of the LinkedDeque, returning a Handle to its node.
    pub fn push_back(&mut self, value: T) -> Handle {
        self.link(value, self.state.tail(), None)
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn pop_front(&mut self) -> Result<T, EmptyContainer> {
        let head = self.state.head().ok_or(EmptyContainer)?;
        Ok(self.unlink(head))
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn pop_back(&mut self) -> Result<T, EmptyContainer> {
        let tail = self.state.tail().ok_or(EmptyContainer)?;
        Ok(self.unlink(tail))
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_front(&self) -> Result<&T, EmptyContainer> {
        let head = self.state.head().ok_or(EmptyContainer)?;
        Ok(&self.node(head).value)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_front_mut(&mut self) -> Result<&mut T, EmptyContainer> {
        let head = self.state.head().ok_or(EmptyContainer)?;
        Ok(&mut self.node_mut(head).value)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_back(&self) -> Result<&T, EmptyContainer> {
        let tail = self.state.tail().ok_or(EmptyContainer)?;
        Ok(&self.node(tail).value)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn peek_back_mut(&mut self) -> Result<&mut T, EmptyContainer> {
        let tail = self.state.tail().ok_or(EmptyContainer)?;
        Ok(&mut self.node_mut(tail).value)
    }

    /// Returns a Handle to the first node.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn front_handle(&self) -> Result<Handle, EmptyContainer> {
        Ok(self.handle_for(self.state.head().ok_or(EmptyContainer)?))
    }

    /// Returns a Handle to the last node.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if there are no elements.
    pub fn back_handle(&self) -> Result<Handle, EmptyContainer> {
        Ok(self.handle_for(self.state.tail().ok_or(EmptyContainer)?))
    }

    /// Returns true if `handle` refers to a node that is currently in this deque.
    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns a reference to the element of the node referred to by `handle`.
    ///
    /// # Errors
    /// Returns [`InvalidHandle`] if the handle wasn't issued by this deque or its node has been
    /// removed.
    pub fn get(&self, handle: Handle) -> Result<&T, InvalidHandle> {
        let index = self.resolve(handle)?;
        Ok(&self.node(index).value)
    }

    /// Returns a mutable reference to the element of the node referred to by `handle`.
    ///
    /// # Errors
    /// Returns [`InvalidHandle`] if the handle wasn't issued by this deque or its node has been
    /// removed.
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T, InvalidHandle> {
        let index = self.resolve(handle)?;
        Ok(&mut self.node_mut(index).value)
    }

    /// Unlinks the node referred to by `handle` from wherever it is in the chain, returning its
    /// element.
    ///
    /// # Errors
    /// Returns [`InvalidHandle`] if the handle wasn't issued by this deque or its node has already
    /// been removed. The deque is unchanged in that case.
    pub fn remove(&mut self, handle: Handle) -> Result<T, InvalidHandle> {
        let index = self.resolve(handle)?;
        Ok(self.unlink(index))
    }

    /// Inserts `value` immediately before the node referred to by `handle`.
    ///
    /// # Errors
    /// Returns [`InvalidHandle`] if `handle` isn't valid for this deque.
    pub fn insert_before(&mut self, handle: Handle, value: T) -> Result<Handle, InvalidHandle> {
        let next = self.resolve(handle)?;
        let prev = self.node(next).prev;
        Ok(self.link(value, prev, Some(next)))
    }

    /// Inserts `value` immediately after the node referred to by `handle`.
    ///
    /// # Errors
    /// Returns [`InvalidHandle`] if `handle` isn't valid for this deque.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::linked::LinkedDeque;
    /// let mut deque: LinkedDeque<_> = [1, 3].into_iter().collect();
    /// let first = deque.front_handle().unwrap();
    /// deque.insert_after(first, 2).unwrap();
    /// assert!(deque.iter().eq(&[1, 2, 3]));
    /// ```
    pub fn insert_after(&mut self, handle: Handle, value: T) -> Result<Handle, InvalidHandle> {
        let prev = self.resolve(handle)?;
        let next = self.node(prev).next;
        Ok(self.link(value, Some(prev), next))
    }

    /// Drops all elements. Every Handle issued so far becomes invalid.
    pub fn clear(&mut self) {
        self.state = DequeState::Empty;
        self.len = 0;
        self.free = None;
        self.id = next_owner_id();
        self.generation.bump();
        self.slots.clear();
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

    /// Returns an iterator over the elements paired with a [`Handle`] to each of their nodes, which
    /// can be used to remove them once iteration is finished.
    ///
    /// # Examples
    /// ```
    /// # use collections_core::collections::linked::LinkedDeque;
    /// let mut deque: LinkedDeque<_> = (0..6).collect();
    /// let odd: Vec<_> = deque.handles()
    ///     .filter(|(_, value)| *value % 2 == 1)
    ///     .map(|(handle, _)| handle)
    ///     .collect();
    ///
    /// for handle in odd {
    ///     deque.remove(handle).unwrap();
    /// }
    /// assert!(deque.iter().eq(&[0, 2, 4]));
    /// ```
    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            iter: self.iter(),
        }
    }

    /// Links a new node between `prev` and `next`, which must be adjacent (or the matching end of
    /// the deque when missing).
    pub(crate) fn link(&mut self, value: T, prev: Link, next: Link) -> Handle {
        let index = self.alloc_node(Node {
            value,
            prev,
            next,
        });

        let mut head = self.state.head();
        let mut tail = self.state.tail();
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(index),
            None => head = Some(index),
        }
        match next {
            Some(next) => self.node_mut(next).prev = Some(index),
            None => tail = Some(index),
        }

        self.state = DequeState::from_ends(head, tail);
        self.len += 1;
        self.generation.bump();

        self.handle_for(index)
    }

    /// Unlinks the node at `index`, patching its neighbours (or the ends of the deque) to point
    /// past it, and releases its slot.
    pub(crate) fn unlink(&mut self, index: usize) -> T {
        let node = self.release_node(index);

        let mut head = self.state.head();
        let mut tail = self.state.tail();
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => tail = node.prev,
        }

        self.state = DequeState::from_ends(head, tail);
        self.len -= 1;
        self.generation.bump();

        node.value
    }

    /// Stores `node` in a vacant slot if there is one, otherwise at the end of the arena.
    fn alloc_node(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index];
                if let Entry::Vacant { next_free } = slot.entry {
                    self.free = next_free;
                }
                slot.entry = Entry::Occupied(node);
                index
            },
            None => {
                self.slots.push_back(Slot {
                    generation: 0,
                    entry: Entry::Occupied(node),
                });
                self.slots.len() - 1
            },
        }
    }

    /// Takes the node out of the slot at `index`, invalidating all Handles to it and adding
    /// the slot to the free list.
    fn release_node(&mut self, index: usize) -> Node<T> {
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let entry = mem::replace(&mut slot.entry, Entry::Vacant { next_free: self.free });
        self.free = Some(index);

        match entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("followed a link to a vacant slot"),
        }
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("followed a link to a vacant slot"),
        }
    }

    pub(crate) fn handle_for(&self, index: usize) -> Handle {
        Handle {
            owner: self.id,
            slot: index,
            generation: self.slots[index].generation,
        }
    }

    /// Converts a Handle into a slot index, if it refers to a live node in this deque.
    pub(crate) fn resolve(&self, handle: Handle) -> Result<usize, InvalidHandle> {
        if handle.owner != self.id {
            return Err(InvalidHandle);
        }

        match self.slots.get(handle.slot) {
            Ok(Slot { generation, entry })
                if *generation == handle.generation && entry.is_occupied() => Ok(handle.slot),
            _ => Err(InvalidHandle),
        }
    }

    /// Walks the chain in both directions, panicking if any link disagrees with its neighbour,
    /// with the ends of the deque or with the length.
    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        assert_eq!(self.state.is_empty(), self.len == 0, "Only an empty deque can lack ends.");

        let mut count = 0;
        let mut prev = None;
        let mut curr = self.state.head();
        while let Some(index) = curr {
            let node = self.node(index);
            assert_eq!(node.prev, prev, "prev should point back to the previous node.");
            count += 1;
            prev = curr;
            curr = node.next;
        }
        assert_eq!(prev, self.state.tail(), "Walking forward should end at the tail.");
        assert_eq!(count, self.len, "Walking forward should visit len nodes.");

        let mut count = 0;
        let mut curr = self.state.tail();
        while let Some(index) = curr {
            count += 1;
            curr = self.node(index).prev;
        }
        assert_eq!(count, self.len, "Walking backward should visit len nodes.");

        let occupied = self.slots.iter().filter(|slot| slot.entry.is_occupied()).count();
        assert_eq!(occupied, self.len, "Every occupied slot should be in the chain.");
    }
}

impl<T> Extend<T> for LinkedDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = LinkedDeque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Default for LinkedDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedDeque<T> {
    /// Clones the elements into a new deque. Handles from `self` aren't valid for the clone.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedDeque<T> {}

impl<T: Hash> Hash for LinkedDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Debug> Debug for LinkedDeque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedDeque")
            .field("contents", &DebugContents(self))
            .field("len", &self.len)
            .finish()
    }
}

impl<T: Debug> Display for LinkedDeque<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})",
            self.iter()
                .map(|i| format!("{i:?}"))
                .collect::<DynamicArray<String>>()
                .join(") <-> (")
        )
    }
}

struct DebugContents<'a, T>(&'a LinkedDeque<T>);

impl<T: Debug> Debug for DebugContents<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
