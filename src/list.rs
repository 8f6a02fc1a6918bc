//! Arena-backed doubly linked list used as the recency order of the cache.
//!
//! Nodes live in a slot arena (`Vec<Option<Node<T>>>` plus a free list) and are
//! linked by [`SlotId`] indices instead of pointers. The links are purely
//! relational: the arena owns every node, and a `SlotId` is just a position in it.
//! This keeps unlink/relink at arbitrary positions O(1) without aliasing between
//! the index that finds a node and the list that orders it.
//!
//! ```text
//!   slots
//!   ┌────┬──────────────────────────────────────┐
//!   │ 0  │ Node { val: A, prev: None, next: 2 } │  ◄── head (most recent)
//!   │ 1  │ <free>                               │
//!   │ 2  │ Node { val: B, prev: 0, next: 3 }    │
//!   │ 3  │ Node { val: C, prev: 2, next: None } │  ◄── tail (least recent)
//!   └────┴──────────────────────────────────────┘
//! ```
//!
//! **Note**: This module is internal infrastructure. A `SlotId` stays valid only
//! until the node it names is removed; its arena position may then be recycled
//! by a later `push_front`. The cache drops its index entry for a node in the same
//! operation that removes the node, so it never holds a stale id.

use alloc::vec::Vec;
use core::iter::FusedIterator;

/// Stable handle to a node in a [`List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

/// A node in the doubly linked list.
struct Node<T> {
    val: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// A doubly linked list whose nodes are stored in a slot arena.
///
/// `head` is the front (most recently used) and `tail` is the back (least
/// recently used). Both are `None` exactly when the list is empty.
pub(crate) struct List<T> {
    /// Node storage; `None` marks a free slot.
    slots: Vec<Option<Node<T>>>,
    /// Indices of free slots, reused before the arena grows.
    free: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        List {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of linked nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Id of the front node.
    #[cfg(test)]
    pub(crate) fn head_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Id of the back node.
    #[cfg(test)]
    pub(crate) fn tail_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value at the front of the list.
    pub(crate) fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the value at the back of the list.
    pub(crate) fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the value stored at `id`, if that slot is occupied.
    #[inline]
    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.node(id).map(|node| &node.val)
    }

    /// Returns a mutable reference to the value stored at `id`.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.val)
    }

    #[inline]
    fn node(&self, id: SlotId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Adds a value to the front of the list and returns its id.
    pub(crate) fn push_front(&mut self, val: T) -> SlotId {
        let node = Node {
            val,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                SlotId(idx)
            }
            None => {
                self.slots.push(Some(node));
                SlotId(self.slots.len() - 1)
            }
        };
        self.attach_front(id);
        self.len += 1;
        id
    }

    /// Moves a node to the front of the list. No-op if it is already there.
    pub(crate) fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) || self.node(id).is_none() {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    /// Unlinks the node at `id`, frees its slot and returns its value.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        self.node(id)?;
        self.detach(id);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.val)
    }

    /// Removes the back (least recently used) node.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes the front (most recently used) node.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Drops every node and resets the list to empty.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates values from front to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Splices a linked node out, leaving its own links cleared.
    ///
    /// The caller must only pass ids of nodes that are currently linked.
    fn detach(&mut self, id: SlotId) {
        let (prev, next) = match self.node(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links a detached node in front of the current head.
    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head_id) => {
                if let Some(head) = self.node_mut(head_id) {
                    head.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the list and asserts its structural invariants.
    ///
    /// - `head` and `tail` are both `None` iff the list is empty
    /// - `head.prev` and `tail.next` are `None`
    /// - every `next` link is mirrored by the following node's `prev` link
    /// - the walk from `head` terminates at `tail` after exactly `len` nodes
    /// - occupied slots plus free slots account for the whole arena
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.head.is_none(), self.len == 0, "head presence vs len");
        assert_eq!(self.tail.is_none(), self.len == 0, "tail presence vs len");

        let mut prev: Option<SlotId> = None;
        let mut cursor = self.head;
        let mut walked = 0usize;
        while let Some(id) = cursor {
            assert!(walked < self.len, "cycle or overlong list");
            let node = self.node(id).expect("linked id points at a free slot");
            assert_eq!(node.prev, prev, "broken back link");
            prev = Some(id);
            cursor = node.next;
            walked += 1;
        }
        assert_eq!(walked, self.len, "walk length vs len");
        assert_eq!(prev, self.tail, "walk does not end at tail");

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len, "occupied slots vs len");
        assert_eq!(occupied + self.free.len(), self.slots.len(), "leaked slots");
    }
}

/// Borrowing iterator over a [`List`], front to back.
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.val)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}
