use std::iter::FusedIterator;

use slotmap::{new_key_type, SlotMap};
use tracing::Level as LogLevel;

use crate::error::{Error, Result, Structure};


new_key_type! {
    /// Handle to a node of a [`DoublyLinkedList`].
    pub struct DoublyNodeId;
}

/// A node of a [`DoublyLinkedList`].
///
/// # Invariants
/// `a.next() == Some(b)` if and only if `b.previous() == Some(a)`, and the head of a list has no
/// previous node.
#[derive(Debug, Clone)]
pub struct DoublyNode<T> {
    data:     T,
    previous: Option<DoublyNodeId>,
    next:     Option<DoublyNodeId>,
}

impl<T> DoublyNode<T> {
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    #[must_use]
    pub const fn previous(&self) -> Option<DoublyNodeId> {
        self.previous
    }

    #[inline]
    #[must_use]
    pub const fn next(&self) -> Option<DoublyNodeId> {
        self.next
    }
}

/// A doubly linked list. Nodes are placed by the caller, relative to existing nodes; the list
/// does not order its payloads.
#[derive(Debug, Clone)]
pub struct DoublyLinkedList<T> {
    nodes: SlotMap<DoublyNodeId, DoublyNode<T>>,
    head:  Option<DoublyNodeId>,
}

impl<T> DoublyLinkedList<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head:  None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// # Errors
    /// Fails with [`ErrorKind::EmptyStructure`] if the list is empty.
    ///
    /// [`ErrorKind::EmptyStructure`]: crate::ErrorKind::EmptyStructure
    #[track_caller]
    #[inline]
    pub fn head(&self) -> Result<DoublyNodeId> {
        match self.head {
            Some(head) => Ok(head),
            None       => Err(Error::empty(Structure::DoublyLinkedList)),
        }
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    #[inline]
    pub fn node(&self, id: DoublyNodeId) -> Result<&DoublyNode<T>> {
        match self.nodes.get(id) {
            Some(node) => Ok(node),
            None       => Err(Error::stale_handle()),
        }
    }

    #[track_caller]
    #[inline]
    pub fn data(&self, id: DoublyNodeId) -> Result<&T> {
        self.node(id).map(DoublyNode::data)
    }

    #[track_caller]
    #[inline]
    pub fn data_mut(&mut self, id: DoublyNodeId) -> Result<&mut T> {
        match self.nodes.get_mut(id) {
            Some(node) => Ok(&mut node.data),
            None       => Err(Error::stale_handle()),
        }
    }

    /// Create a head holding `data` if the list is empty, or else replace the head's payload.
    pub fn set_head(&mut self, data: T) -> DoublyNodeId {
        if let Some(head) = self.head {
            self.nodes[head].data = data;
            head
        } else {
            let head = self.nodes.insert(DoublyNode {
                data,
                previous: None,
                next:     None,
            });
            self.head = Some(head);
            head
        }
    }

    /// Insert a node holding `data` directly after `previous`.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `previous` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    pub fn insert_after(&mut self, data: T, previous: DoublyNodeId) -> Result<DoublyNodeId> {
        let next = match self.nodes.get(previous) {
            Some(previous) => previous.next,
            None           => return Err(Error::stale_handle()),
        };

        let inserted = self.nodes.insert(DoublyNode {
            data,
            previous: Some(previous),
            next,
        });
        self.nodes[previous].next = Some(inserted);
        if let Some(next) = next {
            self.nodes[next].previous = Some(inserted);
        }

        Ok(inserted)
    }

    /// Insert a node holding `data` directly before `next`. Inserting before the head makes the
    /// new node the head.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `next` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    pub fn insert_before(&mut self, data: T, next: DoublyNodeId) -> Result<DoublyNodeId> {
        let previous = match self.nodes.get(next) {
            Some(next) => next.previous,
            None       => return Err(Error::stale_handle()),
        };

        let inserted = self.nodes.insert(DoublyNode {
            data,
            previous,
            next: Some(next),
        });
        self.nodes[next].previous = Some(inserted);
        if let Some(previous) = previous {
            self.nodes[previous].next = Some(inserted);
        } else {
            self.head = Some(inserted);
            tracing::event!(LogLevel::TRACE, "{inserted:?} is the new doubly linked list head");
        }

        Ok(inserted)
    }

    /// Unlink `node` from the list and return its payload. Removing the head makes the following
    /// node (if any) the head.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `node` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    pub fn remove(&mut self, node: DoublyNodeId) -> Result<T> {
        let Some(removed) = self.nodes.remove(node) else {
            return Err(Error::stale_handle());
        };

        if let Some(previous) = removed.previous {
            self.nodes[previous].next = removed.next;
        } else {
            self.head = removed.next;
        }
        if let Some(next) = removed.next {
            self.nodes[next].previous = removed.previous;
        }

        tracing::event!(LogLevel::TRACE, "removed {node:?} from a doubly linked list");

        Ok(removed.data)
    }

    /// Call `visitor` on every payload, from the head onwards.
    pub fn traverse<F: FnMut(&T)>(&self, visitor: F) {
        self.iter().for_each(visitor);
    }

    #[inline]
    #[must_use]
    pub const fn iter(&self) -> DoublyIter<'_, T> {
        DoublyIter {
            nodes:  &self.nodes,
            cursor: self.head,
        }
    }

    /// Drop every node. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }
}

impl<T> Default for DoublyLinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the payloads of a [`DoublyLinkedList`], from the head onwards.
#[derive(Debug)]
pub struct DoublyIter<'a, T> {
    nodes:  &'a SlotMap<DoublyNodeId, DoublyNode<T>>,
    cursor: Option<DoublyNodeId>,
}

impl<T> Clone for DoublyIter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            nodes:  self.nodes,
            cursor: self.cursor,
        }
    }
}

impl<'a, T> Iterator for DoublyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a SlotMap<DoublyNodeId, DoublyNode<T>> = self.nodes;

        let node = &nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.data)
    }
}

impl<T> FusedIterator for DoublyIter<'_, T> {}
