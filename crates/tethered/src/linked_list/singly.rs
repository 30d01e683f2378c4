use std::iter::FusedIterator;

use slotmap::{new_key_type, SlotMap};
use tracing::Level as LogLevel;

use crate::error::{Error, Result, Structure};


new_key_type! {
    /// Handle to a node of a [`SinglyLinkedList`].
    pub struct SinglyNodeId;
}

#[derive(Debug, Clone)]
pub struct SinglyNode<T> {
    data: T,
    next: Option<SinglyNodeId>,
}

impl<T> SinglyNode<T> {
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    #[must_use]
    pub const fn next(&self) -> Option<SinglyNodeId> {
        self.next
    }
}

/// A singly linked list. Nodes are placed by the caller, relative to existing nodes; the list
/// does not order its payloads.
#[derive(Debug, Clone)]
pub struct SinglyLinkedList<T> {
    nodes: SlotMap<SinglyNodeId, SinglyNode<T>>,
    head:  Option<SinglyNodeId>,
}

impl<T> SinglyLinkedList<T> {
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
    pub fn head(&self) -> Result<SinglyNodeId> {
        match self.head {
            Some(head) => Ok(head),
            None       => Err(Error::empty(Structure::SinglyLinkedList)),
        }
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    #[inline]
    pub fn node(&self, id: SinglyNodeId) -> Result<&SinglyNode<T>> {
        match self.nodes.get(id) {
            Some(node) => Ok(node),
            None       => Err(Error::stale_handle()),
        }
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    #[inline]
    pub fn data(&self, id: SinglyNodeId) -> Result<&T> {
        self.node(id).map(SinglyNode::data)
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    #[inline]
    pub fn data_mut(&mut self, id: SinglyNodeId) -> Result<&mut T> {
        match self.nodes.get_mut(id) {
            Some(node) => Ok(&mut node.data),
            None       => Err(Error::stale_handle()),
        }
    }

    /// Create a head holding `data` if the list is empty, or else replace the head's payload.
    pub fn set_head(&mut self, data: T) -> SinglyNodeId {
        if let Some(head) = self.head {
            self.nodes[head].data = data;
            head
        } else {
            let head = self.nodes.insert(SinglyNode { data, next: None });
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
    pub fn insert_after(&mut self, data: T, previous: SinglyNodeId) -> Result<SinglyNodeId> {
        let next = match self.nodes.get(previous) {
            Some(previous) => previous.next,
            None           => return Err(Error::stale_handle()),
        };

        let inserted = self.nodes.insert(SinglyNode { data, next });
        self.nodes[previous].next = Some(inserted);
        Ok(inserted)
    }

    /// Remove the node directly after `previous`, if there is one, and return its payload.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `previous` does not refer to a node of this list.
    ///
    /// [`ErrorKind::StaleHandle`]: crate::ErrorKind::StaleHandle
    #[track_caller]
    pub fn remove_after(&mut self, previous: SinglyNodeId) -> Result<Option<T>> {
        let removed = match self.nodes.get(previous) {
            Some(previous) => previous.next,
            None           => return Err(Error::stale_handle()),
        };
        let Some(removed) = removed else {
            return Ok(None);
        };

        let Some(removed_node) = self.nodes.remove(removed) else {
            return Err(Error::stale_handle());
        };
        self.nodes[previous].next = removed_node.next;

        tracing::event!(LogLevel::TRACE, "removed {removed:?} from a singly linked list");

        Ok(Some(removed_node.data))
    }

    /// Call `visitor` on every payload, from the head onwards.
    pub fn traverse<F: FnMut(&T)>(&self, visitor: F) {
        self.iter().for_each(visitor);
    }

    #[inline]
    #[must_use]
    pub const fn iter(&self) -> SinglyIter<'_, T> {
        SinglyIter {
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

impl<T> Default for SinglyLinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the payloads of a [`SinglyLinkedList`], from the head onwards.
#[derive(Debug)]
pub struct SinglyIter<'a, T> {
    nodes:  &'a SlotMap<SinglyNodeId, SinglyNode<T>>,
    cursor: Option<SinglyNodeId>,
}

impl<T> Clone for SinglyIter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            nodes:  self.nodes,
            cursor: self.cursor,
        }
    }
}

impl<'a, T> Iterator for SinglyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a SlotMap<SinglyNodeId, SinglyNode<T>> = self.nodes;

        let node = &nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.data)
    }
}

impl<T> FusedIterator for SinglyIter<'_, T> {}
