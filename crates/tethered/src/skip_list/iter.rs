use std::iter::FusedIterator;

use slotmap::SlotMap;

use super::node::{SkipNode, SkipNodeId};


/// Iterator over the payloads linked together at one level of a [`SkipList`], in ascending
/// order.
///
/// [`SkipList`]: crate::SkipList
#[derive(Debug)]
pub struct LevelIter<'a, T> {
    nodes:  &'a SlotMap<SkipNodeId, SkipNode<T>>,
    cursor: Option<SkipNodeId>,
    level:  usize,
}

impl<'a, T> LevelIter<'a, T> {
    #[inline]
    #[must_use]
    pub(super) const fn new(
        nodes: &'a SlotMap<SkipNodeId, SkipNode<T>>,
        start: Option<SkipNodeId>,
        level: usize,
    ) -> Self {
        Self {
            nodes,
            cursor: start,
            level,
        }
    }

    /// The level this iterator walks along.
    #[inline]
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }
}

impl<T> Clone for LevelIter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            nodes:  self.nodes,
            cursor: self.cursor,
            level:  self.level,
        }
    }
}

impl<'a, T> Iterator for LevelIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a SlotMap<SkipNodeId, SkipNode<T>> = self.nodes;

        let node = &nodes[self.cursor?];
        self.cursor = node.forward(self.level);
        Some(node.data())
    }
}

impl<T> FusedIterator for LevelIter<'_, T> {}
