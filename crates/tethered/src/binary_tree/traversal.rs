use std::iter::FusedIterator;

use slotmap::SlotMap;

use super::node::{TreeNode, TreeNodeId};


/// In-order iterator over the payloads of a [`BinaryTree`] (or of one of its subtrees).
///
/// The traversal keeps an explicit stack of the ancestors still to be visited, so degenerate
/// trees (long chains of single children) cannot overflow the call stack. The stack holds at most
/// one entry per level of the tree.
///
/// [`BinaryTree`]: crate::BinaryTree
#[derive(Debug)]
pub struct InorderIter<'a, T> {
    nodes:   &'a SlotMap<TreeNodeId, TreeNode<T>>,
    /// Nodes whose left subtree is being (or has been) visited, but which have not been
    /// visited themselves.
    stack:   Vec<TreeNodeId>,
    /// The root of the next subtree to descend into.
    descend: Option<TreeNodeId>,
}

impl<'a, T> InorderIter<'a, T> {
    #[inline]
    #[must_use]
    pub(super) const fn new(
        nodes: &'a SlotMap<TreeNodeId, TreeNode<T>>,
        start: Option<TreeNodeId>,
    ) -> Self {
        Self {
            nodes,
            stack:   Vec::new(),
            descend: start,
        }
    }
}

impl<T> Clone for InorderIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes:   self.nodes,
            stack:   self.stack.clone(),
            descend: self.descend,
        }
    }
}

impl<'a, T> Iterator for InorderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a SlotMap<TreeNodeId, TreeNode<T>> = self.nodes;

        // Walk down the left spine of the pending subtree.
        while let Some(id) = self.descend {
            self.stack.push(id);
            self.descend = nodes[id].left_child();
        }

        let id = self.stack.pop()?;
        let node = &nodes[id];
        self.descend = node.right_child();

        Some(node.data())
    }
}

impl<T> FusedIterator for InorderIter<'_, T> {}
