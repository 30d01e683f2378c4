mod node;
mod traversal;


use slotmap::SlotMap;
use tracing::Level as LogLevel;

use crate::error::{Error, ErrorKind, Result, Side, Structure};

pub use self::{
    node::{TreeNode, TreeNodeId},
    traversal::InorderIter,
};


/// A binary tree whose nodes know their parent, supporting insertion above existing children and
/// left/right rotations.
///
/// The tree does not order its payloads; where a node goes is decided entirely by the caller.
///
/// Nodes are addressed by [`TreeNodeId`] handles. A handle stays valid until its node is removed
/// (by [`remove_subtree`] or [`clear`]); afterwards, operations given that handle fail with
/// [`ErrorKind::StaleHandle`].
///
/// [`remove_subtree`]: BinaryTree::remove_subtree
/// [`clear`]: BinaryTree::clear
#[derive(Debug, Clone)]
pub struct BinaryTree<T> {
    nodes: SlotMap<TreeNodeId, TreeNode<T>>,
    root:  Option<TreeNodeId>,
}

impl<T> BinaryTree<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root:  None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// # Errors
    /// Fails with [`ErrorKind::EmptyStructure`] if the tree has no root.
    #[track_caller]
    #[inline]
    pub fn root(&self) -> Result<TreeNodeId> {
        match self.root {
            Some(root) => Ok(root),
            None       => Err(Error::empty(Structure::BinaryTree)),
        }
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this tree.
    #[track_caller]
    #[inline]
    pub fn node(&self, id: TreeNodeId) -> Result<&TreeNode<T>> {
        match self.nodes.get(id) {
            Some(node) => Ok(node),
            None       => Err(Error::stale_handle()),
        }
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this tree.
    #[track_caller]
    #[inline]
    pub fn data(&self, id: TreeNodeId) -> Result<&T> {
        self.node(id).map(TreeNode::data)
    }

    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `id` does not refer to a node of this tree.
    #[track_caller]
    #[inline]
    pub fn data_mut(&mut self, id: TreeNodeId) -> Result<&mut T> {
        match self.nodes.get_mut(id) {
            Some(node) => Ok(node.data_mut()),
            None       => Err(Error::stale_handle()),
        }
    }

    /// Create a root holding `data`, or, if the tree already has a root, replace the root's
    /// payload. The root's children are kept either way.
    pub fn set_root(&mut self, data: T) -> TreeNodeId {
        if let Some(root) = self.root {
            *self.nodes[root].data_mut() = data;
            root
        } else {
            let root = self.nodes.insert(TreeNode::new(data));
            self.root = Some(root);
            root
        }
    }

    /// Insert a new node holding `data` as the left child of `parent`.
    ///
    /// Any previous left child of `parent` becomes the left child of the new node, so no
    /// existing subtree is lost.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `parent` does not refer to a node of this tree.
    #[track_caller]
    #[inline]
    pub fn insert_left(&mut self, data: T, parent: TreeNodeId) -> Result<TreeNodeId> {
        self.insert_child(Side::Left, data, parent)
    }

    /// Insert a new node holding `data` as the right child of `parent`.
    ///
    /// Any previous right child of `parent` becomes the right child of the new node, so no
    /// existing subtree is lost.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `parent` does not refer to a node of this tree.
    #[track_caller]
    #[inline]
    pub fn insert_right(&mut self, data: T, parent: TreeNodeId) -> Result<TreeNodeId> {
        self.insert_child(Side::Right, data, parent)
    }

    /// Insert a new node holding `data` as the `side` child of `parent`, moving the previous
    /// `side` child of `parent` (if any) to the same side of the new node.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `parent` does not refer to a node of this tree.
    #[track_caller]
    pub fn insert_child(
        &mut self,
        side:   Side,
        data:   T,
        parent: TreeNodeId,
    ) -> Result<TreeNodeId> {
        let existing = match self.nodes.get(parent) {
            Some(parent) => parent.child(side),
            None         => return Err(Error::stale_handle()),
        };

        let inserted = self.nodes.insert(TreeNode::new(data));
        self.link_child(inserted, side, existing);
        self.link_child(parent, side, Some(inserted));

        Ok(inserted)
    }

    /// Rotate the subtree rooted at `node` to the left, and return the subtree's new root (the
    /// former right child of `node`).
    ///
    /// ```text
    ///     node               pivot
    ///    /    \             /     \
    ///   a    pivot   =>   node     c
    ///       /     \      /    \
    ///      b       c    a      b
    /// ```
    ///
    /// # Errors
    /// Fails with [`ErrorKind::MissingChild`] if `node` has no right child, or with
    /// [`ErrorKind::StaleHandle`] if `node` does not refer to a node of this tree. The tree is
    /// left unchanged in either case.
    #[track_caller]
    #[inline]
    pub fn rotate_left(&mut self, node: TreeNodeId) -> Result<TreeNodeId> {
        self.rotate(node, Side::Left)
    }

    /// Rotate the subtree rooted at `node` to the right, and return the subtree's new root (the
    /// former left child of `node`). This is the mirror image of [`rotate_left`].
    ///
    /// # Errors
    /// Fails with [`ErrorKind::MissingChild`] if `node` has no left child, or with
    /// [`ErrorKind::StaleHandle`] if `node` does not refer to a node of this tree. The tree is
    /// left unchanged in either case.
    ///
    /// [`rotate_left`]: BinaryTree::rotate_left
    #[track_caller]
    #[inline]
    pub fn rotate_right(&mut self, node: TreeNodeId) -> Result<TreeNodeId> {
        self.rotate(node, Side::Right)
    }

    /// Call `visitor` on every payload, in order: left subtree, node, right subtree.
    pub fn inorder_traversal<F: FnMut(&T)>(&self, visitor: F) {
        self.inorder_iter().for_each(visitor);
    }

    /// Call `visitor` on every payload in the subtree rooted at `node`, in order.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `node` does not refer to a node of this tree.
    #[track_caller]
    pub fn inorder_traversal_from<F: FnMut(&T)>(
        &self,
        node:    TreeNodeId,
        visitor: F,
    ) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(Error::stale_handle());
        }
        InorderIter::new(&self.nodes, Some(node)).for_each(visitor);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn inorder_iter(&self) -> InorderIter<'_, T> {
        InorderIter::new(&self.nodes, self.root)
    }

    /// Detach the subtree rooted at `node` from the tree and drop every node in it.
    ///
    /// Returns the number of removed nodes. Handles to removed nodes become stale.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::StaleHandle`] if `node` does not refer to a node of this tree.
    #[track_caller]
    pub fn remove_subtree(&mut self, node: TreeNodeId) -> Result<usize> {
        let parent = match self.nodes.get(node) {
            Some(node) => node.parent(),
            None       => return Err(Error::stale_handle()),
        };

        // Every node other than the root has a parent.
        if let Some(parent) = parent {
            let side = TreeNode::side_under(&self.nodes[parent], node);
            self.nodes[parent].set_child(side, None);
        } else {
            self.root = None;
        }

        let mut pending = vec![node];
        let mut removed = 0;
        while let Some(id) = pending.pop() {
            if let Some(removed_node) = self.nodes.remove(id) {
                pending.extend(removed_node.left_child());
                pending.extend(removed_node.right_child());
                removed += 1;
            }
        }

        tracing::event!(LogLevel::TRACE, "removed a subtree of {removed} nodes rooted at {node:?}");

        Ok(removed)
    }

    /// Drop every node. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Set the `side` child of `parent` to `child`, and point `child` back at `parent`.
    ///
    /// Whatever `child` was previously linked from is not updated.
    fn link_child(
        &mut self,
        parent: TreeNodeId,
        side:   Side,
        child:  Option<TreeNodeId>,
    ) {
        self.nodes[parent].set_child(side, child);
        if let Some(child) = child {
            self.nodes[child].set_parent(Some(parent));
        }
    }

    /// Rotate the subtree rooted at `node` towards `direction`. The child of `node` on the
    /// opposite side (the pivot) becomes the subtree's new root.
    #[track_caller]
    fn rotate(&mut self, node: TreeNodeId, direction: Side) -> Result<TreeNodeId> {
        let pivot_side = direction.opposite();

        // Validate everything before mutating anything.
        let (parent, pivot) = match self.nodes.get(node) {
            Some(node) => match node.child(pivot_side) {
                Some(pivot) => (node.parent(), pivot),
                None        => return Err(Error::new(ErrorKind::MissingChild(pivot_side))),
            },
            None => return Err(Error::stale_handle()),
        };
        let inner_grandchild = self.nodes[pivot].child(direction);

        // The pivot takes the place of `node` under `node`'s parent.
        if let Some(parent) = parent {
            let side = TreeNode::side_under(&self.nodes[parent], node);
            self.nodes[parent].set_child(side, Some(pivot));
        } else {
            self.root = Some(pivot);
        }
        self.nodes[pivot].set_parent(parent);

        self.link_child(node, pivot_side, inner_grandchild);
        self.link_child(pivot, direction, Some(node));

        tracing::event!(
            LogLevel::TRACE,
            "rotated {node:?} {}, {pivot:?} is the new subtree root",
            direction.name(),
        );

        Ok(pivot)
    }
}

impl<T> Default for BinaryTree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
