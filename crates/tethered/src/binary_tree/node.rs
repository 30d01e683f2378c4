use slotmap::new_key_type;

use crate::error::Side;


new_key_type! {
    /// Handle to a node of a [`BinaryTree`].
    ///
    /// [`BinaryTree`]: crate::BinaryTree
    pub struct TreeNodeId;
}

/// A node of a [`BinaryTree`]: a payload, up to two children, and a link back to its parent.
///
/// # Invariants
/// - If this node is the left (or right) child of `parent`, then `self.parent() == Some(parent)`,
///   and vice versa.
/// - The root of a tree has no parent.
///
/// Links can only be changed through [`BinaryTree`], which upholds these invariants.
///
/// [`BinaryTree`]: crate::BinaryTree
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    data:   T,
    parent: Option<TreeNodeId>,
    left:   Option<TreeNodeId>,
    right:  Option<TreeNodeId>,
}

impl<T> TreeNode<T> {
    #[inline]
    #[must_use]
    pub(super) const fn new(data: T) -> Self {
        Self {
            data,
            parent: None,
            left:   None,
            right:  None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    #[must_use]
    pub(super) fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<TreeNodeId> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub const fn left_child(&self) -> Option<TreeNodeId> {
        self.left
    }

    #[inline]
    #[must_use]
    pub const fn right_child(&self) -> Option<TreeNodeId> {
        self.right
    }

    #[inline]
    #[must_use]
    pub const fn child(&self, side: Side) -> Option<TreeNodeId> {
        match side {
            Side::Left  => self.left,
            Side::Right => self.right,
        }
    }

    /// Which side of `parent` this node hangs from, judging by `parent`'s child links.
    #[must_use]
    pub(super) fn side_under(parent: &Self, node: TreeNodeId) -> Side {
        if parent.left == Some(node) {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[inline]
    pub(super) fn set_parent(&mut self, parent: Option<TreeNodeId>) {
        self.parent = parent;
    }

    #[inline]
    pub(super) fn set_child(&mut self, side: Side, child: Option<TreeNodeId>) {
        match side {
            Side::Left  => self.left = child,
            Side::Right => self.right = child,
        }
    }
}
