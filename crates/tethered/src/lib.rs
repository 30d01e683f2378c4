//! Node-linked containers whose nodes live in [`slotmap`] slot maps: a binary tree with parent
//! links and rotations, a skip list with injectable level counts, and singly and doubly linked
//! lists.
//!
//! Nodes are addressed by copyable keys instead of pointers. A handle whose node has been
//! removed is detected and rejected with [`ErrorKind::StaleHandle`].

mod config_constants;
mod error;
mod level_source;

mod binary_tree;
mod linked_list;
mod skip_list;


pub use self::{
    config_constants::{DEFAULT_LEVEL_SEED, DEFAULT_MAX_LEVEL},
    error::{Error, ErrorKind, ERROR_CATEGORY, Result, Side, Structure},
    level_source::{GeometricLevels, LevelSequence, LevelSource, Prng32},
};
pub use self::{
    binary_tree::{BinaryTree, InorderIter, TreeNode, TreeNodeId},
    linked_list::{
        DoublyIter, DoublyLinkedList, DoublyNode, DoublyNodeId,
        SinglyIter, SinglyLinkedList, SinglyNode, SinglyNodeId,
    },
    skip_list::{LevelIter, SkipList, SkipNode, SkipNodeId},
};
