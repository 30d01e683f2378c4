mod doubly;
mod singly;


pub use self::{
    doubly::{DoublyIter, DoublyLinkedList, DoublyNode, DoublyNodeId},
    singly::{SinglyIter, SinglyLinkedList, SinglyNode, SinglyNodeId},
};
