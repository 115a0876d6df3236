//! Chain node representation
//!
//! Node = owned byte copy + link to the next node
//! Nodes sit in the bag's arena and refer to each other by `NodeId`,
//! so no node ever holds a pointer into another.

use std::fmt;

/// Handle of a node inside a bag's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena slot of this node
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One storage cell of the chain
#[derive(Debug)]
pub(crate) struct Node {
    /// Independent copy of the item's bytes; its length is the item length
    item: Box<[u8]>,

    /// Successor, `None` at the tail
    next: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(item: Box<[u8]>, next: Option<NodeId>) -> Self {
        Self { item, next }
    }

    #[inline]
    pub(crate) fn item(&self) -> &[u8] {
        &self.item
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.item.len()
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Detach the successor link and the byte buffer, leaving an empty cell
    pub(crate) fn release(&mut self) -> (Box<[u8]>, Option<NodeId>) {
        (std::mem::take(&mut self.item), self.next.take())
    }
}
