//! Insertion-only bag
//!
//! Nodes live in an arena (`Vec<Node>`) and are chained newest-first by
//! `NodeId`. The arena is only ever appended to; a node's handle stays valid
//! for the life of the bag, which is what lets the embedded cursor survive
//! an `add` without dangling.

mod cursor;
mod node;

pub use cursor::CursorState;
pub use node::NodeId;

pub(crate) use node::Node;

use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::space::{Released, SpaceProfile, SpaceTracker};
use crate::{BagConfig, BagError};
use cursor::Cursor;

/// Insertion-only multiset of byte items
///
/// Every item is copied in on [`add`](Bag::add) and copied out on
/// [`next`](Bag::next). Copies are shallow: the bytes are duplicated as they
/// are, so if they encode handles or addresses only those values are
/// duplicated, never what they refer to.
#[derive(Debug)]
pub struct Bag {
    /// Node arena; slot order is insertion order
    nodes: Vec<Node>,

    /// Newest node, `None` when empty
    head: Option<NodeId>,

    /// The single iteration cursor
    cursor: Cursor,

    /// Bumped on every insertion
    generation: u64,

    space: SpaceTracker,
}

impl Bag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::with_config(BagConfig::default())
    }

    /// Create an empty bag with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(BagConfig::with_capacity(capacity))
    }

    /// Create an empty bag from a configuration
    pub fn with_config(config: BagConfig) -> Self {
        debug!(
            capacity_hint = config.capacity_hint,
            profile_space = config.profile_space,
            "bag created"
        );

        Self {
            nodes: Vec::with_capacity(config.capacity_hint),
            head: None,
            cursor: Cursor::new(),
            generation: 0,
            space: SpaceTracker::new(config.profile_space),
        }
    }

    /// Add a copy of `item`
    ///
    /// The bag keeps its own allocation; `item` may be changed or freed as
    /// soon as this returns. Aborts the process if allocation fails.
    pub fn add(&mut self, item: &[u8]) {
        self.link(Box::from(item));
    }

    /// Add a copy of `item`, reporting allocation failure
    ///
    /// On error the bag is unchanged.
    pub fn try_add(&mut self, item: &[u8]) -> Result<(), BagError> {
        let mut copy = Vec::new();
        copy.try_reserve_exact(item.len())
            .map_err(|_| BagError::AllocationFailed { bytes: item.len() })?;
        copy.extend_from_slice(item);

        self.nodes
            .try_reserve(1)
            .map_err(|_| BagError::AllocationFailed {
                bytes: std::mem::size_of::<Node>(),
            })?;

        self.link(copy.into_boxed_slice());
        Ok(())
    }

    fn link(&mut self, item: Box<[u8]>) {
        let id = NodeId::new(self.nodes.len());
        let len = item.len();

        self.nodes.push(Node::new(item, self.head));
        self.head = Some(id);
        self.generation += 1;
        self.space.allocate_node(len);

        trace!(node = %id, len, count = self.nodes.len(), "item added");
    }

    /// Number of items
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no item was ever added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insertion counter, bumped by every `add`
    ///
    /// Two equal readings mean no item was added in between.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// State of the embedded cursor
    #[inline]
    pub fn cursor_state(&self) -> CursorState {
        self.cursor.state()
    }

    /// Space accounting for the chain
    pub fn space(&self) -> &SpaceTracker {
        &self.space
    }

    /// Take the space profile (profiling stops)
    pub fn take_profile(&mut self) -> Option<SpaceProfile> {
        self.space.take_profile()
    }

    /// Step the embedded cursor and return a copy of the item under it
    ///
    /// With `reset` the cursor moves to the first item; otherwise it moves to
    /// the successor of the last item returned. Returns `None` when the bag
    /// is empty, when the cursor runs past the last item, and when advancing
    /// before any reset.
    ///
    /// Adding items between a reset and the end of the traversal is a caller
    /// error: the traversal carries on over the items present at the reset
    /// and skips the new ones. Use [`try_next`](Bag::try_next) to have that
    /// reported instead.
    pub fn next(&mut self, reset: bool) -> Option<Vec<u8>> {
        let id = self.step(reset)?;
        let node = &self.nodes[id.index()];
        self.space.record_copy_out(node.len());
        Some(node.item().to_vec())
    }

    /// Checked version of [`next`](Bag::next)
    ///
    /// # Errors
    ///
    /// - [`BagError::CursorNotStarted`] when advancing before any reset
    /// - [`BagError::ConcurrentModification`] when advancing after an `add`
    ///   that followed the last reset
    /// - [`BagError::AllocationFailed`] when the copy cannot be allocated
    pub fn try_next(&mut self, reset: bool) -> Result<Option<Vec<u8>>, BagError> {
        if !reset {
            if !self.cursor.is_started() {
                return Err(BagError::CursorNotStarted);
            }
            if self.cursor.generation() != self.generation {
                warn!(
                    started = self.cursor.generation(),
                    current = self.generation,
                    "bag modified during iteration"
                );
                return Err(BagError::ConcurrentModification {
                    started: self.cursor.generation(),
                    current: self.generation,
                });
            }
        }

        let id = match self.step(reset) {
            Some(id) => id,
            None => return Ok(None),
        };

        let item = self.nodes[id.index()].item();
        let mut copy = Vec::new();
        copy.try_reserve_exact(item.len())
            .map_err(|_| BagError::AllocationFailed { bytes: item.len() })?;
        copy.extend_from_slice(item);

        self.space.record_copy_out(copy.len());
        Ok(Some(copy))
    }

    fn step(&mut self, reset: bool) -> Option<NodeId> {
        let id = if reset {
            self.cursor.reset(self.head, self.generation)
        } else {
            let nodes = &self.nodes;
            self.cursor.advance(|id| nodes[id.index()].next())
        };

        trace!(reset, node = ?id, state = ?self.cursor.state(), "cursor moved");
        id
    }

    /// Borrowing iterator over stored items, in cursor order
    ///
    /// Independent of the embedded cursor.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            link: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Release every node and report what was freed
    pub fn destroy(mut self) -> Released {
        let released = self.release_chain();
        debug!(
            nodes = released.nodes,
            bytes = released.bytes,
            "bag destroyed"
        );
        released
    }

    /// Walk the chain from head, freeing one node per iteration
    fn release_chain(&mut self) -> Released {
        let mut released = Released::default();
        let mut link = self.head.take();

        while let Some(id) = link {
            let (item, next) = self.nodes[id.index()].release();
            released.nodes += 1;
            released.bytes += item.len();
            drop(item);
            link = next;
        }

        self.nodes.clear();
        self.cursor = Cursor::new();

        let tracked = self.space.release_all();
        debug_assert_eq!(tracked, released);
        released
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Bag {
    fn drop(&mut self) {
        if self.head.is_some() {
            let released = self.release_chain();
            debug!(
                nodes = released.nodes,
                bytes = released.bytes,
                "bag dropped"
            );
        }
    }
}

impl<'a> Extend<&'a [u8]> for Bag {
    fn extend<I: IntoIterator<Item = &'a [u8]>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a> FromIterator<&'a [u8]> for Bag {
    fn from_iter<I: IntoIterator<Item = &'a [u8]>>(iter: I) -> Self {
        let mut bag = Bag::new();
        bag.extend(iter);
        bag
    }
}

impl<'a> IntoIterator for &'a Bag {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator returned by [`Bag::iter`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    nodes: &'a [Node],
    link: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.link?.index()];
        self.link = node.next();
        self.remaining -= 1;
        Some(node.item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
