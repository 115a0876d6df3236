//! Embedded iteration cursor
//!
//! One cursor per bag. `reset` moves it to the head, `advance` follows the
//! successor link. The cursor only stores a handle, never a borrow, so the
//! bag stays mutable while an iteration is in progress.

use super::NodeId;

/// Observable state of a bag's cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No iteration started, or reset on an empty bag
    Uninitialized,

    /// Positioned on a node
    Active,

    /// Advanced past the tail; stays here until the next reset
    Exhausted,
}

/// Cursor state machine
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor {
    state: CursorState,

    /// Current node while `Active`
    position: Option<NodeId>,

    /// Bag generation captured at the last reset
    generation: u64,

    /// Set by the first reset
    started: bool,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            state: CursorState::Uninitialized,
            position: None,
            generation: 0,
            started: false,
        }
    }

    /// Move to `head`; returns the node to yield, if any
    pub(crate) fn reset(&mut self, head: Option<NodeId>, generation: u64) -> Option<NodeId> {
        self.started = true;
        self.generation = generation;
        self.position = head;
        self.state = match head {
            Some(_) => CursorState::Active,
            None => CursorState::Uninitialized,
        };
        head
    }

    /// Step to the successor of the current node
    ///
    /// `successor` maps a node to its link. Outside `Active` nothing moves.
    pub(crate) fn advance<F>(&mut self, successor: F) -> Option<NodeId>
    where
        F: FnOnce(NodeId) -> Option<NodeId>,
    {
        let current = match (self.state, self.position) {
            (CursorState::Active, Some(node)) => node,
            _ => return None,
        };

        let next = successor(current);
        self.position = next;
        if next.is_none() {
            self.state = CursorState::Exhausted;
        }
        next
    }

    #[inline]
    pub(crate) fn state(&self) -> CursorState {
        self.state
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub(crate) fn is_started(&self) -> bool {
        self.started
    }
}
