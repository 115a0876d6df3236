//! # Insertion-only byte bag
//!
//! A multiset container for type-erased items. Items go in as byte slices and
//! come out as owned byte vectors; the bag never aliases caller memory and
//! never interprets what the bytes mean.
//!
//! ## Structure
//!
//! 1. **Node chain**: each item lives in its own node; nodes are kept in an
//!    arena and linked newest-first by handle
//! 2. **Copy discipline**: bytes are copied on the way in and on the way out
//! 3. **Embedded cursor**: one reset/advance iteration state per bag
//! 4. **Space accounting**: live and peak usage of the chain
//!
//! There is no removal. The whole chain is released at once when the bag is
//! destroyed or dropped, using an iterative walk.
//!
//! ## Usage Example
//!
//! ```
//! use bytebag::Bag;
//!
//! let mut bag = Bag::new();
//! bag.add(b"a");
//! bag.add(b"bb");
//! bag.add(b"ccc");
//! assert_eq!(bag.len(), 3);
//!
//! let mut seen = Vec::new();
//! let mut item = bag.next(true);
//! while let Some(bytes) = item {
//!     seen.push(bytes);
//!     item = bag.next(false);
//! }
//! assert_eq!(seen.len(), 3);
//!
//! let released = bag.destroy();
//! assert_eq!(released.nodes, 3);
//! assert_eq!(released.bytes, 6);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod bag; // Node chain, cursor protocol, borrowing iterator
pub mod space; // Space accounting utilities

pub use bag::{Bag, CursorState, Iter, NodeId};
pub use space::{Released, SpaceProfile, SpaceTracker};

use thiserror::Error;

/// Configuration for a new bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagConfig {
    /// Node slots reserved up front
    pub capacity_hint: usize,

    /// Record a space timeline on every insertion
    pub profile_space: bool,
}

impl BagConfig {
    /// Configuration reserving room for `capacity_hint` items
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            capacity_hint,
            ..Self::default()
        }
    }

    /// Enable space profiling
    pub fn profiled(mut self) -> Self {
        self.profile_space = true;
        self
    }
}

impl Default for BagConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 0,
            profile_space: cfg!(feature = "profiling"),
        }
    }
}

/// Errors reported by the checked bag operations
///
/// The infallible `add`/`next` pair never returns these: allocation failure
/// aborts the process and protocol misuse is not detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BagError {
    /// A fallible reservation for a node or item buffer failed
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailed {
        /// Size of the reservation that failed
        bytes: usize,
    },

    /// Advance requested before any reset
    #[error("cursor advanced before any reset")]
    CursorNotStarted,

    /// Items were added after the cursor was reset
    #[error("bag modified during iteration (started at generation {started}, now {current})")]
    ConcurrentModification {
        /// Generation recorded when the cursor was reset
        started: u64,
        /// Generation of the bag at the failed advance
        current: u64,
    },
}
