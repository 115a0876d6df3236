//! Space accounting and profiling
//!
//! Tracks what a bag's chain holds so release can be checked against it

mod allocator;

pub use allocator::SpaceTracker;

/// Bytes charged per node on top of its item bytes (the node cell itself)
pub const NODE_OVERHEAD: usize = std::mem::size_of::<crate::bag::Node>();

/// What a release handed back to the allocator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Released {
    /// Nodes released
    pub nodes: usize,

    /// Item bytes released
    pub bytes: usize,
}

/// Detailed space profile (if enabled)
#[derive(Debug, Clone, Default)]
pub struct SpaceProfile {
    /// Maximum space used
    pub max_space: usize,

    /// Space after each insertion
    pub timeline: Vec<(usize, usize)>, // (node_count, space_used)

    /// Largest live item byte total
    pub item_bytes: usize,
    /// Copies handed out by the cursor
    pub copies_returned: usize,
    /// Bytes in those copies
    pub bytes_returned: usize,
}

impl SpaceProfile {
    /// Verify peak stayed within `bound`
    pub fn satisfies_bound(&self, bound: usize) -> bool {
        self.max_space <= bound
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Max space: {} bytes\nComponents:\n  Items: {}\n  Nodes: {}\n  Copies out: {} ({} bytes)",
            self.max_space,
            self.item_bytes,
            self.timeline.last().map(|&(nodes, _)| nodes).unwrap_or(0),
            self.copies_returned,
            self.bytes_returned
        )
    }
}
