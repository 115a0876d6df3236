//! Space tracking for the node chain

use super::{Released, SpaceProfile, NODE_OVERHEAD};

/// Tracks space held by a bag's chain
#[derive(Debug)]
pub struct SpaceTracker {
    /// Live nodes
    nodes: usize,

    /// Live item bytes
    item_bytes: usize,

    /// Peak of `current_space()`
    max: usize,

    /// Copies handed out by the cursor
    copies_returned: usize,

    /// Profile data (if enabled)
    profile: Option<SpaceProfile>,
}

impl SpaceTracker {
    /// Create new tracker
    pub fn new(profile_enabled: bool) -> Self {
        Self {
            nodes: 0,
            item_bytes: 0,
            max: 0,
            copies_returned: 0,
            profile: if profile_enabled {
                Some(SpaceProfile::default())
            } else {
                None
            },
        }
    }

    /// Account for one node and its item buffer
    pub(crate) fn allocate_node(&mut self, item_len: usize) {
        self.nodes += 1;
        self.item_bytes += item_len;
        self.update_max();

        let space = self.current_space();
        let nodes = self.nodes;
        if let Some(ref mut p) = self.profile {
            p.item_bytes = p.item_bytes.max(self.item_bytes);
            p.timeline.push((nodes, space));
        }
    }

    /// Account for one copy handed to a caller
    pub(crate) fn record_copy_out(&mut self, item_len: usize) {
        self.copies_returned += 1;

        if let Some(ref mut p) = self.profile {
            p.copies_returned += 1;
            p.bytes_returned += item_len;
        }
    }

    /// Zero live usage; peak and profile are kept
    pub(crate) fn release_all(&mut self) -> Released {
        let released = Released {
            nodes: self.nodes,
            bytes: self.item_bytes,
        };
        self.nodes = 0;
        self.item_bytes = 0;
        released
    }

    fn update_max(&mut self) {
        self.max = self.max.max(self.current_space());

        if let Some(ref mut p) = self.profile {
            p.max_space = self.max;
        }
    }

    /// Live nodes
    pub fn live_nodes(&self) -> usize {
        self.nodes
    }

    /// Live item bytes
    pub fn item_bytes(&self) -> usize {
        self.item_bytes
    }

    /// Item bytes plus per-node overhead
    pub fn current_space(&self) -> usize {
        self.item_bytes + self.nodes * NODE_OVERHEAD
    }

    /// Get maximum space used
    pub fn max_space_used(&self) -> usize {
        self.max
    }

    /// Copies handed out so far
    pub fn copies_returned(&self) -> usize {
        self.copies_returned
    }

    /// Borrow the profile, if profiling is on
    pub fn profile(&self) -> Option<&SpaceProfile> {
        self.profile.as_ref()
    }

    /// Take profile (profiling stops)
    pub fn take_profile(&mut self) -> Option<SpaceProfile> {
        self.profile.take()
    }
}
