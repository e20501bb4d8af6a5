//! Forwarding information base entries

use crate::face::FaceId;
use crate::packet::Name;

/// A candidate upstream face for a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibNextHop {
    /// Upstream face
    pub face: FaceId,
    /// Routing cost (lower is better)
    pub cost: u32,
}

/// Routing information for one name prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibEntry {
    prefix: Name,
    next_hops: Vec<FibNextHop>,
}

impl FibEntry {
    /// Create an entry with no next hops
    pub fn new(prefix: Name) -> Self {
        Self {
            prefix,
            next_hops: Vec::new(),
        }
    }

    /// Add or update a next hop, keeping hops sorted by cost then face
    pub fn add_next_hop(&mut self, face: FaceId, cost: u32) {
        match self.next_hops.iter_mut().find(|h| h.face == face) {
            Some(hop) => hop.cost = cost,
            None => self.next_hops.push(FibNextHop { face, cost }),
        }
        self.next_hops.sort_by_key(|h| (h.cost, h.face));
    }

    /// Builder-style variant of [`FibEntry::add_next_hop`]
    pub fn with_next_hop(mut self, face: FaceId, cost: u32) -> Self {
        self.add_next_hop(face, cost);
        self
    }

    /// Remove a next hop
    pub fn remove_next_hop(&mut self, face: FaceId) {
        self.next_hops.retain(|h| h.face != face);
    }

    /// The prefix this entry routes
    pub fn prefix(&self) -> &Name {
        &self.prefix
    }

    /// Next hops, cheapest first
    pub fn next_hops(&self) -> &[FibNextHop] {
        &self.next_hops
    }

    /// Whether a face is a next hop of this entry
    pub fn has_next_hop(&self, face: FaceId) -> bool {
        self.next_hops.iter().any(|h| h.face == face)
    }
}
