//! Records of membership changes.
//!
//! `add_server` and `remove_server` report what they did to the index so
//! callers can surface it in diagnostics. The same events are also emitted
//! through `tracing`.

use crate::node::ServerId;
use crate::ring::Position;
use crate::vnode::VirtualNode;

/// A virtual node that hashed onto an already occupied position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    /// The virtual node that could not be placed.
    pub vnode: VirtualNode,
    pub position: Position,
    /// The virtual node already stored at `position`.
    pub occupant: VirtualNode,
}

/// Outcome of a successful `add_server`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub server: ServerId,
    /// Placed virtual nodes in replica order.
    pub placed: Vec<(Position, VirtualNode)>,
    /// The collision that ended placement early, if any.
    pub collision: Option<Collision>,
    /// Virtual nodes the ring is configured to place per server.
    pub requested: u32,
}

impl Placement {
    /// True if every configured replica was placed.
    pub fn is_complete(&self) -> bool {
        self.collision.is_none() && self.placed.len() == self.requested as usize
    }

    /// Replicas that were not placed, including the colliding one.
    pub fn skipped_replicas(&self) -> u32 {
        self.requested.saturating_sub(self.placed.len() as u32)
    }

    pub fn positions(&self) -> Vec<Position> {
        self.placed.iter().map(|(pos, _)| *pos).collect()
    }
}

/// One position cleared by `remove_server`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vacated {
    /// The removed server's virtual node whose position was cleared.
    pub vnode: VirtualNode,
    pub position: Position,
    /// What was actually stored at `position`. `None` if the replica was
    /// never placed; a different server's virtual node if placement of this
    /// replica had collided.
    pub evicted: Option<VirtualNode>,
}

/// Outcome of a successful `remove_server`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub server: ServerId,
    pub vacated: Vec<Vacated>,
}

impl Removal {
    /// Number of index entries actually removed.
    pub fn removed_count(&self) -> usize {
        self.vacated.iter().filter(|v| v.evicted.is_some()).count()
    }

    /// Virtual nodes of other servers that were evicted by positional removal.
    pub fn foreign_evictions(&self) -> impl Iterator<Item = &VirtualNode> + '_ {
        self.vacated
            .iter()
            .filter_map(|v| v.evicted.as_ref())
            .filter(move |evicted| evicted.server() != &self.server)
    }
}
