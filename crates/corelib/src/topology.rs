//! Ring topology: who owns which part of the ring.
//!
//! A `Topology` is a snapshot taken from a `HashRing`. Under the successor
//! rule every occupied position owns the positions after the previous
//! occupied position up to and including itself, wrapping around the top of
//! the ring. The snapshot does not track later membership changes.

use std::collections::BTreeMap;

use crate::node::ServerId;
use crate::ring::{Position, RingSpace};
use crate::vnode::VirtualNode;

/// The clockwise arc `(start, end]` resolved to `vnode`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedRange {
    /// Exclusive start: the previous occupied position.
    pub start: Position,
    /// Inclusive end: the position `vnode` is stored at.
    pub end: Position,
    pub vnode: VirtualNode,
    /// Number of positions in the arc.
    pub len: u64,
}

impl OwnedRange {
    /// True if a key hashed to `position` resolves to this range.
    pub fn contains(&self, position: Position) -> bool {
        if self.start < self.end {
            self.start < position && position <= self.end
        } else {
            // Wraps past the top of the ring (or covers all of it).
            position > self.start || position <= self.end
        }
    }
}

/// Ownership snapshot of a ring.
#[derive(Clone, Debug)]
pub struct Topology {
    space: RingSpace,
    ranges: Vec<OwnedRange>,
}

impl Topology {
    pub(crate) fn new(space: RingSpace, vnodes: &BTreeMap<Position, VirtualNode>) -> Self {
        let mut ranges = Vec::with_capacity(vnodes.len());
        let mut previous = vnodes.keys().next_back().copied();

        for (&end, vnode) in vnodes {
            let start = previous.unwrap_or(end);
            ranges.push(OwnedRange {
                start,
                end,
                vnode: vnode.clone(),
                len: space.arc_len(start, end),
            });
            previous = Some(end);
        }

        Self { space, ranges }
    }

    /// Owned ranges in ascending order of their end position.
    pub fn ranges(&self) -> &[OwnedRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ring_size(&self) -> u64 {
        self.space.size()
    }

    /// The range a key hashed to `position` resolves to.
    pub fn range_for(&self, position: Position) -> Option<&OwnedRange> {
        self.ranges.iter().find(|range| range.contains(position))
    }

    /// Positions owned per server, summed over its virtual nodes.
    pub fn ownership(&self) -> BTreeMap<ServerId, u64> {
        let mut owned = BTreeMap::new();
        for range in &self.ranges {
            *owned.entry(range.vnode.server().clone()).or_insert(0) += range.len;
        }
        owned
    }

    /// Fraction of the ring owned by `server`, in `0.0..=1.0`.
    pub fn share(&self, server: &str) -> f64 {
        let owned: u64 = self
            .ranges
            .iter()
            .filter(|range| range.vnode.server() == server)
            .map(|range| range.len)
            .sum();
        owned as f64 / self.space.size() as f64
    }
}
