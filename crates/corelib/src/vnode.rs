//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Each physical server is placed on the ring several times, once per replica
//! index. Every replica is identified by a label of the form
//! `"<server>:<replica-index>"` and the label, not the server id, is what gets
//! hashed to a ring position. This provides:
//!
//! 1. **Better Load Distribution**: more positions per server smooth out the
//!    size of the arcs each server owns
//! 2. **Gradual Rebalancing**: when a server joins or leaves, the keys that
//!    move come from (or go to) several neighbours instead of one
//!
//! Replica indices are 1-based: a ring configured with `virtual_nodes = 2`
//! places `"Server1:1"` and `"Server1:2"`.

use std::fmt;

use crate::node::ServerId;

/// A virtual node on the hash ring.
///
/// # Invariants
///
/// - `replica` is in `1..=virtual_nodes` for the ring that created it
/// - The label (see [`VirtualNode::label`]) is unique per `(server, replica)`
///
/// # Example
///
/// ```rust
/// use hashring_core::{ServerId, VirtualNode};
///
/// let vnode = VirtualNode::new(ServerId::from("Server1"), 2);
/// assert_eq!(vnode.label(), "Server1:2");
/// assert_eq!(vnode.server().as_str(), "Server1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// The physical server that owns this virtual node.
    server: ServerId,
    /// 1-based replica index.
    replica: u32,
}

impl VirtualNode {
    /// Create a new virtual node.
    #[inline]
    pub fn new(server: ServerId, replica: u32) -> Self {
        Self { server, replica }
    }

    /// All virtual nodes of `server` for a ring with `count` replicas, in
    /// placement order (`1..=count`).
    pub fn replicas(server: &ServerId, count: u32) -> impl Iterator<Item = VirtualNode> + '_ {
        (1..=count).map(move |replica| VirtualNode::new(server.clone(), replica))
    }

    /// The label hashed to place this virtual node: `"<server>:<replica>"`.
    pub fn label(&self) -> String {
        format!("{}:{}", self.server, self.replica)
    }

    /// Get the owning server.
    #[inline]
    pub fn server(&self) -> &ServerId {
        &self.server
    }

    /// Get the 1-based replica index.
    #[inline]
    pub fn replica(&self) -> u32 {
        self.replica
    }

    /// Drop the replica index and keep the owning server.
    pub fn into_server(self) -> ServerId {
        self.server
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.server, self.replica)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnode_label() {
        let vnode = VirtualNode::new(ServerId::from("Server1"), 1);
        assert_eq!(vnode.label(), "Server1:1");
        assert_eq!(vnode.to_string(), vnode.label());
    }

    #[test]
    fn test_vnode_replicas_are_one_based() {
        let server = ServerId::from("Server7");
        let labels: Vec<String> = VirtualNode::replicas(&server, 3).map(|v| v.label()).collect();
        assert_eq!(labels, vec!["Server7:1", "Server7:2", "Server7:3"]);
    }

    #[test]
    fn test_vnode_keeps_colons_in_server_id() {
        let vnode = VirtualNode::new(ServerId::from("10.0.0.1:11211"), 4);
        assert_eq!(vnode.label(), "10.0.0.1:11211:4");
        assert_eq!(vnode.server().as_str(), "10.0.0.1:11211");
        assert_eq!(vnode.replica(), 4);
    }
}
