//! Error types for the core library.

use thiserror::Error;

use crate::node::ServerId;
use crate::ring::Position;
use crate::vnode::VirtualNode;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Only `NoAvailableNodes` and `InvalidConfig` mean the caller could not get
/// what it asked for at all. The membership rejections leave the ring exactly
/// as it was and are safe to log and ignore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The server is already active on the ring.
    #[error("server already exists: {0}")]
    DuplicateServer(ServerId),

    /// The server is not active on the ring.
    #[error("server does not exist: {0}")]
    UnknownServer(ServerId),

    /// The ring already holds `capacity` active servers.
    #[error("cannot add more servers, limit of {capacity} reached")]
    CapacityReached { capacity: usize },

    /// A virtual node hashed onto an occupied position and the placement was
    /// rolled back.
    #[error("collision for virtual node {vnode} at position {position} (occupied by {occupant})")]
    PlacementCollision {
        vnode: VirtualNode,
        position: Position,
        occupant: VirtualNode,
    },

    /// The ring has no occupied positions to resolve a key against.
    #[error("no available nodes on the ring")]
    NoAvailableNodes,

    /// Invalid ring configuration
    #[error("invalid ring configuration: {0}")]
    InvalidConfig(String),
}
