//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Partitioners turning labels and keys into digests
//! - Ring positions in a fixed, 1-based position space
//! - Servers and their virtual nodes
//! - The ring itself: membership, collision policy and successor lookup
//! - Ring topology (ownership of ranges)

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod topology;
pub mod vnode;

pub use config::{CollisionPolicy, RingConfig};
pub use error::{Error, Result};
pub use node::ServerId;
pub use partitioner::Partitioner;
pub use ring::{HashRing, Placement, Position, Removal, Ring, RingBuilder};
pub use topology::Topology;
pub use vnode::VirtualNode;
