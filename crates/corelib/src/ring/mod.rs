//! Consistent hash ring implementation.
//!
//! The ring manages virtual-node positions and provides lookup operations
//! for finding the virtual node responsible for a key.

pub mod placement;
pub mod position;
pub mod ring;

pub use placement::{Collision, Placement, Removal, Vacated};
pub use position::{Position, RingSpace};
pub use ring::{HashRing, RingBuilder};

/// Alias for the main ring type (used by lib.rs).
pub type Ring = HashRing;
