//! Ring configuration.
//!
//! Everything here is fixed for the lifetime of a ring. The defaults are the
//! classic demo sizing: a 360-position ring, two virtual nodes per server and
//! room for two servers.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ring::RingSpace;

pub const DEFAULT_RING_SIZE: u64 = 360;
pub const DEFAULT_VIRTUAL_NODES: u32 = 2;
pub const DEFAULT_SERVER_CAPACITY: usize = 2;

pub(crate) const DEFAULT_RING_SPACE: NonZeroU64 = match NonZeroU64::new(DEFAULT_RING_SIZE) {
    Some(size) => size,
    None => panic!("DEFAULT_RING_SIZE must be positive"),
};

/// What `add_server` does when a virtual node hashes onto an occupied
/// position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Stop placing at the first collision and keep what was placed.
    ///
    /// The server stays active even with zero positions. The returned
    /// `Placement` lists the collision and how many replicas were skipped.
    #[default]
    Truncate,
    /// Undo every position placed by this call, leave the server inactive and
    /// fail with `Error::PlacementCollision`.
    Rollback,
}

/// Construction-time parameters of a `HashRing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of positions on the ring (`1..=ring_size`).
    pub ring_size: u64,
    /// Virtual nodes placed per server.
    pub virtual_nodes: u32,
    /// Maximum number of simultaneously active servers.
    pub server_capacity: usize,
    pub collision_policy: CollisionPolicy,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            ring_size: DEFAULT_RING_SIZE,
            virtual_nodes: DEFAULT_VIRTUAL_NODES,
            server_capacity: DEFAULT_SERVER_CAPACITY,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl RingConfig {
    /// Check that every size is positive.
    pub fn validate(&self) -> Result<()> {
        if self.ring_size == 0 {
            return Err(Error::InvalidConfig("ring_size must be positive".into()));
        }
        if self.virtual_nodes == 0 {
            return Err(Error::InvalidConfig("virtual_nodes must be positive".into()));
        }
        if self.server_capacity == 0 {
            return Err(Error::InvalidConfig("server_capacity must be positive".into()));
        }
        Ok(())
    }

    /// The position space described by `ring_size`.
    pub fn space(&self) -> Result<RingSpace> {
        NonZeroU64::new(self.ring_size)
            .map(RingSpace::new)
            .ok_or_else(|| Error::InvalidConfig("ring_size must be positive".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ring_size, 360);
        assert_eq!(config.virtual_nodes, 2);
        assert_eq!(config.server_capacity, 2);
        assert_eq!(config.collision_policy, CollisionPolicy::Truncate);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        for config in [
            RingConfig { ring_size: 0, ..RingConfig::default() },
            RingConfig { virtual_nodes: 0, ..RingConfig::default() },
            RingConfig { server_capacity: 0, ..RingConfig::default() },
        ] {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: RingConfig =
            serde_json::from_str(r#"{ "ring_size": 1024, "collision_policy": "rollback" }"#).unwrap();
        assert_eq!(config.ring_size, 1024);
        assert_eq!(config.virtual_nodes, DEFAULT_VIRTUAL_NODES);
        assert_eq!(config.collision_policy, CollisionPolicy::Rollback);
    }
}
