//! Hash ring data structure.
//!
//! Holds the position index (`BTreeMap<Position, VirtualNode>`), the set of
//! active servers and the lookup logic.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, info, trace, warn};

use crate::config::{CollisionPolicy, RingConfig, DEFAULT_RING_SPACE};
use crate::error::{Error, Result};
use crate::node::ServerId;
use crate::partitioner::{Md5Partitioner, Partitioner};
use crate::ring::placement::{Collision, Placement, Removal, Vacated};
use crate::ring::position::{Position, RingSpace};
use crate::topology::Topology;
use crate::vnode::VirtualNode;

/// Mutable part of the ring, only changed while the write lock is held.
#[derive(Debug, Default)]
struct RingState {
    servers: BTreeSet<ServerId>,
    vnodes: BTreeMap<Position, VirtualNode>,
}

impl RingState {
    /// First occupied position at or after `position`, wrapping to the
    /// smallest occupied position.
    fn successor(&self, position: Position) -> Option<(&Position, &VirtualNode)> {
        self.vnodes
            .range(position..)
            .next()
            .or_else(|| self.vnodes.iter().next())
    }
}

/// Consistent hash ring.
///
/// Servers are placed on the ring through `virtual_nodes` labels each; keys
/// resolve to the first occupied position clockwise from their own.
///
/// The ring is shared through `&self`: lookups take a read lock and run in
/// parallel, membership changes take the write lock for their whole duration
/// so a lookup never observes a half-applied add or remove.
///
/// # Example
///
/// ```rust
/// use hashring_core::HashRing;
///
/// let ring = HashRing::new();
/// ring.add_server("Server1").unwrap();
/// ring.add_server("Server2").unwrap();
///
/// let vnode = ring.server_for_key("someKey").unwrap();
/// assert_eq!(vnode.label(), "Server1:2");
/// ```
pub struct HashRing<P = Md5Partitioner> {
    config: RingConfig,
    space: RingSpace,
    partitioner: P,
    state: RwLock<RingState>,
}

impl HashRing<Md5Partitioner> {
    /// Ring with the default configuration and the MD5 partitioner.
    pub fn new() -> Self {
        Self::from_parts(
            RingConfig::default(),
            RingSpace::new(DEFAULT_RING_SPACE),
            Md5Partitioner,
        )
    }

    /// Ring with the MD5 partitioner.
    pub fn with_config(config: RingConfig) -> Result<Self> {
        Self::with_partitioner(config, Md5Partitioner)
    }
}

impl Default for HashRing<Md5Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    pub fn with_partitioner(config: RingConfig, partitioner: P) -> Result<Self> {
        config.validate()?;
        let space = config.space()?;
        Ok(Self::from_parts(config, space, partitioner))
    }

    fn from_parts(config: RingConfig, space: RingSpace, partitioner: P) -> Self {
        Self {
            config,
            space,
            partitioner,
            state: RwLock::new(RingState::default()),
        }
    }

    /// Ring position of an arbitrary label or key, in `1..=ring_size`.
    pub fn position<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Position {
        self.space.reduce(self.partitioner.digest(key.as_ref()))
    }

    fn vnode_positions(&self, server: &ServerId) -> Vec<(Position, VirtualNode)> {
        VirtualNode::replicas(server, self.config.virtual_nodes)
            .map(|vnode| (self.position(&vnode.label()), vnode))
            .collect()
    }

    /// Activate `server` and place its virtual nodes.
    ///
    /// Rejected without touching the ring if the server is already active or
    /// the ring is at capacity. Replicas are placed in order `1..=virtual_nodes`
    /// and placement stops at the first occupied position; what happens then
    /// depends on the configured [`CollisionPolicy`].
    pub fn add_server(&self, server: impl Into<ServerId>) -> Result<Placement> {
        let server = server.into();
        let candidates = self.vnode_positions(&server);

        let mut state = self.state.write();
        if state.servers.contains(&server) {
            warn!(%server, "server already exists");
            return Err(Error::DuplicateServer(server));
        }
        if state.servers.len() >= self.config.server_capacity {
            warn!(%server, capacity = self.config.server_capacity, "cannot add more servers, limit reached");
            return Err(Error::CapacityReached {
                capacity: self.config.server_capacity,
            });
        }

        let mut placed = Vec::with_capacity(candidates.len());
        let mut collision = None;
        for (position, vnode) in candidates {
            if let Some(occupant) = state.vnodes.get(&position) {
                warn!(%vnode, %position, %occupant, "collision detected for virtual node");
                collision = Some(Collision {
                    vnode,
                    position,
                    occupant: occupant.clone(),
                });
                break;
            }
            debug!(%vnode, %position, "added virtual node");
            state.vnodes.insert(position, vnode.clone());
            placed.push((position, vnode));
        }

        if self.config.collision_policy == CollisionPolicy::Rollback {
            if let Some(hit) = collision {
                for (position, _) in &placed {
                    state.vnodes.remove(position);
                }
                warn!(%server, rolled_back = placed.len(), "placement rolled back");
                return Err(Error::PlacementCollision {
                    vnode: hit.vnode,
                    position: hit.position,
                    occupant: hit.occupant,
                });
            }
        }

        state.servers.insert(server.clone());
        drop(state);

        let placement = Placement {
            server,
            placed,
            collision,
            requested: self.config.virtual_nodes,
        };
        info!(
            server = %placement.server,
            placed = placement.placed.len(),
            skipped = placement.skipped_replicas(),
            "added server"
        );
        Ok(placement)
    }

    /// Deactivate `server` and clear the positions of all its virtual nodes.
    ///
    /// Removal is positional: every replica position is cleared whether or
    /// not this server's virtual node is the one stored there. Under
    /// [`CollisionPolicy::Truncate`] that can evict another server's virtual
    /// node; the returned [`Removal`] reports it.
    pub fn remove_server(&self, server: impl Into<ServerId>) -> Result<Removal> {
        let server = server.into();
        let positions = self.vnode_positions(&server);

        let mut state = self.state.write();
        if !state.servers.remove(&server) {
            warn!(%server, "server does not exist");
            return Err(Error::UnknownServer(server));
        }

        let mut vacated = Vec::with_capacity(positions.len());
        for (position, vnode) in positions {
            let evicted = state.vnodes.remove(&position);
            match &evicted {
                Some(stored) if stored.server() != &server => {
                    warn!(%vnode, %position, evicted = %stored, "removed virtual node of another server");
                }
                Some(_) => debug!(%vnode, %position, "removed virtual node"),
                None => debug!(%vnode, %position, "position already vacant"),
            }
            vacated.push(Vacated {
                vnode,
                position,
                evicted,
            });
        }
        drop(state);

        let removal = Removal { server, vacated };
        info!(server = %removal.server, removed = removal.removed_count(), "removed server");
        Ok(removal)
    }

    /// Resolve `key` to the virtual node owning it.
    ///
    /// The result's label (`"Server1:2"`) is the full virtual node; use
    /// [`VirtualNode::server`] or [`HashRing::owner_for_key`] for the bare
    /// server id.
    pub fn server_for_key<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Result<VirtualNode> {
        let key_pos = self.position(key);
        let (node_pos, vnode) = self.successor(key_pos)?;
        trace!(%key_pos, %node_pos, %vnode, "resolved key");
        Ok(vnode)
    }

    /// Resolve `key` to the server owning it.
    pub fn owner_for_key<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Result<ServerId> {
        self.server_for_key(key).map(VirtualNode::into_server)
    }

    /// First occupied position at or after `position`, wrapping around.
    pub fn successor(&self, position: Position) -> Result<(Position, VirtualNode)> {
        let state = self.state.read();
        state
            .successor(position)
            .map(|(pos, vnode)| (*pos, vnode.clone()))
            .ok_or(Error::NoAvailableNodes)
    }

    /// Number of active servers.
    pub fn server_count(&self) -> usize {
        self.state.read().servers.len()
    }

    /// Number of occupied positions.
    pub fn vnode_count(&self) -> usize {
        self.state.read().vnodes.len()
    }

    /// True if no position is occupied.
    pub fn is_empty(&self) -> bool {
        self.state.read().vnodes.is_empty()
    }

    pub fn contains_server(&self, server: &str) -> bool {
        self.state.read().servers.contains(server)
    }

    /// Active servers in ascending order.
    pub fn servers(&self) -> Vec<ServerId> {
        self.state.read().servers.iter().cloned().collect()
    }

    /// Occupied positions in ascending order.
    pub fn vnodes(&self) -> Vec<(Position, VirtualNode)> {
        self.state
            .read()
            .vnodes
            .iter()
            .map(|(pos, vnode)| (*pos, vnode.clone()))
            .collect()
    }

    /// Ownership snapshot of the current index.
    pub fn topology(&self) -> Topology {
        Topology::new(self.space, &self.state.read().vnodes)
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn ring_size(&self) -> u64 {
        self.space.size()
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}

impl<P: Partitioner> fmt::Debug for HashRing<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("config", &self.config)
            .field("partitioner", &self.partitioner.name())
            .field("servers", &state.servers)
            .field("vnodes", &state.vnodes)
            .finish()
    }
}

/// Fluent construction of a [`HashRing`].
///
/// Seed servers are added through [`HashRing::add_server`] in the order they
/// were given, so capacity and collision rules apply to them and `build`
/// fails on the first rejected seed.
#[derive(Debug)]
pub struct RingBuilder<P = Md5Partitioner> {
    config: RingConfig,
    partitioner: P,
    servers: Vec<ServerId>,
}

impl RingBuilder<Md5Partitioner> {
    pub fn new() -> Self {
        Self {
            config: RingConfig::default(),
            partitioner: Md5Partitioner,
            servers: Vec::new(),
        }
    }
}

impl Default for RingBuilder<Md5Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    /// Replace the whole configuration.
    pub fn with_config(mut self, config: RingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_ring_size(mut self, ring_size: u64) -> Self {
        self.config.ring_size = ring_size;
        self
    }

    /// Virtual nodes per server.
    pub fn with_vnodes(mut self, virtual_nodes: u32) -> Self {
        self.config.virtual_nodes = virtual_nodes;
        self
    }

    /// Maximum number of active servers.
    pub fn with_capacity(mut self, server_capacity: usize) -> Self {
        self.config.server_capacity = server_capacity;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            config: self.config,
            partitioner,
            servers: self.servers,
        }
    }

    /// Seed a server, added when the ring is built.
    pub fn add_server(mut self, server: impl Into<ServerId>) -> Self {
        self.servers.push(server.into());
        self
    }

    pub fn build(self) -> Result<HashRing<P>> {
        let ring = HashRing::with_partitioner(self.config, self.partitioner)?;
        for server in self.servers {
            ring.add_server(server)?;
        }
        Ok(ring)
    }
}
