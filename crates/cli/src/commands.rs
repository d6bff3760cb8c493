//! CLI commands.

use std::io::Write;

use anyhow::Context;
use clap::Subcommand;
use hashring_core::{HashRing, Partitioner, VirtualNode};

/// Servers and keys used by `demo`, in the order they are applied.
const DEMO_SERVERS: [&str; 4] = ["Server1", "Server2", "Server3", "Server4"];

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add four servers, resolve a key, remove one server, re-add another and
    /// resolve two more keys
    Demo,
    /// Resolve keys against a ring built from the given servers
    Route {
        /// Server to add (repeatable, applied in order)
        #[arg(short, long = "server", required = true)]
        servers: Vec<String>,

        /// Also print the ownership of every range on the ring
        #[arg(long)]
        topology: bool,

        #[arg(required = true)]
        keys: Vec<String>,
    },
}

/// A key and the virtual node it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub key: String,
    pub vnode: VirtualNode,
}

/// What a command resolved, in the order the keys were looked up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub resolved: Vec<Resolution>,
}

impl Command {
    /// Run the command against `ring`, writing human readable output to `out`.
    pub fn execute<P: Partitioner>(
        &self,
        ring: &HashRing<P>,
        out: &mut impl Write,
    ) -> anyhow::Result<CommandResult> {
        let mut result = CommandResult::default();
        match self {
            Command::Demo => {
                for server in DEMO_SERVERS {
                    add(ring, server, out)?;
                }
                result.resolved.push(resolve(ring, "someKey", out)?);

                remove(ring, "Server2", out)?;
                add(ring, "Server3", out)?;
                result.resolved.push(resolve(ring, "Apple", out)?);
                result.resolved.push(resolve(ring, "Banana", out)?);
            }
            Command::Route {
                servers,
                topology,
                keys,
            } => {
                for server in servers {
                    add(ring, server, out)?;
                }
                for key in keys {
                    result.resolved.push(resolve(ring, key, out)?);
                }
                if *topology {
                    print_topology(ring, out)?;
                }
            }
        }
        Ok(result)
    }
}

/// Membership rejections are reported and do not stop the command.
fn add<P: Partitioner>(ring: &HashRing<P>, server: &str, out: &mut impl Write) -> anyhow::Result<()> {
    match ring.add_server(server) {
        Ok(placement) => {
            for (position, vnode) in &placement.placed {
                writeln!(out, "Added virtual node: {vnode} at position: {position}")?;
            }
            if let Some(collision) = &placement.collision {
                writeln!(
                    out,
                    "Collision detected for virtual node: {} at position: {} (occupied by {}), {} replica(s) skipped",
                    collision.vnode,
                    collision.position,
                    collision.occupant,
                    placement.skipped_replicas()
                )?;
            }
        }
        Err(err) => writeln!(out, "Rejected {server}: {err}")?,
    }
    Ok(())
}

fn remove<P: Partitioner>(ring: &HashRing<P>, server: &str, out: &mut impl Write) -> anyhow::Result<()> {
    match ring.remove_server(server) {
        Ok(removal) => {
            for vacated in &removal.vacated {
                writeln!(
                    out,
                    "Removed virtual node: {} from position: {}",
                    vacated.vnode, vacated.position
                )?;
            }
        }
        Err(err) => writeln!(out, "Rejected {server}: {err}")?,
    }
    Ok(())
}

fn resolve<P: Partitioner>(ring: &HashRing<P>, key: &str, out: &mut impl Write) -> anyhow::Result<Resolution> {
    let vnode = ring
        .server_for_key(key)
        .with_context(|| format!("resolving key '{key}'"))?;
    writeln!(
        out,
        "Server for key '{key}' (pos: {}): {vnode}",
        ring.position(key)
    )?;
    Ok(Resolution {
        key: key.to_string(),
        vnode,
    })
}

fn print_topology<P: Partitioner>(ring: &HashRing<P>, out: &mut impl Write) -> anyhow::Result<()> {
    let topology = ring.topology();
    writeln!(out, "Ranges ({} positions):", topology.ring_size())?;
    for range in topology.ranges() {
        writeln!(
            out,
            "  ({}, {}] {} ({} positions)",
            range.start, range.end, range.vnode, range.len
        )?;
    }
    for (server, owned) in topology.ownership() {
        writeln!(
            out,
            "  {server}: {:.1}%",
            owned as f64 * 100.0 / topology.ring_size() as f64
        )?;
    }
    Ok(())
}
