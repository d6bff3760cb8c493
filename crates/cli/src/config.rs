//! Command-line configuration.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hashring_core::partitioner::{Md5Partitioner, SipPartitioner, Xxh3Partitioner};
use hashring_core::{CollisionPolicy, HashRing, RingConfig};

use crate::commands::Command;
use crate::logging;

/// Collision policy as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Truncate,
    Rollback,
}

impl From<PolicyArg> for CollisionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Truncate => CollisionPolicy::Truncate,
            PolicyArg::Rollback => CollisionPolicy::Rollback,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PartitionerArg {
    Md5,
    Sip,
    Xxh3,
}

/// Consistent hash ring playground.
#[derive(Debug, Parser)]
#[command(name = "hashring", version)]
pub struct CliConfig {
    /// JSON file with ring settings; flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of positions on the ring
    #[arg(long, global = true)]
    pub ring_size: Option<u64>,

    /// Virtual nodes per server
    #[arg(long = "vnodes", global = true)]
    pub virtual_nodes: Option<u32>,

    /// Maximum number of active servers
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    /// What to do when a virtual node lands on an occupied position
    #[arg(long, value_enum, global = true)]
    pub policy: Option<PolicyArg>,

    #[arg(long, value_enum, global = true, default_value_t = PartitionerArg::Md5)]
    pub partitioner: PartitionerArg,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Resolve the ring configuration from the optional file and the flags.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => RingConfig::default(),
        };

        if let Some(ring_size) = self.ring_size {
            config.ring_size = ring_size;
        }
        if let Some(virtual_nodes) = self.virtual_nodes {
            config.virtual_nodes = virtual_nodes;
        }
        if let Some(capacity) = self.capacity {
            config.server_capacity = capacity;
        }
        if let Some(policy) = self.policy {
            config.collision_policy = policy.into();
        }

        config.validate().context("invalid ring configuration")?;
        Ok(config)
    }

    pub fn run(self) -> anyhow::Result<()> {
        logging::init(&self.log_level);
        let config = self.ring_config()?;
        tracing::debug!(?config, partitioner = ?self.partitioner, "starting");

        let mut out = io::stdout().lock();
        match self.partitioner {
            PartitionerArg::Md5 => {
                let ring = HashRing::with_partitioner(config, Md5Partitioner)?;
                self.command.execute(&ring, &mut out)?;
            }
            PartitionerArg::Sip => {
                let ring = HashRing::with_partitioner(config, SipPartitioner)?;
                self.command.execute(&ring, &mut out)?;
            }
            PartitionerArg::Xxh3 => {
                let ring = HashRing::with_partitioner(config, Xxh3Partitioner)?;
                self.command.execute(&ring, &mut out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "hashring", "--ring-size", "1024", "--vnodes", "4", "--policy", "rollback", "demo",
        ]);
        let config = cli.ring_config().unwrap();
        assert_eq!(config.ring_size, 1024);
        assert_eq!(config.virtual_nodes, 4);
        assert_eq!(config.server_capacity, 2);
        assert_eq!(config.collision_policy, CollisionPolicy::Rollback);
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("hashring-cli-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{ "ring_size": 4096, "server_capacity": 8 }}"#).unwrap();

        let cli = CliConfig::parse_from([
            "hashring",
            "--config",
            path.to_str().unwrap(),
            "--capacity",
            "3",
            "demo",
        ]);
        let config = cli.ring_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.ring_size, 4096);
        assert_eq!(config.server_capacity, 3);
    }

    #[test]
    fn test_zero_ring_size_rejected() {
        let cli = CliConfig::parse_from(["hashring", "--ring-size", "0", "demo"]);
        assert!(cli.ring_config().is_err());
    }
}
