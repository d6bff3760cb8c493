//! CLI tool for consistent hash rings.
//!
//! Provides commands for:
//! - Replaying the classic add/remove/resolve demo
//! - Routing keys against a ring built from a server list
//! - Inspecting ring ownership

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{Command, CommandResult, Resolution};
pub use config::CliConfig;
