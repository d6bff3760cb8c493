//! Logging initialization for the CLI.
//!
//! Plain `tracing-subscriber` with the `fmt` layer, writing to stderr so
//! command output on stdout stays machine readable. `RUST_LOG` wins over the
//! `--log-level` flag.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. Call once, before any `tracing` events.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
