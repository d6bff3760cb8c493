//! Core partitioner trait definitions.

/// A partitioner converts labels and keys into a uniformly distributed
/// 128-bit digest. The ring reduces the digest into its own position space.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// hashing without synchronization overhead.
pub trait Partitioner: Send + Sync + 'static {
    /// Digest `key` into an unsigned 128-bit integer.
    ///
    /// Must be deterministic across calls and across process runs.
    fn digest(&self, key: &[u8]) -> u128;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
