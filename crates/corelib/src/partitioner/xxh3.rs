//! XXH3 partitioner (128-bit output).

use xxhash_rust::xxh3::xxh3_128;

use crate::partitioner::traits::Partitioner;

/// XXH3-128, the fastest of the bundled partitioners.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    fn digest(&self, key: &[u8]) -> u128 {
        xxh3_128(key)
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
