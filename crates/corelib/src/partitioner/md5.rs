//! MD5 partitioner.

use md5::{Digest, Md5};

use crate::partitioner::traits::Partitioner;

/// MD5 digest read as a big-endian unsigned integer.
///
/// This is the default partitioner. It places `"Server1:1"` at 153 on a
/// 360-position ring, so rings built with it line up with existing MD5-based
/// deployments of the same scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5Partitioner;

impl Partitioner for Md5Partitioner {
    fn digest(&self, key: &[u8]) -> u128 {
        let hash = Md5::digest(key);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash);
        u128::from_be_bytes(bytes)
    }

    fn name(&self) -> &'static str {
        "Md5Partitioner"
    }
}
