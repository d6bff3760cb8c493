//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting virtual-node labels and keys
//! into digests that the ring reduces to positions.

pub mod md5;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use self::md5::Md5Partitioner;
pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;
