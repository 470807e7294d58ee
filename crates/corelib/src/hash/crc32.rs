//! CRC32 hasher implementation.

use crate::hash::traits::RingHasher;

/// CRC-32 (IEEE polynomial).
///
/// Cheap and widely available, but with weaker avalanche than the other
/// hashers; give it more replicas for an even spread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Crc32;

impl RingHasher for Crc32 {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u32 {
        crc32fast::hash(bytes)
    }

    fn name(&self) -> &'static str {
        "crc32"
    }
}
