//! xxHash32 hasher implementation.

use crate::hash::traits::RingHasher;

/// xxHash32 with seed 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Xxh32;

impl RingHasher for Xxh32 {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u32 {
        xxhash_rust::xxh32::xxh32(bytes, 0)
    }

    fn name(&self) -> &'static str {
        "xxh32"
    }
}
