//! MurmurHash3 hasher implementation.

use crate::hash::traits::RingHasher;

/// MurmurHash3 (x86, 32-bit, seed 0). The default ring hasher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur3;

impl RingHasher for Murmur3 {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u32 {
        // Reading from an in-memory slice cannot fail, so the error arm is dead.
        murmur3::murmur3_32(&mut &bytes[..], 0).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "murmur3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_murmur3_known_vectors() {
        assert_eq!(Murmur3.hash(b""), 0);
        assert_eq!(Murmur3.hash(b"test"), 0xba6b_d213);
    }

    #[test]
    fn test_murmur3_deterministic() {
        assert_eq!(Murmur3.hash(b"db10"), Murmur3.hash(b"db10"));
        assert_ne!(Murmur3.hash(b"db10"), Murmur3.hash(b"db11"));
    }
}
