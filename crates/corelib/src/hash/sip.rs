//! SipHash hasher implementation.

use crate::hash::traits::RingHasher;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 with zero keys, truncated to the low 32 bits.
///
/// Slower than the non-cryptographic hashers but resistant to crafted keys
/// piling onto a single node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sip32;

impl RingHasher for Sip32 {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u32 {
        let mut hasher = SipHasher13::new();
        hasher.write(bytes);
        hasher.finish() as u32
    }

    fn name(&self) -> &'static str {
        "sip32"
    }
}
