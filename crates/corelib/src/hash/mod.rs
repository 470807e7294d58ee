//! Hash function abstraction for ring placement.
//!
//! A hasher maps an arbitrary byte sequence to a 32-bit ring position. Both
//! virtual-node placement and key lookup go through the same hasher, so the
//! ring only stays reproducible across restarts if the hasher is
//! deterministic.

pub mod crc32;
pub mod kind;
pub mod murmur3;
pub mod sip;
pub mod traits;
pub mod xxhash;

pub use crc32::Crc32;
pub use kind::HasherKind;
pub use murmur3::Murmur3;
pub use sip::Sip32;
pub use traits::RingHasher;
pub use xxhash::Xxh32;
