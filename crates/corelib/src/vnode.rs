//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node having a single position on the ring, each
//! node is placed `replicas` times, once per hashed offset. This provides:
//!
//! 1. **Better Load Distribution**: More positions = smoother distribution of keys
//! 2. **Gradual Rebalancing**: When nodes join/leave, only a fraction of keys move
//!
//! # Typical Configuration
//!
//! - **Small clusters** (< 10 nodes): 100-300 vnodes/node
//! - **Large clusters** (> 100 nodes): 40-160 vnodes/node
//!
//! More vnodes = better distribution but more memory and a slower rebuild on
//! membership changes. Lookups stay O(log n) either way.

use std::fmt;

use crate::hash::RingHasher;

/// A virtual node on the hash ring.
///
/// Represents a single hash position owned by a physical node. Virtual nodes
/// are never mutated once placed; membership changes only add or drop them.
///
/// Two virtual nodes may share a hash if the hasher collides. The ring
/// tolerates this; which of them wins a lookup is decided by insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualNode {
    /// Position on the ring.
    pub hash: u32,

    /// The physical node that owns this position.
    pub owner: String,
}

impl VirtualNode {
    /// Create a new virtual node.
    #[inline]
    pub fn new(hash: u32, owner: impl Into<String>) -> Self {
        Self {
            hash,
            owner: owner.into(),
        }
    }

    /// Create the virtual node for replica `index` of `owner`.
    ///
    /// The position is the hash of the node name immediately followed by the
    /// decimal index, with no separator: replica 12 of `db1` hashes
    /// `"db112"`.
    ///
    /// # Example
    /// ```rust
    /// use corelib::VirtualNode;
    /// use corelib::hash::{Murmur3, RingHasher};
    ///
    /// let vnode = VirtualNode::from_index(&Murmur3, "db1", 0);
    /// assert_eq!(vnode.hash, Murmur3.hash(b"db10"));
    /// assert_eq!(vnode.owner, "db1");
    /// ```
    pub fn from_index<H: RingHasher + ?Sized>(hasher: &H, owner: &str, index: usize) -> Self {
        let key = format!("{owner}{index}");
        Self::new(hasher.hash(key.as_bytes()), owner)
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(hash={:08x}, node={})", self.hash, self.owner)
    }
}
