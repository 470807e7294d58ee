//! Consistent hash ring implementation.
//!
//! The ring manages virtual-node positions and provides efficient lookup
//! operations for finding the node responsible for a key.

pub mod builder;
pub mod ring;
pub mod shared;

pub use builder::RingBuilder;
pub use ring::Ring;
pub use shared::SharedRing;

/// Default number of virtual nodes per physical node.
pub const DEFAULT_REPLICAS: usize = 160;
