//! Core library for consistent hashing.
//!
//! This crate provides the fundamental pieces of a consistent hash ring:
//! - Pluggable 32-bit hashers (MurmurHash3 by default)
//! - Virtual nodes and the sorted ring built from them
//! - A copy-on-write ring for concurrent readers
//! - Load distribution and remap analysis

pub mod distribution;
pub mod error;
pub mod hash;
pub mod ring;
pub mod vnode;

pub use distribution::{remaps, Distribution, Remap};
pub use error::{Error, Result};
pub use hash::{HasherKind, RingHasher};
pub use ring::{Ring, RingBuilder, SharedRing, DEFAULT_REPLICAS};
pub use vnode::VirtualNode;
