//! Builder for populated rings.

use crate::error::Result;
use crate::hash::{Murmur3, RingHasher};
use crate::ring::{Ring, DEFAULT_REPLICAS};

/// Builds a [`Ring`] from a node list in one go.
///
/// Useful at startup, when the ring is reconstructed from configuration.
///
/// # Example
///
/// ```rust
/// use corelib::hash::Xxh32;
/// use corelib::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .replicas(8)
///     .hasher(Xxh32)
///     .node("cache-a")
///     .nodes(["cache-b", "cache-c"])
///     .build()?;
///
/// assert_eq!(ring.node_count(), 3);
/// assert_eq!(ring.len(), 24);
/// # Ok::<(), corelib::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<H = Murmur3> {
    replicas: usize,
    hasher: H,
    nodes: Vec<String>,
}

impl RingBuilder<Murmur3> {
    /// Starts a builder with [`DEFAULT_REPLICAS`] and the MurmurHash3 hasher.
    pub fn new() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hasher: Murmur3,
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder<Murmur3> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: RingHasher> RingBuilder<H> {
    /// Sets the number of virtual nodes per physical node.
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Replaces the hasher.
    pub fn hasher<H2: RingHasher>(self, hasher: H2) -> RingBuilder<H2> {
        RingBuilder {
            replicas: self.replicas,
            hasher,
            nodes: self.nodes,
        }
    }

    /// Queues a node to be added.
    pub fn node(mut self, name: impl Into<String>) -> Self {
        self.nodes.push(name.into());
        self
    }

    /// Queues several nodes to be added, in order.
    pub fn nodes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builds the ring.
    ///
    /// # Errors
    /// [`crate::Error::InvalidReplicas`] if the replica count is zero.
    pub fn build(self) -> Result<Ring<H>> {
        let mut ring = Ring::with_hasher(self.replicas, self.hasher)?;
        ring.add_nodes(&self.nodes);
        Ok(ring)
    }
}
