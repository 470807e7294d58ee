//! Hash ring data structure.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::hash::{Murmur3, RingHasher};
use crate::vnode::VirtualNode;

/// Consistent hash ring with virtual nodes.
///
/// Each physical node is placed `replicas` times on a 32-bit ring. A key is
/// owned by the first virtual node clockwise from the key's hash, wrapping
/// from the largest position back to the smallest.
///
/// # Invariants
///
/// - `entries` is sorted ascending by hash whenever a method returns
/// - every present node owns exactly `replicas` entries
/// - `members` holds exactly the owners that appear in `entries`
///
/// # Example
///
/// ```rust
/// use corelib::Ring;
///
/// let mut ring = Ring::new(5)?;
/// ring.add_nodes(["db1", "db2"]);
/// assert_eq!(ring.len(), 10);
///
/// ring.remove_node("db2");
/// assert_eq!(ring.get_node("k")?, "db1");
/// # Ok::<(), corelib::Error>(())
/// ```
pub struct Ring<H = Murmur3> {
    /// Virtual nodes per physical node. Fixed for the ring's lifetime.
    replicas: usize,
    hasher: Arc<H>,
    /// Sorted ascending by `hash`.
    entries: Vec<VirtualNode>,
    /// Names that currently own entries.
    members: HashSet<String>,
}

impl Ring<Murmur3> {
    /// Creates an empty ring using the default MurmurHash3 hasher.
    ///
    /// # Errors
    /// [`Error::InvalidReplicas`] if `replicas` is zero.
    pub fn new(replicas: usize) -> Result<Self> {
        Self::with_hasher(replicas, Murmur3)
    }
}

impl<H: RingHasher> Ring<H> {
    /// Creates an empty ring with a custom hasher.
    ///
    /// # Errors
    /// [`Error::InvalidReplicas`] if `replicas` is zero. A ring that can
    /// never hold a virtual node would fail every lookup.
    pub fn with_hasher(replicas: usize, hasher: H) -> Result<Self> {
        if replicas == 0 {
            return Err(Error::InvalidReplicas(replicas));
        }
        Ok(Self {
            replicas,
            hasher: Arc::new(hasher),
            entries: Vec::new(),
            members: HashSet::new(),
        })
    }

    /// Adds a single node. See [`Ring::add_nodes`].
    pub fn add_node(&mut self, name: &str) -> usize {
        self.add_nodes([name])
    }

    /// Adds nodes to the ring, in order.
    ///
    /// A name that is already present is skipped, including a name repeated
    /// within the same call. Each new name gets `replicas` virtual nodes at
    /// `hash(name ++ i)` for `i` in `0..replicas`, after which the whole ring
    /// is re-sorted.
    ///
    /// # Returns
    /// The number of nodes that were actually added.
    ///
    /// # Performance
    /// - **Time**: O(r·k + n log n) where r = replicas, k = new names, n = entries
    pub fn add_nodes<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for name in names {
            let name = name.as_ref();
            if self.members.contains(name) {
                trace!(node = name, "node already on ring, skipping");
                continue;
            }

            self.entries.reserve(self.replicas);
            for i in 0..self.replicas {
                self.entries
                    .push(VirtualNode::from_index(self.hasher.as_ref(), name, i));
            }
            self.members.insert(name.to_owned());
            added += 1;
            debug!(node = name, replicas = self.replicas, "added node to ring");
        }

        if added > 0 {
            // Stable: equal hashes keep insertion order, so ties resolve the
            // same way for the same sequence of calls.
            self.entries.sort_by_key(|vnode| vnode.hash);
            debug!(added, entries = self.entries.len(), "ring re-sorted");
        }
        added
    }

    /// Removes a single node. See [`Ring::remove_nodes`].
    pub fn remove_node(&mut self, name: &str) -> usize {
        self.remove_nodes([name])
    }

    /// Removes nodes and all of their virtual nodes.
    ///
    /// Names that are not on the ring are ignored. Surviving entries keep
    /// their relative order, so no re-sort is needed.
    ///
    /// # Returns
    /// The number of nodes that were actually removed.
    pub fn remove_nodes<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        let doomed: HashSet<&str> = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| self.members.contains(*name))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        self.entries
            .retain(|vnode| !doomed.contains(vnode.owner.as_str()));
        for name in &doomed {
            self.members.remove(*name);
            debug!(node = *name, "removed node from ring");
        }
        debug!(entries = self.entries.len(), "ring shrunk");
        doomed.len()
    }

    /// Returns the name of the node that owns `key`.
    ///
    /// # Errors
    /// [`Error::EmptyRing`] if no node has been added (or all were removed).
    ///
    /// # Performance
    /// - **Time**: O(log n) binary search over the sorted entries
    #[inline]
    pub fn get_node<K: AsRef<[u8]>>(&self, key: K) -> Result<&str> {
        self.get_vnode(key).map(|vnode| vnode.owner.as_str())
    }

    /// Returns the virtual node that owns `key`.
    ///
    /// This is the first entry whose hash is `>=` the key's hash, or the
    /// first entry of the ring when the key hashes past every entry.
    pub fn get_vnode<K: AsRef<[u8]>>(&self, key: K) -> Result<&VirtualNode> {
        let hash = self.hasher.hash(key.as_ref());
        let index = self.entries.partition_point(|vnode| vnode.hash < hash);
        self.entries
            .get(index)
            .or_else(|| self.entries.first())
            .ok_or(Error::EmptyRing)
    }

    /// Returns the hash positions owned by `name`, in ring order.
    pub fn vnodes_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = u32> + 'a {
        self.entries
            .iter()
            .filter(move |vnode| vnode.owner == name)
            .map(|vnode| vnode.hash)
    }
}

impl<H> Ring<H> {
    /// Virtual nodes per physical node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Total number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the ring holds no virtual nodes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of physical nodes on the ring.
    pub fn node_count(&self) -> usize {
        self.members.len()
    }

    /// True if `name` currently owns virtual nodes.
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Names of all physical nodes, sorted.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.members.iter().map(String::as_str).collect();
        nodes.sort_unstable();
        nodes
    }

    /// All virtual nodes, sorted ascending by hash.
    pub fn entries(&self) -> &[VirtualNode] {
        &self.entries
    }

    /// The hasher used for placement and lookup.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H> Clone for Ring<H> {
    fn clone(&self) -> Self {
        Self {
            replicas: self.replicas,
            hasher: Arc::clone(&self.hasher),
            entries: self.entries.clone(),
            members: self.members.clone(),
        }
    }
}

impl<H: RingHasher> fmt::Debug for Ring<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("replicas", &self.replicas)
            .field("hasher", &self.hasher.name())
            .field("nodes", &self.nodes())
            .field("entries", &self.entries.len())
            .finish()
    }
}
