//! Copy-on-write ring for concurrent readers.
//!
//! Lookups vastly outnumber membership changes, so readers never wait on a
//! rebuild: a writer clones the current ring, applies its change off to the
//! side, and publishes the result as a new snapshot. Readers holding an older
//! snapshot keep a consistent (if stale) view until they drop it.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::Result;
use crate::hash::{Murmur3, RingHasher};
use crate::ring::Ring;

struct Inner<H> {
    /// Published snapshot. Held only long enough to clone or swap the `Arc`.
    current: RwLock<Arc<Ring<H>>>,
    /// Serializes writers so concurrent changes are never lost.
    writer: Mutex<()>,
}

/// A [`Ring`] shared across threads.
///
/// Cloning a `SharedRing` yields another handle to the same ring.
///
/// # Example
///
/// ```rust
/// use corelib::{Ring, SharedRing};
///
/// let shared = SharedRing::new(Ring::new(16)?);
/// shared.add_nodes(["db1", "db2"]);
///
/// let snapshot = shared.snapshot();
/// shared.remove_nodes(["db2"]);
///
/// assert_eq!(snapshot.node_count(), 2);
/// assert_eq!(shared.snapshot().node_count(), 1);
/// # Ok::<(), corelib::Error>(())
/// ```
pub struct SharedRing<H = Murmur3> {
    inner: Arc<Inner<H>>,
}

impl<H: RingHasher> SharedRing<H> {
    /// Wraps a ring for shared use.
    pub fn new(ring: Ring<H>) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(Arc::new(ring)),
                writer: Mutex::new(()),
            }),
        }
    }

    /// Returns the current snapshot.
    ///
    /// The snapshot never changes; later membership changes publish a new
    /// one instead.
    #[inline]
    pub fn snapshot(&self) -> Arc<Ring<H>> {
        Arc::clone(&*self.inner.current.read())
    }

    /// Resolves `key` against the current snapshot.
    ///
    /// # Errors
    /// [`crate::Error::EmptyRing`] if the current snapshot holds no nodes.
    pub fn get_node<K: AsRef<[u8]>>(&self, key: K) -> Result<String> {
        self.snapshot().get_node(key).map(str::to_owned)
    }

    /// Adds nodes and publishes the resulting ring. See [`Ring::add_nodes`].
    pub fn add_nodes<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(|ring| ring.add_nodes(names))
    }

    /// Removes nodes and publishes the resulting ring. See [`Ring::remove_nodes`].
    pub fn remove_nodes<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(|ring| ring.remove_nodes(names))
    }

    /// Applies `change` to a private copy of the ring and publishes it if
    /// anything changed.
    fn update<F>(&self, change: F) -> usize
    where
        F: FnOnce(&mut Ring<H>) -> usize,
    {
        let _writer = self.inner.writer.lock();
        let current = self.snapshot();
        let mut next: Ring<H> = (*current).clone();
        let changed = change(&mut next);
        if changed > 0 {
            *self.inner.current.write() = Arc::new(next);
        }
        changed
    }
}

impl<H> Clone for SharedRing<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: RingHasher> From<Ring<H>> for SharedRing<H> {
    fn from(ring: Ring<H>) -> Self {
        Self::new(ring)
    }
}

impl<H: RingHasher> fmt::Debug for SharedRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRing").field(&self.snapshot()).finish()
    }
}
