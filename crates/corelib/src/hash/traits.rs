//! Core hasher trait definitions.

/// A hasher converts bytes into positions on the ring.
///
/// Hashers are stateless and thread-safe, allowing concurrent lookups
/// without synchronization overhead.
///
/// Any `Fn(&[u8]) -> u32` closure is a hasher as well:
///
/// ```rust
/// use corelib::Ring;
///
/// let mut ring = Ring::with_hasher(4, |bytes: &[u8]| bytes.len() as u32).unwrap();
/// ring.add_node("db1");
/// assert_eq!(ring.get_node("key").unwrap(), "db1");
/// ```
pub trait RingHasher: Send + Sync + 'static {
    /// Converts a byte sequence into a ring position.
    ///
    /// Must return the same value for the same input on every call and in
    /// every process.
    fn hash(&self, bytes: &[u8]) -> u32;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> RingHasher for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
{
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u32 {
        self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_hasher() {
        let hasher = |bytes: &[u8]| bytes.iter().map(|b| *b as u32).sum::<u32>();
        assert_eq!(hasher.hash(b"ab"), 97 + 98);
        assert_eq!(RingHasher::name(&hasher), "custom");
    }
}
