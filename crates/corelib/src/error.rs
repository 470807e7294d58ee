//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lookup on a ring that holds no virtual nodes.
    #[error("Ring is empty: add at least one node before looking up keys")]
    EmptyRing,
    /// Replica count that would never place a virtual node.
    #[error("Invalid replica count: {0} (must be at least 1)")]
    InvalidReplicas(usize),
    /// Hasher name that does not match any built-in hasher.
    #[error("Unknown hasher: {0}")]
    UnknownHasher(String),
}
