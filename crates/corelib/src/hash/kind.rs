//! Runtime selection of a built-in hasher.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::hash::{Crc32, Murmur3, RingHasher, Sip32, Xxh32};

/// One of the built-in hashers, chosen by name.
///
/// Configuration layers parse this from a string and hand it to the ring
/// like any other hasher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HasherKind {
    #[default]
    Murmur3,
    Xxh32,
    Sip32,
    Crc32,
}

impl HasherKind {
    /// All built-in hashers.
    pub const ALL: [HasherKind; 4] = [
        HasherKind::Murmur3,
        HasherKind::Xxh32,
        HasherKind::Sip32,
        HasherKind::Crc32,
    ];
}

impl RingHasher for HasherKind {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u32 {
        match self {
            HasherKind::Murmur3 => Murmur3.hash(bytes),
            HasherKind::Xxh32 => Xxh32.hash(bytes),
            HasherKind::Sip32 => Sip32.hash(bytes),
            HasherKind::Crc32 => Crc32.hash(bytes),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            HasherKind::Murmur3 => Murmur3.name(),
            HasherKind::Xxh32 => Xxh32.name(),
            HasherKind::Sip32 => Sip32.name(),
            HasherKind::Crc32 => Crc32.name(),
        }
    }
}

impl FromStr for HasherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HasherKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownHasher(s.to_string()))
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
