//! Load distribution and remap analysis.
//!
//! The quality of a ring is a statistical property: how evenly a large sample
//! of keys spreads across nodes, and how few keys change owner when
//! membership changes. These helpers measure both against concrete rings.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::hash::RingHasher;
use crate::ring::Ring;

/// Per-node key counts for a sample of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Keys owned by each node, including nodes that received none.
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl Distribution {
    /// Resolves every key against `ring` and counts keys per owner.
    ///
    /// # Errors
    /// [`Error::EmptyRing`] if the ring holds no nodes.
    pub fn sample<H, I, K>(ring: &Ring<H>, keys: I) -> Result<Self>
    where
        H: RingHasher,
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        if ring.is_empty() {
            return Err(Error::EmptyRing);
        }

        let mut counts: BTreeMap<String, usize> = ring
            .nodes()
            .into_iter()
            .map(|name| (name.to_owned(), 0))
            .collect();
        let mut total = 0;
        for key in keys {
            let owner = ring.get_node(key)?;
            match counts.get_mut(owner) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(owner.to_owned(), 1);
                }
            }
            total += 1;
        }

        Ok(Self { counts, total })
    }

    /// Number of keys sampled.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of keys owned by `name`.
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Fraction of sampled keys owned by `name`, in `0.0..=1.0`.
    pub fn share(&self, name: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(name) as f64 / self.total as f64
    }

    /// `(node, count)` pairs in node-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Largest relative deviation of any node from a perfectly even split.
    ///
    /// `0.0` is perfectly even; `0.1` means some node is 10% above or below
    /// its fair share.
    pub fn max_skew(&self) -> f64 {
        if self.total == 0 || self.counts.is_empty() {
            return 0.0;
        }
        let ideal = self.total as f64 / self.counts.len() as f64;
        self.counts
            .values()
            .map(|count| (*count as f64 - ideal).abs() / ideal)
            .fold(0.0, f64::max)
    }
}

/// A key whose owner differs between two rings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remap {
    pub key: String,
    pub from: String,
    pub to: String,
}

/// Lists the keys that change owner between `old` and `new`.
///
/// # Errors
/// [`Error::EmptyRing`] if either ring holds no nodes.
pub fn remaps<H1, H2, I, K>(old: &Ring<H1>, new: &Ring<H2>, keys: I) -> Result<Vec<Remap>>
where
    H1: RingHasher,
    H2: RingHasher,
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    if old.is_empty() || new.is_empty() {
        return Err(Error::EmptyRing);
    }

    let mut moved = Vec::new();
    for key in keys {
        let key = key.as_ref();
        let from = old.get_node(key)?;
        let to = new.get_node(key)?;
        if from != to {
            moved.push(Remap {
                key: key.to_owned(),
                from: from.to_owned(),
                to: to.to_owned(),
            });
        }
    }
    Ok(moved)
}
