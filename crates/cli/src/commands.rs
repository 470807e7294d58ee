//! Subcommands and their execution against a built ring.

use std::collections::BTreeMap;

use anyhow::{ensure, Context, Result};
use clap::Subcommand;
use corelib::{remaps, Distribution, Ring, RingHasher};
use tracing::debug;

/// Default number of sampled keys for distribution and rebalance reports.
const DEFAULT_SAMPLE: usize = 100_000;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve keys to their owning node.
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show how a sample of keys spreads across nodes.
    Distribution {
        /// Number of keys to sample.
        #[arg(long, default_value_t = DEFAULT_SAMPLE)]
        keys: usize,
        /// Sampled keys are `<prefix>0`, `<prefix>1`, ...
        #[arg(long, default_value = "data")]
        prefix: String,
    },
    /// Report which keys a membership change would move.
    Rebalance {
        /// Number of keys to sample.
        #[arg(long, default_value_t = DEFAULT_SAMPLE)]
        keys: usize,
        /// Sampled keys are `<prefix>0`, `<prefix>1`, ...
        #[arg(long, default_value = "data")]
        prefix: String,
        /// Comma-separated nodes to add.
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,
        /// Comma-separated nodes to remove.
        #[arg(long, value_delimiter = ',')]
        remove: Vec<String>,
    },
    /// Dump the sorted virtual-node table.
    Entries,
}

/// Output of a command, one line per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub lines: Vec<String>,
}

impl CommandResult {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl Command {
    /// Runs the command against `ring`.
    pub fn execute<H: RingHasher>(&self, ring: &Ring<H>) -> Result<CommandResult> {
        match self {
            Command::Lookup { keys } => lookup(ring, keys),
            Command::Distribution { keys, prefix } => {
                distribution(ring, &sample_keys(prefix, *keys))
            }
            Command::Rebalance {
                keys,
                prefix,
                add,
                remove,
            } => rebalance(ring, &sample_keys(prefix, *keys), add, remove),
            Command::Entries => Ok(entries(ring)),
        }
    }
}

fn sample_keys(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

fn lookup<H: RingHasher>(ring: &Ring<H>, keys: &[String]) -> Result<CommandResult> {
    let mut out = CommandResult::default();
    for key in keys {
        let node = ring
            .get_node(key)
            .with_context(|| format!("failed to look up {key:?}"))?;
        out.push(format!("{key} -> {node}"));
    }
    Ok(out)
}

fn distribution<H: RingHasher>(ring: &Ring<H>, keys: &[String]) -> Result<CommandResult> {
    let dist = Distribution::sample(ring, keys).context("failed to sample distribution")?;

    let mut out = CommandResult::default();
    for (node, count) in dist.iter() {
        out.push(format!(
            "{node} count: {count} ({:.2}%)",
            dist.share(node) * 100.0
        ));
    }
    out.push(format!(
        "total: {}, max skew: {:.2}%",
        dist.total(),
        dist.max_skew() * 100.0
    ));
    Ok(out)
}

fn rebalance<H: RingHasher>(
    ring: &Ring<H>,
    keys: &[String],
    add: &[String],
    remove: &[String],
) -> Result<CommandResult> {
    ensure!(
        !add.is_empty() || !remove.is_empty(),
        "rebalance needs --add or --remove"
    );

    let mut after = ring.clone();
    let removed = after.remove_nodes(remove);
    let added = after.add_nodes(add);
    debug!(added, removed, "membership change applied");
    ensure!(!after.is_empty(), "ring would be empty after the change");

    let moved = remaps(ring, &after, keys).context("failed to compare rings")?;
    let mut flows: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for remap in &moved {
        *flows
            .entry((remap.from.as_str(), remap.to.as_str()))
            .or_default() += 1;
    }

    let mut out = CommandResult::default();
    out.push(format!(
        "nodes: {} -> {} (+{added} -{removed})",
        ring.node_count(),
        after.node_count()
    ));
    let ratio = if keys.is_empty() {
        0.0
    } else {
        moved.len() as f64 / keys.len() as f64
    };
    out.push(format!(
        "moved: {} of {} keys ({:.2}%)",
        moved.len(),
        keys.len(),
        ratio * 100.0
    ));
    for ((from, to), count) in flows {
        out.push(format!("{from} -> {to}: {count}"));
    }
    Ok(out)
}

fn entries<H: RingHasher>(ring: &Ring<H>) -> CommandResult {
    let mut out = CommandResult::default();
    for (index, vnode) in ring.entries().iter().enumerate() {
        out.push(format!("{index:>6} {:010} {}", vnode.hash, vnode.owner));
    }
    out
}
