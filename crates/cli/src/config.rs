//! Command-line configuration.

use anyhow::{Context, Result};
use clap::Parser;
use corelib::{HasherKind, Ring, RingBuilder, DEFAULT_REPLICAS};
use tracing::{debug, info};

use crate::commands::Command;

/// Inspect how a consistent hash ring places keys on nodes.
///
/// The ring is rebuilt from `--nodes` on every invocation, so the same
/// arguments always produce the same placement.
#[derive(Debug, Parser)]
#[command(name = "ring", version)]
pub struct CliConfig {
    /// Virtual nodes per physical node.
    #[arg(long, short = 'r', default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Hash function: murmur3, xxh32, sip32 or crc32.
    #[arg(long, default_value_t = HasherKind::Murmur3)]
    pub hasher: HasherKind,

    /// Comma-separated node names.
    #[arg(long, short = 'n', value_delimiter = ',', required = true)]
    pub nodes: Vec<String>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Builds the ring, runs the subcommand and prints its output.
    pub fn run(self) -> Result<()> {
        setup_tracing(&self.log_level);

        let ring = self.build_ring()?;
        info!(
            nodes = ring.node_count(),
            entries = ring.len(),
            hasher = %self.hasher,
            "ring built"
        );

        let result = self.command.execute(&ring)?;
        for line in &result.lines {
            println!("{line}");
        }
        Ok(())
    }

    /// Builds the ring described by the node list, replica count and hasher.
    pub fn build_ring(&self) -> Result<Ring<HasherKind>> {
        debug!(nodes = ?self.nodes, replicas = self.replicas, "building ring");
        RingBuilder::new()
            .replicas(self.replicas)
            .hasher(self.hasher)
            .nodes(
                self.nodes
                    .iter()
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty()),
            )
            .build()
            .context("failed to build ring")
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
