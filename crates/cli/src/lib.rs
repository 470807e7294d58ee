//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Resolving keys to nodes
//! - Measuring load distribution
//! - Previewing the keys a membership change would move
//! - Dumping the virtual-node table

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
