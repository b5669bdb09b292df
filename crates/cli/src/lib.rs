//! CLI tool for exploring consistent hash rings.
//!
//! Builds an in-process peer set whose nodes have all registered each other
//! and provides commands for:
//! - Inspecting how the keyspace is split
//! - Routing keys to their owner and replicas
//! - Joining a node and listing the ranges it takes over

pub mod cluster;
pub mod commands;
pub mod config;

pub use cluster::Cluster;
pub use commands::{Command, CommandResult};
pub use config::CliConfig;
