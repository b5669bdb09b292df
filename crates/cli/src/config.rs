//! Command-line configuration.

use anyhow::Context;
use clap::Parser;
use ringcore::{RingConfig, DISTRIBUTION_MAX};
use tracing_subscriber::EnvFilter;

use crate::cluster::Cluster;
use crate::commands::Command;

/// Inspect and simulate a consistent hash ring.
#[derive(Debug, Parser)]
#[command(name = "ringctl", version)]
pub struct CliConfig {
    /// Number of nodes in the simulated peer set.
    #[arg(long, global = true, default_value_t = 3)]
    pub nodes: usize,

    /// Virtual placements per node.
    #[arg(long, global = true, default_value_t = DISTRIBUTION_MAX)]
    pub placements: usize,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(&self.log_level);

        let ring_config = RingConfig::new(self.placements);
        ring_config.validate()?;
        if self.nodes == 0 {
            anyhow::bail!("--nodes must be at least 1");
        }

        let mut cluster = Cluster::converged(self.nodes, &ring_config)
            .context("failed to build simulated cluster")?;
        let result = self.command.execute(&mut cluster)?;
        result.print(self.json)
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
