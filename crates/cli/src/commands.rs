//! CLI subcommands and their results.

use anyhow::Context;
use clap::Subcommand;
use replication::{ReplicaPlacement, SimpleStrategy};
use ringcore::{Key, NodeId, Redistribution};
use serde::Serialize;

use crate::cluster::Cluster;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how much of the keyspace each node owns.
    Shares,
    /// Route a key to its owner and replicas.
    Route {
        /// Key to route; hashed with MD5 unless --hex is given.
        key: String,
        /// Treat the key as 32 hex digits.
        #[arg(long)]
        hex: bool,
        /// Copies to place, primary included.
        #[arg(long, default_value_t = 3)]
        replicas: usize,
    },
    /// Join a new node and list the ranges it takes over.
    Join {
        /// Address of the joining node.
        address: String,
        /// Ranges to print per reporting node.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Debug, Serialize)]
pub struct Share {
    pub node: NodeId,
    pub address: String,
    pub fraction: f64,
}

#[derive(Debug, Serialize)]
pub struct JoinReport {
    pub joined: NodeId,
    pub reporter: NodeId,
    pub total: usize,
    pub ranges: Vec<Redistribution>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandResult {
    Shares { shares: Vec<Share> },
    Route(ReplicaPlacement),
    Join { reports: Vec<JoinReport> },
}

impl Command {
    pub fn execute(&self, cluster: &mut Cluster) -> anyhow::Result<CommandResult> {
        match self {
            Command::Shares => {
                let ring = cluster.first().context("cluster has no nodes")?;
                let fractions = ring.keyspace_shares();
                let mut shares: Vec<Share> = std::iter::once(ring.descriptor())
                    .chain(ring.members())
                    .map(|node| Share {
                        node: node.id(),
                        address: node.address().to_string(),
                        fraction: fractions.get(&node.id()).copied().unwrap_or(0.0),
                    })
                    .collect();
                shares.sort_by(|a, b| a.address.cmp(&b.address));
                Ok(CommandResult::Shares { shares })
            }
            Command::Route { key, hex, replicas } => {
                let key = if *hex {
                    key.parse::<Key>()?
                } else {
                    Key::from_md5(key)
                };
                let strategy = SimpleStrategy::new(*replicas)?;
                let ring = cluster.first().context("cluster has no nodes")?;
                Ok(CommandResult::Route(ReplicaPlacement::resolve(
                    &strategy, ring, key,
                )))
            }
            Command::Join { address, limit } => {
                let joined = cluster.descriptor_for(address).id();
                let reports = cluster
                    .join(address)
                    .with_context(|| format!("failed to join {address}"))?
                    .into_iter()
                    .map(|(reporter, ranges)| JoinReport {
                        joined,
                        reporter,
                        total: ranges.len(),
                        ranges: ranges.into_iter().take(*limit).collect(),
                    })
                    .collect();
                Ok(CommandResult::Join { reports })
            }
        }
    }
}

impl CommandResult {
    pub fn print(&self, json: bool) -> anyhow::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
            return Ok(());
        }
        match self {
            CommandResult::Shares { shares } => {
                for share in shares {
                    println!(
                        "{:<16} {} {:>6.2}%",
                        share.address,
                        share.node,
                        share.fraction * 100.0
                    );
                }
            }
            CommandResult::Route(placement) => {
                println!("key      {}", placement.key);
                println!("primary  {}", placement.primary);
                for replica in &placement.replicas {
                    println!("replica  {}", replica);
                }
            }
            CommandResult::Join { reports } => {
                for report in reports {
                    println!(
                        "{} reports {} ranges moving to {}",
                        report.reporter, report.total, report.joined
                    );
                    for range in &report.ranges {
                        println!("  {}", range);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringcore::RingConfig;

    fn cluster() -> Cluster {
        Cluster::converged(3, &RingConfig::new(16)).unwrap()
    }

    #[test]
    fn test_shares_cover_keyspace() {
        let result = Command::Shares.execute(&mut cluster()).unwrap();
        let CommandResult::Shares { shares } = result else {
            panic!("expected shares");
        };
        assert_eq!(shares.len(), 3);
        let total: f64 = shares.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_route_by_hex_and_md5_agree() {
        let mut cluster = cluster();
        let by_name = Command::Route {
            key: "helloworld".to_string(),
            hex: false,
            replicas: 2,
        }
        .execute(&mut cluster)
        .unwrap();
        let by_hex = Command::Route {
            key: "fc5e038d38a57032085441e7fe7010b0".to_string(),
            hex: true,
            replicas: 2,
        }
        .execute(&mut cluster)
        .unwrap();

        match (by_name, by_hex) {
            (CommandResult::Route(a), CommandResult::Route(b)) => {
                assert_eq!(a, b);
                assert_eq!(a.len(), 2);
            }
            other => panic!("unexpected results {other:?}"),
        }
    }

    #[test]
    fn test_route_rejects_bad_hex() {
        let result = Command::Route {
            key: "xyz".to_string(),
            hex: true,
            replicas: 1,
        }
        .execute(&mut cluster());
        assert!(result.is_err());
    }

    #[test]
    fn test_join_limits_ranges() {
        let result = Command::Join {
            address: "node9:7000".to_string(),
            limit: 2,
        }
        .execute(&mut cluster())
        .unwrap();
        let CommandResult::Join { reports } = result else {
            panic!("expected join report");
        };
        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert!(report.ranges.len() <= 2);
            assert!(report.total >= report.ranges.len());
        }
        assert!(serde_json::to_string(&CommandResult::Join { reports }).is_ok());
    }
}
