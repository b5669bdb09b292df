//! In-process peer set used by the CLI.

use ringcore::{LocalRingNode, NodeDescriptor, NodeId, Redistribution, RingConfig, VirtualPlacement};
use tracing::info;

/// A set of local ring nodes whose membership views have converged.
///
/// Node ids and placements are derived from the node addresses, so the same
/// arguments always produce the same ring.
#[derive(Debug)]
pub struct Cluster {
    nodes: Vec<LocalRingNode>,
    config: RingConfig,
}

impl Cluster {
    /// Build `count` nodes named `node1:7000`, `node2:7000`, ... and register
    /// every node with every other.
    pub fn converged(count: usize, config: &RingConfig) -> ringcore::Result<Self> {
        config.validate()?;
        let mut cluster = Self {
            nodes: Vec::with_capacity(count),
            config: config.clone(),
        };
        for i in 1..=count {
            cluster.join(&format!("node{i}:7000"))?;
        }
        info!(nodes = count, placements = config.placements_per_node, "cluster converged");
        Ok(cluster)
    }

    /// Describe a node deterministically from its address.
    pub fn descriptor_for(&self, address: &str) -> NodeDescriptor {
        NodeDescriptor::from_parts(
            NodeId::from_md5(address),
            address,
            VirtualPlacement::from_seed(address, self.config.placements_per_node),
        )
    }

    /// Bring up a node at `address`, register it with every existing node
    /// and register every existing node with it.
    ///
    /// Returns the redistributions each existing node computed, keyed by
    /// that node's id.
    pub fn join(&mut self, address: &str) -> ringcore::Result<Vec<(NodeId, Vec<Redistribution>)>> {
        let descriptor = self.descriptor_for(address);
        let mut joiner = LocalRingNode::from_descriptor(descriptor.clone())?;

        let mut reports = Vec::with_capacity(self.nodes.len());
        for node in &mut self.nodes {
            let moves = node.register_node(descriptor.clone())?;
            reports.push((node.id(), moves));
            joiner.register_node(node.descriptor().clone())?;
        }
        self.nodes.push(joiner);
        Ok(reports)
    }

    pub fn nodes(&self) -> &[LocalRingNode] {
        &self.nodes
    }

    /// Any node's view; all views are identical.
    pub fn first(&self) -> Option<&LocalRingNode> {
        self.nodes.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringcore::Key;

    #[test]
    fn test_converged_views_agree() {
        let cluster = Cluster::converged(4, &RingConfig::new(16)).unwrap();
        assert_eq!(cluster.nodes().len(), 4);
        for node in cluster.nodes() {
            assert_eq!(node.member_count(), 3);
        }
        let key = Key::from_md5("k");
        let owner = cluster.nodes()[0].get_node_for(&key).id();
        assert!(cluster.nodes().iter().all(|n| n.get_node_for(&key).id() == owner));
    }

    #[test]
    fn test_cluster_is_reproducible() {
        let a = Cluster::converged(3, &RingConfig::new(8)).unwrap();
        let b = Cluster::converged(3, &RingConfig::new(8)).unwrap();
        let key = Key::from_md5("same");
        assert_eq!(
            a.nodes()[0].get_node_for(&key).id(),
            b.nodes()[0].get_node_for(&key).id()
        );
    }

    #[test]
    fn test_join_reports_per_existing_node() {
        let mut cluster = Cluster::converged(2, &RingConfig::new(8)).unwrap();
        let reports = cluster.join("late:7000").unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(cluster.nodes().len(), 3);
        assert!(cluster.join("late:7000").is_err());
    }
}
