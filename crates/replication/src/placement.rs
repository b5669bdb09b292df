//! Resolved replica sets.

use ringcore::{Key, LocalRingNode, NodeDescriptor};
use serde::{Deserialize, Serialize};

use crate::strategy::ReplicationStrategy;

/// Where copies of one key live: the primary owner and its replicas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaPlacement {
    pub key: Key,
    pub primary: NodeDescriptor,
    /// Further copies in clockwise order; empty on a single-node ring.
    pub replicas: Vec<NodeDescriptor>,
}

impl ReplicaPlacement {
    /// Resolve `key` against `ring` with `strategy`.
    pub fn resolve<S: ReplicationStrategy + ?Sized>(
        strategy: &S,
        ring: &LocalRingNode,
        key: Key,
    ) -> Self {
        let mut nodes = strategy.replicas_for_key(ring, &key).into_iter().cloned();
        // Every ring has at least the local node, so the walk yields a primary.
        let primary = nodes
            .next()
            .unwrap_or_else(|| ring.get_node_for(&key).clone());
        Self {
            key,
            primary,
            replicas: nodes.collect(),
        }
    }

    /// All holders, primary first.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDescriptor> {
        std::iter::once(&self.primary).chain(self.replicas.iter())
    }

    pub fn len(&self) -> usize {
        1 + self.replicas.len()
    }

    /// Always false: a placement has a primary.
    pub fn is_empty(&self) -> bool {
        false
    }
}
