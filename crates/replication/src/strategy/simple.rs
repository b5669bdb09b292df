//! Simple replication strategy.
//!
//! Places N replicas on consecutive distinct nodes around the ring
//! (clockwise from the key). Works well for:
//!
//! - Small clusters
//! - Single data center deployments
//!
//! # Algorithm
//!
//! 1. Walk clockwise from the key's position
//! 2. Collect each node the first time one of its placements is seen
//! 3. Stop at N nodes or when every node has been collected
//!
//! # Performance
//!
//! - **Time**: O(p log n) where p = placements walked, n = placements on the ring
//! - **Space**: O(r) - returns Vec of descriptors

use ringcore::{Key, LocalRingNode, NodeDescriptor};
use tracing::trace;

use crate::error::{ReplicationError, Result};
use crate::strategy::ReplicationStrategy;

/// Simple replication strategy: N replicas placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use replication::{ReplicationStrategy, SimpleStrategy};
/// use ringcore::{Key, LocalRingNode};
///
/// let strategy = SimpleStrategy::new(3).unwrap();
/// let ring = LocalRingNode::new("127.0.0.1:7000");
/// // ... register peers ...
///
/// let replicas = strategy.replicas_for_key(&ring, &Key::from_md5("my-key"));
/// assert_eq!(replicas.len(), 1); // only the local node so far
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: usize,
}

impl SimpleStrategy {
    /// Create a new simple strategy with the given replication factor.
    ///
    /// # Arguments
    /// * `replication_factor` - Number of copies, primary included
    ///   - 1: No replication (single copy)
    ///   - 3: Standard (primary + 2 replicas)
    ///   - 5: High availability (primary + 4 replicas)
    ///
    /// # Errors
    /// [`ReplicationError::InvalidFactor`] when the factor is zero.
    ///
    /// # Performance
    /// - **Time**: O(1) - just stores the factor
    /// - **Space**: O(1)
    pub fn new(replication_factor: usize) -> Result<Self> {
        if replication_factor == 0 {
            return Err(ReplicationError::InvalidFactor(replication_factor));
        }
        Ok(Self { replication_factor })
    }
}

impl Default for SimpleStrategy {
    /// Three copies: primary plus two replicas.
    fn default() -> Self {
        Self {
            replication_factor: 3,
        }
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key<'a>(&self, ring: &'a LocalRingNode, key: &Key) -> Vec<&'a NodeDescriptor> {
        let replicas = ring.get_nodes_for(key, self.replication_factor);
        trace!(%key, wanted = self.replication_factor, found = replicas.len(), "placed replicas");
        replicas
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
