//! Replication strategy abstractions.
//!
//! - **SimpleStrategy**: N replicas placed on the next distinct nodes
//!   clockwise from the key

pub mod simple;

pub use simple::SimpleStrategy;

use ringcore::{Key, LocalRingNode, NodeDescriptor};

/// Trait for replication strategies.
///
/// Implementations must be thread-safe (Send + Sync) as they may be
/// shared across threads.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Number of copies this strategy keeps, primary included.
    fn replication_factor(&self) -> usize;

    /// Replica nodes for `key`, primary first.
    ///
    /// # Arguments
    /// * `ring` - The local view of the ring to query
    /// * `key` - The key to find replicas for
    ///
    /// # Returns
    /// Distinct nodes in clockwise order from `key`. Fewer than
    /// [`replication_factor`](Self::replication_factor) when the ring has
    /// fewer distinct nodes.
    ///
    /// # Performance
    /// O(p * log n) where p = placements walked, n = placements on the ring
    fn replicas_for_key<'a>(&self, ring: &'a LocalRingNode, key: &Key) -> Vec<&'a NodeDescriptor>;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}
