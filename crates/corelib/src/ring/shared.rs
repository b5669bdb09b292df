//! Thread-safe handle around a [`LocalRingNode`].
//!
//! Registration and deregistration take the write lock; lookups share the
//! read lock. Lookups hand back owned descriptors so no guard escapes.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::Result;
use crate::node::{NodeDescriptor, NodeId};
use crate::ring::local::LocalRingNode;
use crate::ring::redistribution::Redistribution;
use crate::token::Key;

/// Cloneable, lock-protected ring shared between tasks or threads.
#[derive(Clone, Debug)]
pub struct SharedRingNode {
    inner: Arc<RwLock<LocalRingNode>>,
}

impl SharedRingNode {
    pub fn new(node: LocalRingNode) -> Self {
        Self {
            inner: Arc::new(RwLock::new(node)),
        }
    }

    pub fn register_node(&self, descriptor: NodeDescriptor) -> Result<Vec<Redistribution>> {
        self.inner.write().register_node(descriptor)
    }

    pub fn deregister_node(&self, descriptor: &NodeDescriptor) -> Result<NodeDescriptor> {
        self.inner.write().deregister_node(descriptor)
    }

    pub fn node_registered(&self, id: &NodeId) -> bool {
        self.inner.read().node_registered(id)
    }

    pub fn get_node_for(&self, key: &Key) -> NodeDescriptor {
        self.inner.read().get_node_for(key).clone()
    }

    pub fn get_nodes_for(&self, key: &Key, count: usize) -> Vec<NodeDescriptor> {
        self.inner
            .read()
            .get_nodes_for(key, count)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The local node's descriptor.
    pub fn descriptor(&self) -> NodeDescriptor {
        self.inner.read().descriptor().clone()
    }

    /// Hold the read lock for several lookups against one consistent view.
    pub fn read(&self) -> RwLockReadGuard<'_, LocalRingNode> {
        self.inner.read()
    }
}

impl From<LocalRingNode> for SharedRingNode {
    fn from(node: LocalRingNode) -> Self {
        Self::new(node)
    }
}
