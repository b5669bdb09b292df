//! Registered peers of a local ring node.

use std::collections::hash_map::{Entry, HashMap};

use crate::error::{Error, Result};
use crate::node::{NodeDescriptor, NodeId};

/// Remote node descriptors keyed by id.
///
/// Plain bookkeeping; ordering lives in the ring index. The local node is
/// never a member of its own table.
#[derive(Debug, Default, Clone)]
pub struct MembershipTable {
    members: HashMap<NodeId, NodeDescriptor>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.members.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&NodeDescriptor> {
        self.members.get(id)
    }

    /// Add a member, failing if its id is already present.
    pub fn insert(&mut self, descriptor: NodeDescriptor) -> Result<&NodeDescriptor> {
        match self.members.entry(descriptor.id()) {
            Entry::Occupied(entry) => Err(Error::AlreadyRegistered(*entry.key())),
            Entry::Vacant(entry) => Ok(&*entry.insert(descriptor)),
        }
    }

    /// Remove a member, failing if it is absent.
    pub fn remove(&mut self, id: &NodeId) -> Result<NodeDescriptor> {
        self.members.remove(id).ok_or(Error::NotRegistered(*id))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.members.values()
    }
}
