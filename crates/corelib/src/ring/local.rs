//! The local node's view of the ring.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::RingConfig;
use crate::error::{Error, Result};
use crate::membership::MembershipTable;
use crate::node::{NodeDescriptor, NodeId};
use crate::ring::index::RingIndex;
use crate::ring::redistribution::Redistribution;
use crate::token::Key;
use crate::vnode::VirtualPlacement;

/// A participant's local ring: its own descriptor, the peers it knows about,
/// and an index from every known placement to the node that owns it.
///
/// The local node's placements go into the index at construction and stay
/// there for the lifetime of the value. Each registered peer contributes all
/// of its placements; deregistering removes them again.
///
/// Given the same membership, every participant computes the same owner for
/// any key. Keeping membership views in sync is up to the embedding system.
pub struct LocalRingNode {
    local: NodeDescriptor,
    members: MembershipTable,
    index: RingIndex<Key, NodeId>,
    config: RingConfig,
}

impl LocalRingNode {
    /// Create a node at `address` with a fresh random id and the default
    /// number of placements.
    pub fn new(address: impl Into<String>) -> Self {
        Self::build(NodeDescriptor::new(address), RingConfig::default())
    }

    /// Create a node at `address` with placements sized by `config`.
    pub fn with_config(address: impl Into<String>, config: &RingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            NodeDescriptor::with_config(address, config),
            config.clone(),
        ))
    }

    /// Build the local ring around an existing descriptor, e.g. one with a
    /// reproducible placement.
    ///
    /// The descriptor's placement length becomes the placement count every
    /// peer must match; an empty placement is rejected.
    pub fn from_descriptor(local: NodeDescriptor) -> Result<Self> {
        let config = RingConfig::new(local.placement().len());
        config.validate()?;
        Ok(Self::build(local, config))
    }

    fn build(local: NodeDescriptor, config: RingConfig) -> Self {
        let mut index = RingIndex::new();
        for &position in local.placement().iter() {
            index.set(position, local.id());
        }
        debug!(
            node = %local.id(),
            address = local.address(),
            placements = index.len(),
            "created local ring node"
        );
        Self {
            local,
            members: MembershipTable::new(),
            index,
            config,
        }
    }

    /// Add a peer to the ring.
    ///
    /// For each of the peer's placements, in placement order, the current
    /// predecessor on the ring (wrapping to the last entry) is looked up
    /// before the placement is inserted. When that predecessor belongs to a
    /// different node, a [`Redistribution`] from the predecessor's owner to
    /// the new peer is reported for `(predecessor, placement]`. Ranges are
    /// never merged, so the same source/destination pair can appear many
    /// times.
    ///
    /// A placement landing exactly on an existing entry replaces it.
    ///
    /// Fails with [`Error::PlacementMismatch`] when the peer's placement
    /// length differs from this ring's placement count; nothing is changed
    /// in that case.
    pub fn register_node(&mut self, descriptor: NodeDescriptor) -> Result<Vec<Redistribution>> {
        let id = descriptor.id();
        if id == self.local.id() {
            return Err(Error::SelfRegistration(id));
        }
        if self.members.contains(&id) {
            return Err(Error::AlreadyRegistered(id));
        }
        if descriptor.placement().len() != self.config.placements_per_node {
            return Err(Error::PlacementMismatch {
                node: id,
                expected: self.config.placements_per_node,
                actual: descriptor.placement().len(),
            });
        }

        let mut redistributions = Vec::with_capacity(descriptor.placement().len());
        for &position in descriptor.placement().iter() {
            if let Ok((&start, &owner)) = self.index.previous_wrapping(&position) {
                if owner != id {
                    trace!(%start, end = %position, source = %owner, "range changes owner");
                    redistributions.push(Redistribution {
                        source: owner,
                        destination: id,
                        start,
                        end: position,
                    });
                }
            }
            if let Some(previous) = self.index.set(position, id) {
                if previous != id {
                    warn!(%position, replaced = %previous, node = %id, "placement collision");
                }
            }
        }

        debug!(
            node = %id,
            address = descriptor.address(),
            redistributions = redistributions.len(),
            "registered node"
        );
        self.members.insert(descriptor)?;
        Ok(redistributions)
    }

    /// Remove a previously registered peer and all of its placements,
    /// returning the descriptor that was registered.
    ///
    /// No redistributions are reported: vacated ranges fall to whichever
    /// node now follows them on the ring.
    pub fn deregister_node(&mut self, descriptor: &NodeDescriptor) -> Result<NodeDescriptor> {
        let removed = self.members.remove(&descriptor.id())?;
        let id = removed.id();
        for position in removed.placement().iter() {
            // Only drop entries this node still owns; a colliding later
            // registration may have taken the slot.
            if self.index.get(position) != Some(&id) {
                continue;
            }
            if self.local.placement().contains(position) {
                // The local node's placements never leave the ring.
                self.index.set(*position, self.local.id());
            } else {
                self.index.clear(position);
            }
        }
        debug!(node = %id, address = removed.address(), "deregistered node");
        Ok(removed)
    }

    /// Whether `id` is a registered peer. The local node is not its own peer.
    pub fn node_registered(&self, id: &NodeId) -> bool {
        self.members.contains(id)
    }

    /// The node owning `key`: the owner of the first placement strictly
    /// after `key`, wrapping to the first placement on the ring.
    pub fn get_node_for(&self, key: &Key) -> &NodeDescriptor {
        self.index
            .next_wrapping(key)
            .ok()
            .and_then(|(_, owner)| self.resolve(owner))
            .unwrap_or(&self.local)
    }

    /// Up to `count` distinct nodes for `key`, in clockwise order starting
    /// with [`get_node_for`](Self::get_node_for).
    ///
    /// `count` is clamped to the population (peers plus the local node).
    pub fn get_nodes_for(&self, key: &Key, count: usize) -> Vec<&NodeDescriptor> {
        let wanted = count.min(self.population());
        let mut nodes = Vec::with_capacity(wanted);
        if wanted == 0 {
            return nodes;
        }

        let mut seen = HashSet::with_capacity(wanted);
        let mut cursor = *key;
        // Each step visits the next entry; len steps cover the whole ring once.
        for _ in 0..self.index.len() {
            let Ok((&position, &owner)) = self.index.next_wrapping(&cursor) else {
                break;
            };
            cursor = position;
            if !seen.insert(owner) {
                continue;
            }
            if let Some(node) = self.resolve(&owner) {
                nodes.push(node);
                if nodes.len() == wanted {
                    break;
                }
            }
        }
        nodes
    }

    /// Fraction of the keyspace each node currently owns.
    pub fn keyspace_shares(&self) -> HashMap<NodeId, f64> {
        let mut shares = HashMap::new();
        let Ok((&last, _)) = self.index.last() else {
            return shares;
        };
        if self.index.len() == 1 {
            if let Ok((_, &owner)) = self.index.first() {
                shares.insert(owner, 1.0);
            }
            return shares;
        }

        let ring_size = 2f64.powi(128);
        let mut previous = last.identity().as_u128();
        for (position, owner) in self.index.iter() {
            let current = position.identity().as_u128();
            let span = current.wrapping_sub(previous);
            *shares.entry(*owner).or_insert(0.0) += span as f64 / ring_size;
            previous = current;
        }
        shares
    }

    /// This node's own descriptor.
    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.local
    }

    pub fn id(&self) -> NodeId {
        self.local.id()
    }

    pub fn address(&self) -> &str {
        self.local.address()
    }

    pub fn placement(&self) -> &VirtualPlacement {
        self.local.placement()
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// A registered peer by id.
    pub fn member(&self, id: &NodeId) -> Option<&NodeDescriptor> {
        self.members.get(id)
    }

    pub fn members(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.members.iter()
    }

    /// Number of registered peers.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of distinct nodes on the ring, including this one.
    pub fn population(&self) -> usize {
        self.members.len() + 1
    }

    /// Number of placements in the index.
    pub fn placement_count(&self) -> usize {
        self.index.len()
    }

    /// Read-only access to the underlying index.
    pub fn index(&self) -> &RingIndex<Key, NodeId> {
        &self.index
    }

    fn resolve(&self, id: &NodeId) -> Option<&NodeDescriptor> {
        if *id == self.local.id() {
            Some(&self.local)
        } else {
            self.members.get(id)
        }
    }
}

impl fmt::Debug for LocalRingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalRingNode")
            .field("id", &self.local.id())
            .field("address", &self.local.address())
            .field("members", &self.members.len())
            .field("placements", &self.index.len())
            .finish()
    }
}
