//! Node abstractions for the consistent hash ring.
//!
//! Nodes are identified by a 128-bit [`NodeId`] and described to peers by a
//! [`NodeDescriptor`]: identity, network address and virtual placement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RingConfig;
use crate::error::Error;
use crate::token::{Identity, Key, IDENTITY_SIZE};
use crate::vnode::VirtualPlacement;

/// Identifier for a node in the peer set.
///
/// Shares its bit layout with [`Key`] but is a distinct type; use
/// [`NodeId::to_key`] / [`Key::to_node_id`] to cross over.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Identity);

impl NodeId {
    #[inline]
    pub const fn from_bytes(bytes: [u8; IDENTITY_SIZE]) -> Self {
        NodeId(Identity::from_bytes(bytes))
    }

    #[inline]
    pub const fn from_identity(identity: Identity) -> Self {
        NodeId(identity)
    }

    /// A fresh random node id.
    pub fn random() -> Self {
        NodeId(Identity::random())
    }

    /// A reproducible node id derived from `input`, e.g. a stable address.
    pub fn from_md5(input: &str) -> Self {
        NodeId(Identity::from_md5(input))
    }

    #[inline]
    pub fn identity(&self) -> Identity {
        self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; IDENTITY_SIZE] {
        self.0.as_bytes()
    }

    /// Reinterpret this node id as a ring key with the same bits.
    #[inline]
    pub fn to_key(self) -> Key {
        Key::from(self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(NodeId)
    }
}

/// How a node presents itself to the rest of the peer set.
///
/// Immutable once built. Keep it cheap to clone; connections and other
/// mutable state belong to the embedding system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    id: NodeId,
    /// Network address peers use to reach the node.
    address: String,
    placement: VirtualPlacement,
}

impl NodeDescriptor {
    /// Describe a brand new node at `address` with a random id and the
    /// default number of placements.
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_config(address, &RingConfig::default())
    }

    /// Describe a brand new node using `config` for the placement size.
    pub fn with_config(address: impl Into<String>, config: &RingConfig) -> Self {
        Self {
            id: NodeId::random(),
            address: address.into(),
            placement: VirtualPlacement::random(config.placements_per_node),
        }
    }

    /// Rebuild a descriptor from parts received from elsewhere.
    pub fn from_parts(id: NodeId, address: impl Into<String>, placement: VirtualPlacement) -> Self {
        Self {
            id,
            address: address.into(),
            placement,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    pub fn placement(&self) -> &VirtualPlacement {
        &self.placement
    }
}

impl fmt::Display for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.address)
    }
}
