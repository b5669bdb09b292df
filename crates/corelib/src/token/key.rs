//! Data-space coordinates on the ring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::node::NodeId;
use crate::token::identity::{Identity, IDENTITY_SIZE};

/// A coordinate in the 128-bit data keyspace.
///
/// Virtual placements are keys too: they mark where a node sits on the ring.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Identity);

impl Key {
    /// The smallest key on the ring.
    pub const MIN: Key = Key(Identity::MIN);
    /// The largest key on the ring.
    pub const MAX: Key = Key(Identity::MAX);

    #[inline]
    pub const fn from_bytes(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Key(Identity::from_bytes(bytes))
    }

    /// A uniformly random key.
    pub fn random() -> Self {
        Key(Identity::random())
    }

    /// The MD5 digest of `input` as a key.
    pub fn from_md5(input: &str) -> Self {
        Key(Identity::from_md5(input))
    }

    #[inline]
    pub fn identity(&self) -> Identity {
        self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; IDENTITY_SIZE] {
        self.0.as_bytes()
    }

    /// Reinterpret this key as a node id with the same bits.
    #[inline]
    pub fn to_node_id(self) -> NodeId {
        NodeId::from_identity(self.0)
    }
}

impl From<Identity> for Key {
    fn from(identity: Identity) -> Self {
        Key(identity)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Key)
    }
}
