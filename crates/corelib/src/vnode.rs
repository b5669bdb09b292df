//! Virtual placements.
//!
//! Each physical node occupies many positions ("virtual nodes") on the ring
//! instead of one. More positions per node give a smoother key distribution
//! and mean a join or leave moves many small ranges rather than one big one.
//!
//! Placements are drawn at random when a node is created and never change.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::token::Key;

/// Number of virtual placements each node owns by default.
pub const DISTRIBUTION_MAX: usize = 512;

/// The ordered set of ring positions owned by one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualPlacement(Vec<Key>);

impl VirtualPlacement {
    /// Draw `count` random positions.
    pub fn random(count: usize) -> Self {
        VirtualPlacement((0..count).map(|_| Key::random()).collect())
    }

    /// Use the given positions as-is, in order.
    pub fn from_keys(keys: Vec<Key>) -> Self {
        VirtualPlacement(keys)
    }

    /// Reproducible positions derived from `seed` (`md5("{seed}:{index}")`).
    ///
    /// Handy for tests and for nodes that want a stable placement across
    /// restarts.
    pub fn from_seed(seed: &str, count: usize) -> Self {
        VirtualPlacement(
            (0..count)
                .map(|index| Key::from_md5(&format!("{}:{}", seed, index)))
                .collect(),
        )
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }
}

impl Deref for VirtualPlacement {
    type Target = [Key];

    fn deref(&self) -> &[Key] {
        &self.0
    }
}
