//! Ring configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vnode::DISTRIBUTION_MAX;

/// Tunables shared by every node in a peer set.
///
/// All peers must agree on these values; mixing placement counts breaks the
/// one-to-one mapping between members and their ring entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual placements generated per node.
    pub placements_per_node: usize,
}

impl RingConfig {
    pub fn new(placements_per_node: usize) -> Self {
        Self { placements_per_node }
    }

    /// Reject configurations that cannot produce a usable ring.
    pub fn validate(&self) -> Result<()> {
        if self.placements_per_node == 0 {
            return Err(Error::InvalidConfig(
                "placements_per_node must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            placements_per_node: DISTRIBUTION_MAX,
        }
    }
}
