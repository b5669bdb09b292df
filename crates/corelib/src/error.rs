//! Error types for the core library.

use crate::node::NodeId;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Membership errors are local validation failures: retrying the same call
/// without changing membership fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A node tried to register its own identity.
    #[error("cannot register node {0} with itself")]
    SelfRegistration(NodeId),

    #[error("node {0} is already registered")]
    AlreadyRegistered(NodeId),

    #[error("node {0} is not registered")]
    NotRegistered(NodeId),

    /// A peer's placement length differs from the ring's placement count.
    #[error("node {node} has {actual} placements, expected {expected}")]
    PlacementMismatch {
        node: NodeId,
        expected: usize,
        actual: usize,
    },

    /// `first`/`last` on an index with no entries.
    #[error("ring index is empty")]
    EmptyIndex,

    /// Text that is not 32 hex digits.
    #[error("invalid identity: {0:?}")]
    InvalidIdentity(String),

    #[error("invalid ring configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns true for the membership validation errors.
    pub fn is_membership(&self) -> bool {
        matches!(
            self,
            Error::SelfRegistration(_) | Error::AlreadyRegistered(_) | Error::NotRegistered(_)
        )
    }
}
