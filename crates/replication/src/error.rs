//! Error types for replication.

/// Errors that can occur when configuring or applying a strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplicationError {
    /// A replication factor of zero places no copies at all.
    #[error("replication factor must be at least 1, got {0}")]
    InvalidFactor(usize),
}

/// Result type alias for replication.
pub type Result<T> = std::result::Result<T, ReplicationError>;
