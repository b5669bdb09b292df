//! Consistent hash ring implementation.
//!
//! [`RingIndex`] keeps placements ordered; [`LocalRingNode`] layers
//! membership on top of it and reports [`Redistribution`]s on joins.

pub mod index;
pub mod local;
pub mod redistribution;
pub mod shared;

pub use index::RingIndex;
pub use local::LocalRingNode;
pub use redistribution::Redistribution;
pub use shared::SharedRingNode;
