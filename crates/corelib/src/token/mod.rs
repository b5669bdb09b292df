//! Identity values for the hash ring.
//!
//! Every position on the ring, whether it is a data key or a node's virtual
//! placement, is a 128-bit [`Identity`] compared byte-lexicographically.
//! The two semantic uses are kept apart as [`Key`] and
//! [`NodeId`](crate::node::NodeId); converting between them is always
//! explicit.

pub mod identity;
pub mod key;

pub use identity::{Identity, IDENTITY_SIZE};
pub use key::Key;
