//! Core library for consistent hashing over a 128-bit ring.
//!
//! This crate provides:
//! - 128-bit identities, used as data [`Key`]s and [`NodeId`]s
//! - Virtual placements: the random ring positions each node occupies
//! - An in-house ordered [`RingIndex`] with successor/predecessor queries
//! - [`LocalRingNode`]: registration, deregistration, key routing and
//!   [`Redistribution`] reporting on joins

pub mod config;
pub mod error;
pub mod membership;
pub mod node;
pub mod ring;
pub mod token;
pub mod vnode;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use membership::MembershipTable;
pub use node::{NodeDescriptor, NodeId};
pub use ring::{LocalRingNode, Redistribution, RingIndex, SharedRingNode};
pub use token::{Identity, Key, IDENTITY_SIZE};
pub use vnode::{VirtualPlacement, DISTRIBUTION_MAX};
