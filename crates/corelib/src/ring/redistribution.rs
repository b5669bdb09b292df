//! Keyspace ranges that change owner on a membership event.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;
use crate::token::Key;

/// Keys in the circular interval `(start, end]` move from `source` to
/// `destination`.
///
/// Produced by [`LocalRingNode::register_node`](crate::ring::LocalRingNode::register_node)
/// and not kept anywhere: the caller migrates data for the range or drops it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redistribution {
    pub source: NodeId,
    pub destination: NodeId,
    /// Exclusive lower bound.
    pub start: Key,
    /// Inclusive upper bound.
    pub end: Key,
}

impl Redistribution {
    /// Whether `key` falls inside `(start, end]`, taking wraparound into
    /// account when `start >= end`.
    pub fn contains(&self, key: &Key) -> bool {
        if self.start < self.end {
            *key > self.start && *key <= self.end
        } else {
            *key > self.start || *key <= self.end
        }
    }

    /// True when the range crosses the top of the keyspace.
    pub fn wraps(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Redistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}] {} -> {}",
            self.start, self.end, self.source, self.destination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(last: u8) -> Key {
        let mut bytes = [0u8; 16];
        bytes[15] = last;
        Key::from_bytes(bytes)
    }

    fn range(start: Key, end: Key) -> Redistribution {
        Redistribution {
            source: NodeId::from_md5("a"),
            destination: NodeId::from_md5("b"),
            start,
            end,
        }
    }

    #[test]
    fn test_contains_linear_range() {
        let r = range(key(10), key(20));
        assert!(!r.wraps());
        assert!(!r.contains(&key(10)));
        assert!(r.contains(&key(11)));
        assert!(r.contains(&key(20)));
        assert!(!r.contains(&key(21)));
    }

    #[test]
    fn test_contains_wrapping_range() {
        let r = range(key(200), key(5));
        assert!(r.wraps());
        assert!(r.contains(&Key::MAX));
        assert!(r.contains(&Key::MIN));
        assert!(r.contains(&key(5)));
        assert!(!r.contains(&key(200)));
        assert!(!r.contains(&key(100)));
    }

    #[test]
    fn test_serde() {
        let r = range(key(1), key(2));
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["start"], "00000000000000000000000000000001");
        let back: Redistribution = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
