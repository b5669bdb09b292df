//! Integration tests for the local ring node.
//!
//! # Test Strategy
//!
//! 1. **Membership**: self, duplicate and unknown registrations
//! 2. **Agreement**: peers with the same view route keys identically
//! 3. **Edge cases**: wraparound at the top of the keyspace
//! 4. **Replica sets**: distinct owners, clamped counts
//! 5. **Redistributions**: reported ranges match the change in ownership

use std::collections::HashSet;

use ringcore::{Error, Key, LocalRingNode, NodeDescriptor, NodeId, RingConfig};

/// Build `n` nodes that have all registered each other.
fn converged_ring(n: usize) -> Vec<LocalRingNode> {
    let mut nodes: Vec<LocalRingNode> = (0..n)
        .map(|i| LocalRingNode::new(format!("host{}", i + 1)))
        .collect();
    let descriptors: Vec<NodeDescriptor> = nodes.iter().map(|n| n.descriptor().clone()).collect();
    for node in &mut nodes {
        for descriptor in &descriptors {
            if descriptor.id() != node.id() {
                node.register_node(descriptor.clone()).unwrap();
            }
        }
    }
    nodes
}

// ============================================================================
// Membership
// ============================================================================

#[test]
fn test_new_local_node() {
    let node = LocalRingNode::new("HOSTADDR");
    assert_eq!(node.address(), "HOSTADDR");
    assert_eq!(node.placement().len(), 512);
    assert_eq!(node.member_count(), 0);
}

#[test]
fn test_register_node() {
    let mut inst1 = LocalRingNode::new("host1");
    let inst2 = LocalRingNode::new("host2");
    let inst3 = LocalRingNode::new("host3");

    // Can't add node to itself
    let own = inst1.descriptor().clone();
    let err = inst1.register_node(own).unwrap_err();
    assert_eq!(err, Error::SelfRegistration(inst1.id()));
    assert!(err.is_membership());

    inst1.register_node(inst2.descriptor().clone()).unwrap();

    // Can't register twice
    let err = inst1.register_node(inst2.descriptor().clone()).unwrap_err();
    assert_eq!(err, Error::AlreadyRegistered(inst2.id()));
    assert_eq!(err.to_string(), format!("node {} is already registered", inst2.id()));

    inst1.register_node(inst3.descriptor().clone()).unwrap();
    assert_eq!(inst1.member_count(), 2);
    assert_eq!(inst1.placement_count(), 3 * 512);
}

#[test]
fn test_deregister_node() {
    let mut inst1 = LocalRingNode::new("host1");
    let inst2 = LocalRingNode::new("host2");
    let desc2 = inst2.descriptor().clone();

    assert_eq!(inst1.deregister_node(&desc2), Err(Error::NotRegistered(inst2.id())));

    inst1.register_node(desc2.clone()).unwrap();
    inst1.deregister_node(&desc2).unwrap();

    // Register again, then deregister twice
    inst1.register_node(desc2.clone()).unwrap();
    inst1.deregister_node(&desc2).unwrap();
    let err = inst1.deregister_node(&desc2).unwrap_err();
    assert_eq!(err, Error::NotRegistered(inst2.id()));
}

#[test]
fn test_register_deregister_round_trip() {
    let mut inst1 = LocalRingNode::new("host1");
    let inst2 = LocalRingNode::new("host2");
    let desc2 = inst2.descriptor().clone();

    inst1.register_node(desc2.clone()).unwrap();
    assert!(inst1.node_registered(&desc2.id()));
    inst1.deregister_node(&desc2).unwrap();

    assert!(!inst1.node_registered(&desc2.id()));
    assert_eq!(inst1.placement_count(), 512);
    for _ in 0..1000 {
        assert_eq!(inst1.get_node_for(&Key::random()).id(), inst1.id());
    }
    for position in desc2.placement().iter() {
        assert_ne!(inst1.get_node_for(position).id(), desc2.id());
    }
}

// ============================================================================
// Agreement
// ============================================================================

#[test]
fn test_get_node_for_agreement() {
    let nodes = converged_ring(3);

    for _ in 0..100 {
        let key = Key::random();
        let owners: HashSet<NodeId> = nodes.iter().map(|n| n.get_node_for(&key).id()).collect();
        assert_eq!(owners.len(), 1, "peers disagree on owner of {key}");
    }
}

#[test]
fn test_get_node_for_wraparound() {
    let nodes = converged_ring(3);
    let key = Key::MAX;

    let owner = nodes[0].get_node_for(&key).id();
    assert!(nodes.iter().any(|n| n.id() == owner), "owner must be a real node");
    for node in &nodes {
        assert_eq!(node.get_node_for(&key).id(), owner);
        // Nothing is above MAX, so the first placement on the ring owns it.
        let (_, first_owner) = node.index().first().unwrap();
        assert_eq!(*first_owner, owner);
    }
}

#[test]
fn test_md5_keys_route_consistently() {
    let nodes = converged_ring(3);
    let key = Key::from_md5("user:42");
    let owner = nodes[0].get_node_for(&key).id();
    assert!(nodes.iter().all(|n| n.get_node_for(&key).id() == owner));
}

// ============================================================================
// Replica sets
// ============================================================================

#[test]
fn test_get_nodes_for_distinct() {
    let nodes = converged_ring(4);
    let key = Key::random();

    for count in 1..=4 {
        let replicas = nodes[0].get_nodes_for(&key, count);
        assert_eq!(replicas.len(), count);
        let unique: HashSet<NodeId> = replicas.iter().map(|n| n.id()).collect();
        assert_eq!(unique.len(), count);
        assert_eq!(replicas[0].id(), nodes[0].get_node_for(&key).id());
    }

    let all = nodes[0].get_nodes_for(&key, 10);
    assert_eq!(all.len(), 4, "count is clamped to the population");
}

#[test]
fn test_get_nodes_for_agreement() {
    let nodes = converged_ring(4);
    let key = Key::random();
    let expected: Vec<NodeId> = nodes[0].get_nodes_for(&key, 3).iter().map(|n| n.id()).collect();
    for node in &nodes[1..] {
        let got: Vec<NodeId> = node.get_nodes_for(&key, 3).iter().map(|n| n.id()).collect();
        assert_eq!(got, expected);
    }
}

// ============================================================================
// Redistributions
// ============================================================================

#[test]
fn test_redistributions_describe_join() {
    let mut inst1 = LocalRingNode::new("host1");
    let inst2 = LocalRingNode::new("host2");

    let moves = inst1.register_node(inst2.descriptor().clone()).unwrap();
    assert!(!moves.is_empty());
    assert!(moves.len() <= 512);
    for m in &moves {
        assert_eq!(m.source, inst1.id());
        assert_eq!(m.destination, inst2.id());
        assert!(inst2.placement().contains(&m.end));
        assert!(inst1.placement().contains(&m.start));
    }
}

#[test]
fn test_redistribution_sources_are_existing_nodes() {
    let config = RingConfig::new(64);
    let mut local = LocalRingNode::with_config("host1", &config).unwrap();
    let peers: Vec<NodeDescriptor> = (2..=4)
        .map(|i| NodeDescriptor::with_config(format!("host{i}"), &config))
        .collect();

    let mut known: HashSet<NodeId> = HashSet::from([local.id()]);
    for peer in &peers {
        let moves = local.register_node(peer.clone()).unwrap();
        for m in &moves {
            assert!(known.contains(&m.source));
            assert_eq!(m.destination, peer.id());
        }
        known.insert(peer.id());
    }
}

#[test]
fn test_join_moves_bounded_fraction() {
    let config = RingConfig::new(128);
    let mut local = LocalRingNode::with_config("host1", &config).unwrap();
    local.register_node(NodeDescriptor::with_config("host2", &config)).unwrap();

    let keys: Vec<Key> = (0..5_000).map(|i| Key::from_md5(&format!("key-{i}"))).collect();
    let before: Vec<NodeId> = keys.iter().map(|k| local.get_node_for(k).id()).collect();

    let joiner = NodeDescriptor::with_config("host3", &config);
    local.register_node(joiner.clone()).unwrap();

    let mut moved = 0;
    for (key, old) in keys.iter().zip(before) {
        let new = local.get_node_for(key).id();
        if new != old {
            // Keys only ever move to the node that joined.
            assert_eq!(new, joiner.id());
            moved += 1;
        }
    }
    let ratio = moved as f64 / keys.len() as f64;
    assert!((0.1..=0.6).contains(&ratio), "moved ratio {ratio:.2}");
}
