//! Scenario tests for the hash ring implementation.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Multiple nodes**: Distribution, consistency
//! 3. **Edge cases**: Wraparound, single node, duplicate names
//! 4. **Membership changes**: Scale-out and scale-in remap bounds

use corelib::hash::{HasherKind, Murmur3, RingHasher};
use corelib::{remaps, Distribution, Error, Ring, RingBuilder};

fn data_keys(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("data{i}")).collect()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring = Ring::new(5).unwrap();
    assert_eq!(ring.get_node("key1"), Err(Error::EmptyRing));
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.len(), 0);
}

#[test]
fn test_new_ring_uses_murmur3() {
    let mut ring = Ring::new(5).unwrap();
    ring.add_nodes(["db1", "db2"]);

    assert_eq!(ring.replicas(), 5);
    assert_eq!(ring.len(), 10);
    assert_eq!(ring.hasher().hash(b"test"), Murmur3.hash(b"test"));
}

#[test]
fn test_add_two_nodes_then_remove_one() {
    let mut ring = Ring::new(5).unwrap();
    ring.add_nodes(["db1", "db2"]);

    assert_eq!(ring.len(), 10);
    assert!(
        ring.entries().windows(2).all(|w| w[0].hash < w[1].hash),
        "hashes should be strictly increasing"
    );

    ring.remove_nodes(["db2"]);
    assert_eq!(ring.len(), 5);
    assert!(ring.entries().iter().all(|v| v.owner == "db1"));
    for _ in 0..3 {
        assert_eq!(ring.get_node("k").unwrap(), "db1");
    }
}

#[test]
fn test_get_node_returns_member() {
    let mut ring = Ring::new(5).unwrap();
    ring.add_nodes(["db1", "db2", "db3"]);
    assert_eq!(ring.len(), 15);

    let node = ring.get_node("data1").unwrap();
    assert!(["db1", "db2", "db3"].contains(&node), "unexpected owner {node}");
}

#[test]
fn test_remove_node() {
    let mut ring = Ring::new(5).unwrap();
    ring.add_nodes(["db1", "db2", "db3"]);

    assert_eq!(ring.remove_node("db2"), 1);
    assert_eq!(ring.len(), 10);

    // Unknown node: nothing changes.
    let before = ring.entries().to_vec();
    assert_eq!(ring.remove_node("db4"), 0);
    assert_eq!(ring.entries(), before.as_slice());
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_consistent_lookup() {
    let mut ring = Ring::new(50).unwrap();
    ring.add_nodes(["db1", "db2"]);

    let key = "consistent-key";
    let first = ring.get_node(key).unwrap();
    for _ in 0..10 {
        assert_eq!(ring.get_node(key).unwrap(), first);
    }
}

#[test]
fn test_same_nodes_same_placement() {
    let build = || {
        RingBuilder::new()
            .replicas(40)
            .nodes(["db1", "db2", "db3"])
            .build()
            .unwrap()
    };
    let (a, b) = (build(), build());

    for key in data_keys(0..500) {
        assert_eq!(a.get_node(&key).unwrap(), b.get_node(&key).unwrap());
    }
}

#[test]
fn test_data_distribution_is_even() {
    let mut ring = Ring::new(300).unwrap();
    ring.add_nodes(["db1", "db2", "db3", "db4"]);

    let dist = Distribution::sample(&ring, data_keys(0..50_000)).unwrap();
    for (node, count) in dist.iter() {
        assert!(count > 0, "{node} received no keys");
    }
    assert!(
        dist.max_skew() < 0.3,
        "distribution too skewed: {:?}",
        dist.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_every_builtin_hasher_spreads_keys() {
    for kind in [HasherKind::Murmur3, HasherKind::Xxh32, HasherKind::Sip32] {
        let ring = RingBuilder::new()
            .replicas(200)
            .hasher(kind)
            .nodes(["db1", "db2", "db3"])
            .build()
            .unwrap();
        let dist = Distribution::sample(&ring, data_keys(0..20_000)).unwrap();
        assert!(
            dist.max_skew() < 0.4,
            "{kind} too skewed: {:?}",
            dist.iter().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_crc32_ring_reaches_every_node() {
    let ring = RingBuilder::new()
        .replicas(200)
        .hasher(HasherKind::Crc32)
        .nodes(["db1", "db2", "db3"])
        .build()
        .unwrap();
    assert_eq!(ring.hasher().hash(b"test"), 0xd87f_7e0c);

    let dist = Distribution::sample(&ring, data_keys(0..20_000)).unwrap();
    assert_eq!(dist.total(), 20_000);
    for (node, count) in dist.iter() {
        assert!(count > 0, "{node} received no keys");
    }
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_single_node() {
    let mut ring = Ring::new(4).unwrap();
    ring.add_node("db1");

    for key in ["key1", "key2", "key3", "very-long-key-name", ""] {
        assert_eq!(ring.get_node(key).unwrap(), "db1");
    }
}

#[test]
fn test_wrap_around_to_smallest_entry() {
    let mut ring = Ring::new(5).unwrap();
    ring.add_nodes(["db1", "db2"]);
    let last = ring.entries().last().unwrap().hash;
    let first = ring.entries()[0].clone();

    let key = (0..100_000)
        .map(|i| format!("key{i}"))
        .find(|k| Murmur3.hash(k.as_bytes()) > last)
        .expect("some key hashes past the last entry");

    let vnode = ring.get_vnode(&key).unwrap();
    assert_eq!(vnode, &first);
    assert_eq!(ring.get_node(&key).unwrap(), first.owner);
}

#[test]
fn test_add_remove_add() {
    let mut ring = Ring::new(4).unwrap();
    ring.add_node("db1");
    let placed = ring.entries().to_vec();

    ring.remove_node("db1");
    assert!(ring.is_empty());
    assert_eq!(ring.get_node("key"), Err(Error::EmptyRing));

    ring.add_node("db1");
    assert_eq!(ring.entries(), placed.as_slice());
}

#[test]
fn test_idempotent_add() {
    let mut ring = Ring::new(4).unwrap();
    ring.add_node("db1");
    let once = ring.entries().to_vec();

    assert_eq!(ring.add_node("db1"), 0);
    assert_eq!(ring.entries(), once.as_slice());
    assert_eq!(ring.node_count(), 1);
}

#[test]
fn test_zero_replicas_rejected() {
    assert_eq!(Ring::new(0).unwrap_err(), Error::InvalidReplicas(0));
}

// ============================================================================
// Membership Changes
// ============================================================================

#[test]
fn test_scale_out_moves_bounded_fraction() {
    let mut before = Ring::new(300).unwrap();
    before.add_nodes(["db1", "db2", "db3", "db4"]);
    let mut after = before.clone();
    after.add_node("db5");

    let keys = data_keys(0..20_000);
    let moved = remaps(&before, &after, &keys).unwrap();

    // Expect roughly 1/5 of the keys to land on the new node.
    let ratio = moved.len() as f64 / keys.len() as f64;
    assert!((0.12..=0.28).contains(&ratio), "moved ratio {ratio:.3}");
    for m in &moved {
        assert_eq!(m.to, "db5", "{} moved between old nodes", m.key);
    }
}

#[test]
fn test_scale_in_only_moves_removed_keys() {
    let mut before = Ring::new(300).unwrap();
    before.add_nodes(["db1", "db2", "db3", "db4"]);
    let mut after = before.clone();
    after.remove_node("db2");

    let keys = data_keys(0..20_000);
    let moved = remaps(&before, &after, &keys).unwrap();
    let owned_by_db2 = Distribution::sample(&before, &keys).unwrap().count("db2");

    assert_eq!(moved.len(), owned_by_db2);
    assert!(moved.iter().all(|m| m.from == "db2" && m.to != "db2"));
}
