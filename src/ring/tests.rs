//! Consistent Hashing Tests
//!
//! ## Test Scopes
//! - **HashRing**: ordering invariants and clockwise successor lookup, including wrap-around.
//! - **NodeRegistry**: duplicate identities and position collisions are rejected.
//! - **Router**: registration, stable routing and the empty-ring error.

#[cfg(test)]
mod tests {
    use crate::error::RingError;
    use crate::ring::{
        ConsistentHashRouter, Crc32Hasher, HashRing, Node, NodeId, NodeRegistry, RingHasher,
        RingPosition,
    };
    use rand::Rng;
    use std::collections::HashMap;

    /// Hasher with hand-picked positions; unknown inputs fall back to CRC-32.
    struct FixedHasher(HashMap<String, RingPosition>);

    impl FixedHasher {
        fn new(entries: &[(&str, RingPosition)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(input, position)| (input.to_string(), *position))
                    .collect(),
            )
        }
    }

    impl RingHasher for FixedHasher {
        fn hash(&self, input: &str) -> RingPosition {
            self.0
                .get(input)
                .copied()
                .unwrap_or_else(|| Crc32Hasher.hash(input))
        }
    }

    fn three_nodes() -> Vec<Node> {
        vec![
            Node::new(0, "127.0.0.1:3000"),
            Node::new(1, "127.0.0.1:3001"),
            Node::new(2, "127.0.0.1:3002"),
        ]
    }

    fn ring_of(positions: &[RingPosition]) -> HashRing {
        let nodes: Vec<Node> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Node::new(i as i64, format!("n{}", p)))
            .collect();
        let table: Vec<(String, RingPosition)> =
            positions.iter().map(|p| (format!("n{}", p), *p)).collect();
        let entries: Vec<(&str, RingPosition)> =
            table.iter().map(|(s, p)| (s.as_str(), *p)).collect();

        let mut ring = HashRing::new();
        ring.rebuild(&nodes, &FixedHasher::new(&entries));
        ring
    }

    /// Brute-force successor: smallest position >= target, else the smallest overall.
    fn oracle(positions: &[RingPosition], target: RingPosition) -> RingPosition {
        let mut sorted = positions.to_vec();
        sorted.sort();
        sorted
            .iter()
            .copied()
            .find(|&p| p >= target)
            .unwrap_or(sorted[0])
    }

    // ============================================================
    // HASH RING TESTS
    // ============================================================

    #[test]
    fn test_crc32_hasher_matches_ieee_checksum() {
        // Standard CRC-32/IEEE check value.
        assert_eq!(Crc32Hasher.hash("123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_rebuild_sorts_positions() {
        let ring = ring_of(&[300, 10, 2000, 45]);
        assert_eq!(ring.positions(), &[10, 45, 300, 2000]);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_rebuild_matches_hashed_addresses() {
        let nodes = three_nodes();
        let mut ring = HashRing::new();
        ring.rebuild(&nodes, &Crc32Hasher);

        let mut expected: Vec<RingPosition> =
            nodes.iter().map(|n| Crc32Hasher.hash(&n.address)).collect();
        expected.sort();

        assert_eq!(ring.positions(), expected.as_slice());
        assert!(ring.positions().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_find_owner_successor() {
        let ring = ring_of(&[10, 20, 30]);

        assert_eq!(ring.find_owner(0), Ok(10));
        assert_eq!(ring.find_owner(5), Ok(10));
        assert_eq!(ring.find_owner(10), Ok(10), "exact hit owns itself");
        assert_eq!(ring.find_owner(11), Ok(20));
        assert_eq!(ring.find_owner(30), Ok(30), "last position is not skipped");
    }

    #[test]
    fn test_find_owner_wraps_around() {
        let ring = ring_of(&[10, 20, 30]);

        assert_eq!(ring.find_owner(31), Ok(10));
        assert_eq!(ring.find_owner(u32::MAX), Ok(10));
    }

    #[test]
    fn test_find_owner_single_position() {
        let ring = ring_of(&[500]);

        assert_eq!(ring.find_owner(0), Ok(500));
        assert_eq!(ring.find_owner(500), Ok(500));
        assert_eq!(ring.find_owner(501), Ok(500));
    }

    #[test]
    fn test_find_owner_empty_ring() {
        let ring = HashRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.find_owner(42), Err(RingError::EmptyRing));
    }

    #[test]
    fn test_find_owner_matches_oracle() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let count = rng.gen_range(1..20);
            let mut positions: Vec<RingPosition> = (0..count).map(|_| rng.r#gen()).collect();
            positions.sort();
            positions.dedup();
            let ring = ring_of(&positions);

            for _ in 0..200 {
                let target: RingPosition = rng.r#gen();
                assert_eq!(
                    ring.find_owner(target),
                    Ok(oracle(&positions, target)),
                    "target {} on ring {:?}",
                    target,
                    positions
                );
            }
        }
    }

    // ============================================================
    // NODE REGISTRY TESTS
    // ============================================================

    #[test]
    fn test_registry_rejects_duplicate_identity() {
        let mut registry = NodeRegistry::new();

        assert!(registry.add_node(Node::new(1, "127.0.0.1:3001"), 100));
        assert!(!registry.add_node(Node::new(1, "127.0.0.1:9999"), 200));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&NodeId(1)).map(|n| n.address.as_str()),
            Some("127.0.0.1:3001")
        );
        assert!(registry.owner_of(200).is_none());
    }

    #[test]
    fn test_registry_rejects_position_collision() {
        let mut registry = NodeRegistry::new();

        assert!(registry.add_node(Node::new(1, "a"), 100));
        assert!(!registry.add_node(Node::new(2, "b"), 100));

        assert!(!registry.contains(&NodeId(2)));
        assert_eq!(registry.owner_of(100).map(|n| n.id), Some(NodeId(1)));
    }

    // ============================================================
    // ROUTER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_router_idempotent_registration() {
        let router = ConsistentHashRouter::new();
        for node in three_nodes() {
            assert!(router.add_node(node).await);
        }
        let positions_before = router.positions().await;

        assert!(!router.add_node(Node::new(1, "10.0.0.1:4000")).await);

        assert_eq!(router.node_count().await, 3);
        assert_eq!(router.positions().await, positions_before);
        assert_eq!(
            router.get_node(NodeId(1)).await.map(|n| n.address),
            Some("127.0.0.1:3001".to_string())
        );
    }

    #[tokio::test]
    async fn test_router_ring_tracks_registry() {
        let router = ConsistentHashRouter::new();
        let nodes = three_nodes();

        for (i, node) in nodes.iter().enumerate() {
            router.add_node(node.clone()).await;

            let positions = router.positions().await;
            assert_eq!(positions.len(), i + 1);
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        assert_eq!(router.nodes().await, nodes);
    }

    #[tokio::test]
    async fn test_router_empty_ring_is_an_error() {
        let router = ConsistentHashRouter::new();
        assert_eq!(router.locate("5").await, Err(RingError::EmptyRing));
        assert_eq!(router.locate("").await, Err(RingError::EmptyRing));
    }

    #[tokio::test]
    async fn test_router_locate_is_stable() {
        let router = ConsistentHashRouter::new();
        for node in three_nodes() {
            router.add_node(node).await;
        }

        for i in 0..100 {
            let key = i.to_string();
            let first = router.locate(&key).await.unwrap();
            for _ in 0..5 {
                assert_eq!(router.locate(&key).await.unwrap(), first);
            }
        }
    }

    #[tokio::test]
    async fn test_router_locate_with_fixed_layout() {
        let hasher = FixedHasher::new(&[
            ("127.0.0.1:3000", 1_000),
            ("127.0.0.1:3001", 2_000),
            ("127.0.0.1:3002", 3_000),
            ("low", 5),
            ("mid", 1_500),
            ("exact", 3_000),
            ("high", 4_000),
        ]);
        let router = ConsistentHashRouter::with_hasher(hasher);
        for node in three_nodes() {
            router.add_node(node).await;
        }

        assert_eq!(router.locate("low").await.unwrap().id, NodeId(0));
        assert_eq!(router.locate("mid").await.unwrap().id, NodeId(1));
        assert_eq!(router.locate("exact").await.unwrap().id, NodeId(2));
        assert_eq!(router.locate("high").await.unwrap().id, NodeId(0));
    }

    #[tokio::test]
    async fn test_router_adding_node_only_moves_keys_to_it() {
        const QUARTER: RingPosition = 1 << 30;
        let hasher = FixedHasher::new(&[
            ("a", QUARTER),
            ("b", 2 * QUARTER),
            ("c", 3 * QUARTER),
            ("d", 2 * QUARTER + QUARTER / 2),
        ]);
        let router = ConsistentHashRouter::with_hasher(hasher);
        router.add_node(Node::new(0, "a")).await;
        router.add_node(Node::new(1, "b")).await;
        router.add_node(Node::new(2, "c")).await;

        let keys: Vec<String> = (0..2000).map(|i| format!("key-{}", i)).collect();
        let mut before = HashMap::new();
        for key in &keys {
            before.insert(key.clone(), router.locate(key).await.unwrap().id);
        }

        router.add_node(Node::new(3, "d")).await;

        let mut moved = 0;
        for key in &keys {
            let after = router.locate(key).await.unwrap().id;
            if after != before[key] {
                assert_eq!(after, NodeId(3), "{} moved to an existing node", key);
                assert_eq!(before[key], NodeId(2), "only keys between b and d move");
                moved += 1;
            }
        }
        assert!(moved > 0, "the new node should take over some keys");
        assert!(moved < keys.len() / 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_router_concurrent_lookups_during_registration() {
        let router = std::sync::Arc::new(ConsistentHashRouter::new());
        router.add_node(Node::new(0, "127.0.0.1:3000")).await;

        let mut handles = Vec::new();
        for worker in 0..8 {
            let router = router.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..200 {
                    let node = router.locate(&format!("{}-{}", worker, i)).await.unwrap();
                    assert!(router.get_node(node.id).await.is_some());

                    let position = router.position_of(&node.address);
                    assert!(
                        router.positions().await.contains(&position),
                        "{} resolved to a position missing from the ring",
                        node.id
                    );
                    tokio::task::yield_now().await;
                }
            }));
        }

        for id in 1..20 {
            router
                .add_node(Node::new(id, format!("127.0.0.1:{}", 3000 + id)))
                .await;
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(router.node_count().await, 20);
    }
}
