use super::hash_ring::HashRing;
use super::hasher::{Crc32Hasher, RingHasher};
use super::registry::NodeRegistry;
use super::types::{Node, NodeId, RingPosition};
use crate::error::RingError;

use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct RingState {
    registry: NodeRegistry,
    ring: HashRing,
}

/// Resolves keys to their owning shard.
///
/// Registry mutation and ring rebuild happen together under the write lock,
/// so a lookup never sees a ring that disagrees with the registry. Lookups
/// only take the read lock and do not contend with each other.
pub struct ConsistentHashRouter {
    state: RwLock<RingState>,
    hasher: Box<dyn RingHasher>,
}

impl ConsistentHashRouter {
    pub fn new() -> Self {
        Self::with_hasher(Crc32Hasher)
    }

    pub fn with_hasher<H>(hasher: H) -> Self
    where
        H: RingHasher + 'static,
    {
        Self {
            state: RwLock::new(RingState::default()),
            hasher: Box::new(hasher),
        }
    }

    /// Ring position an arbitrary string (key or node address) hashes to.
    pub fn position_of(&self, input: &str) -> RingPosition {
        self.hasher.hash(input)
    }

    /// Registers a node and rebuilds the ring.
    ///
    /// Returns `false` without any change if the identity is already known
    /// (or its address collides with an occupied position).
    pub async fn add_node(&self, node: Node) -> bool {
        let position = self.position_of(&node.address);
        let mut state = self.state.write().await;
        let (id, address) = (node.id, node.address.clone());

        if !state.registry.add_node(node, position) {
            tracing::warn!("Rejected registration of {} at {}", id, address);
            return false;
        }

        let RingState { registry, ring } = &mut *state;
        ring.rebuild(registry.nodes(), self.hasher.as_ref());

        tracing::info!(
            "Registered {} at {} (ring position {}, {} node(s) total)",
            id,
            address,
            position,
            registry.len()
        );
        true
    }

    /// Returns the node owning `key`.
    pub async fn locate(&self, key: &str) -> Result<Node, RingError> {
        let target = self.position_of(key);
        let state = self.state.read().await;
        let owner_position = state.ring.find_owner(target)?;

        let node = state
            .registry
            .owner_of(owner_position)
            .cloned()
            .ok_or(RingError::EmptyRing)?;

        tracing::debug!(
            "Key {:?} (position {}) -> {} at {}",
            key,
            target,
            node.id,
            node.address
        );
        Ok(node)
    }

    pub async fn get_node(&self, id: NodeId) -> Option<Node> {
        self.state.read().await.registry.get(&id).cloned()
    }

    /// Registered nodes in ascending identity order.
    pub async fn nodes(&self) -> Vec<Node> {
        self.state.read().await.registry.nodes().cloned().collect()
    }

    /// Snapshot of the occupied ring positions.
    pub async fn positions(&self) -> Vec<RingPosition> {
        self.state.read().await.ring.positions().to_vec()
    }

    pub async fn node_count(&self) -> usize {
        self.state.read().await.registry.len()
    }
}

impl Default for ConsistentHashRouter {
    fn default() -> Self {
        Self::new()
    }
}
