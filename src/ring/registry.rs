use super::types::{Node, NodeId, RingPosition};
use std::collections::{BTreeMap, HashMap};

/// Known shards, indexed both by identity and by the ring position they occupy.
///
/// Not synchronized on its own; `ConsistentHashRouter` guards it together with
/// the ring under one lock.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<NodeId, Node>,
    owners: HashMap<RingPosition, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` at `position`.
    ///
    /// Returns `false` and leaves the registry untouched when the identity is
    /// already registered, or when another node already occupies `position`.
    pub fn add_node(&mut self, node: Node, position: RingPosition) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }

        if let Some(holder) = self.owners.get(&position) {
            tracing::warn!(
                "Ring position {} of {} ({}) already held by {}",
                position,
                node.id,
                node.address,
                holder
            );
            return false;
        }

        self.owners.insert(position, node.id);
        self.nodes.insert(node.id, node);
        true
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Resolves an occupied ring position back to its node.
    pub fn owner_of(&self, position: RingPosition) -> Option<&Node> {
        self.owners
            .get(&position)
            .and_then(|id| self.nodes.get(id))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in ascending identity order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
