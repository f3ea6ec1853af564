use std::fmt;

/// A point on the 32-bit ring.
pub type RingPosition = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// A shard known to the cluster.
///
/// The address is an opaque `host:port` endpoint; it is also the input hashed to
/// place the node on the ring, so two nodes must never share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub address: String,
}

impl Node {
    pub fn new(id: i64, address: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            address: address.into(),
        }
    }
}
