//! Consistent Hashing Module
//!
//! Maps arbitrary keys onto the shard that owns them without a central directory.
//!
//! ## Core Concepts
//! - **Registry**: `NodeRegistry` holds every known shard (identity + address) and rejects duplicate identities.
//! - **Ring**: `HashRing` keeps the occupied positions of a 32-bit circular space in ascending order.
//! - **Routing**: `ConsistentHashRouter` hashes a key onto the ring and walks clockwise to the first
//!   occupied position, wrapping around past the largest one.
//!
//! Each physical node occupies exactly one ring position. Load balance therefore depends on where
//! the node addresses happen to hash, and losing a node moves all of its keys onto a single
//! neighbour. There are no virtual nodes.

pub mod hash_ring;
pub mod hasher;
pub mod registry;
pub mod router;
pub mod types;

pub use hash_ring::HashRing;
pub use hasher::{Crc32Hasher, RingHasher};
pub use registry::NodeRegistry;
pub use router::ConsistentHashRouter;
pub use types::{Node, NodeId, RingPosition};

#[cfg(test)]
mod tests;
