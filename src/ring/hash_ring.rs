use super::hasher::RingHasher;
use super::types::{Node, RingPosition};
use crate::error::RingError;

/// Ascending, duplicate-free sequence of occupied ring positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashRing {
    positions: Vec<RingPosition>,
}

impl HashRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the ring from scratch for the given node set.
    ///
    /// O(n log n) in the number of nodes. Only call this on membership change,
    /// never per lookup.
    pub fn rebuild<'a, I>(&mut self, nodes: I, hasher: &dyn RingHasher)
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut positions: Vec<RingPosition> = nodes
            .into_iter()
            .map(|node| hasher.hash(&node.address))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        self.positions = positions;
    }

    /// Returns the position responsible for `target`: the smallest occupied
    /// position `>= target`, wrapping to the smallest one overall when `target`
    /// lies past the last position.
    pub fn find_owner(&self, target: RingPosition) -> Result<RingPosition, RingError> {
        let idx = self.positions.partition_point(|&position| position < target);
        self.positions
            .get(idx)
            .or_else(|| self.positions.first())
            .copied()
            .ok_or(RingError::EmptyRing)
    }

    pub fn positions(&self) -> &[RingPosition] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
