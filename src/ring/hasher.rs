//! Ring Hash Strategies
//!
//! The function placing node addresses and keys on the ring is pluggable so that
//! tests can pin exact ring layouts. Any deterministic, well-distributed 32-bit
//! hash works; the value is never exposed on the wire.

use super::types::RingPosition;

pub trait RingHasher: Send + Sync {
    fn hash(&self, input: &str) -> RingPosition;
}

/// IEEE CRC-32 of the input bytes. Default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32Hasher;

impl RingHasher for Crc32Hasher {
    fn hash(&self, input: &str) -> RingPosition {
        crc32fast::hash(input.as_bytes())
    }
}
