//! Error taxonomy shared by the ring, the shard stores and the dispatcher.

/// Failures of a ring lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// The router was asked for an owner while no node is registered.
    #[error("hash ring is empty: no nodes registered")]
    EmptyRing,
}

/// Failures of a shard store request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The key path parameter is not an integer.
    #[error("invalid key: {0:?} is not an integer")]
    InvalidKey(String),

    /// No record with this key is held by the shard.
    #[error("key {0} not found")]
    NotFound(i64),
}

/// Failures surfaced by the client dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No node registered, nothing to route to.
    #[error("cannot route: hash ring is empty")]
    EmptyRing,

    /// The shard rejected the key as non-integer.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// The value cannot be carried as a single path segment.
    #[error("invalid value: {0:?}")]
    InvalidValue(String),

    /// The node address cannot form an HTTP URL.
    #[error("invalid shard address: {0:?}")]
    InvalidAddress(String),

    /// Transport-level failure talking to a shard.
    #[error("shard {address} unreachable")]
    Unreachable {
        /// Address of the shard that could not be reached.
        address: String,
        #[source]
        source: reqwest::Error,
    },

    /// The shard answered with a status outside the wire contract.
    #[error("shard {address} answered with unexpected status {status}")]
    UnexpectedStatus {
        address: String,
        status: u16,
    },

    /// The shard answered 2xx but the body is not a valid record payload.
    #[error("shard {address} sent an undecodable body")]
    Decode {
        address: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<RingError> for DispatchError {
    fn from(err: RingError) -> Self {
        match err {
            RingError::EmptyRing => DispatchError::EmptyRing,
        }
    }
}
