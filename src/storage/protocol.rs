//! Shard Network Protocol
//!
//! Route patterns and the JSON record exchanged between the dispatcher and the
//! shards. Failures carry no body: a non-integer key and a missing key both
//! answer `404 Not Found` with an empty payload.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Collection endpoint; `GET` lists every record held by the shard.
pub const ENDPOINT_KEYS: &str = "/keys";
/// Single-record lookup (`GET`).
pub const ROUTE_KEY: &str = "/keys/:key";
/// Record insertion (`PUT`). The value travels as the last path segment.
pub const ROUTE_KEY_VALUE: &str = "/keys/:key/:value";

/// Path segment under which all record routes live.
pub const KEYS_SEGMENT: &str = "keys";

// --- Data Transfer Objects ---

/// One stored key-value entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: i64,
    pub value: String,
}

impl Record {
    pub fn new(key: i64, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Parses the textual key of a request path.
pub fn parse_key(raw: &str) -> Result<i64, StoreError> {
    raw.parse::<i64>()
        .map_err(|_| StoreError::InvalidKey(raw.to_string()))
}
