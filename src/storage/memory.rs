use super::protocol::Record;
use crate::error::StoreError;

use tokio::sync::RwLock;

/// Append-ordered records of one shard.
///
/// Puts serialize on the write lock; gets and lists share the read lock and
/// never observe a half-applied put.
#[derive(Debug, Default)]
pub struct ShardStore {
    records: RwLock<Vec<Record>>,
}

impl ShardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Existing records with the same key are left in place.
    pub async fn put(&self, key: i64, value: String) -> Record {
        let record = Record { key, value };
        let mut records = self.records.write().await;
        records.push(record.clone());
        tracing::debug!("Appended key {} ({} record(s) held)", key, records.len());
        record
    }

    /// First record inserted under `key`.
    pub async fn get(&self, key: i64) -> Result<Record, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.key == key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
