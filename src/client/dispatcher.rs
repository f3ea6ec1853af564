use crate::error::DispatchError;
use crate::ring::{ConsistentHashRouter, Node};
use crate::storage::protocol::{KEYS_SEGMENT, Record, parse_key};

use reqwest::{StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;

pub struct ClientDispatcher {
    router: Arc<ConsistentHashRouter>,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl ClientDispatcher {
    pub fn new(router: Arc<ConsistentHashRouter>, timeout: Duration) -> Self {
        Self {
            router,
            http_client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn router(&self) -> &Arc<ConsistentHashRouter> {
        &self.router
    }

    /// Stores `value` under `key` on the shard owning the key.
    ///
    /// `""`, `"."` and `".."` cannot travel as a path segment and are rejected
    /// before any request is sent.
    pub async fn save_key(&self, key: &str, value: &str) -> Result<Record, DispatchError> {
        if matches!(value, "" | "." | "..") {
            return Err(DispatchError::InvalidValue(value.to_string()));
        }
        let (key_id, node) = self.route(key).await?;
        let url = shard_url(&node.address, &[KEYS_SEGMENT, &key_id.to_string(), value])?;

        let response = self
            .http_client
            .put(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| transport_error(&node.address, source))?;

        match response.status() {
            status if status.is_success() => {
                let record = decode::<Record>(&node.address, response).await?;
                tracing::info!("Saved key {} on {} ({})", record.key, node.id, node.address);
                Ok(record)
            }
            status => Err(unexpected(&node.address, status)),
        }
    }

    /// Reads the record stored under `key`, `None` if the owning shard has none.
    pub async fn fetch_key(&self, key: &str) -> Result<Option<Record>, DispatchError> {
        let (key_id, node) = self.route(key).await?;
        let url = shard_url(&node.address, &[KEYS_SEGMENT, &key_id.to_string()])?;

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| transport_error(&node.address, source))?;

        match response.status() {
            StatusCode::OK => Ok(Some(decode::<Record>(&node.address, response).await?)),
            StatusCode::NOT_FOUND => {
                tracing::debug!("Key {} not present on {}", key_id, node.address);
                Ok(None)
            }
            status => Err(unexpected(&node.address, status)),
        }
    }

    /// Lists every record held by the shard at `address`. Not key-routed.
    pub async fn list_shard(&self, address: &str) -> Result<Vec<Record>, DispatchError> {
        let url = shard_url(address, &[KEYS_SEGMENT])?;

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| transport_error(address, source))?;

        match response.status() {
            StatusCode::OK => decode::<Vec<Record>>(address, response).await,
            status => Err(unexpected(address, status)),
        }
    }

    /// Validates the key and resolves its owner.
    ///
    /// Routing hashes the canonical decimal form, so `"05"` and `"5"` land on
    /// the same shard as the record they both address.
    async fn route(&self, key: &str) -> Result<(i64, Node), DispatchError> {
        let key_id = parse_key(key).map_err(|_| DispatchError::InvalidKey(key.to_string()))?;
        let node = self.router.locate(&key_id.to_string()).await?;
        Ok((key_id, node))
    }
}

fn shard_url(address: &str, segments: &[&str]) -> Result<Url, DispatchError> {
    let invalid = || DispatchError::InvalidAddress(address.to_string());

    let mut url = Url::parse(&format!("http://{}", address)).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .clear()
        .extend(segments);
    Ok(url)
}

async fn decode<T>(address: &str, response: reqwest::Response) -> Result<T, DispatchError>
where
    T: serde::de::DeserializeOwned,
{
    response.json::<T>().await.map_err(|source| DispatchError::Decode {
        address: address.to_string(),
        source,
    })
}

fn transport_error(address: &str, source: reqwest::Error) -> DispatchError {
    tracing::warn!("Shard {} unreachable: {}", address, source);
    DispatchError::Unreachable {
        address: address.to_string(),
        source,
    }
}

fn unexpected(address: &str, status: StatusCode) -> DispatchError {
    DispatchError::UnexpectedStatus {
        address: address.to_string(),
        status: status.as_u16(),
    }
}
