use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use std::sync::Arc;

use super::memory::ShardStore;
use super::protocol::{ENDPOINT_KEYS, ROUTE_KEY, ROUTE_KEY_VALUE, Record, parse_key};
use crate::error::StoreError;

/// HTTP routes of one shard, bound to the store it owns.
pub fn shard_router(store: Arc<ShardStore>) -> Router {
    Router::new()
        .route(ENDPOINT_KEYS, get(handle_list))
        .route(ROUTE_KEY, get(handle_get))
        .route(ROUTE_KEY_VALUE, put(handle_put))
        .layer(Extension(store))
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        match self {
            StoreError::InvalidKey(_) | StoreError::NotFound(_) => {
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

pub async fn handle_put(
    Extension(store): Extension<Arc<ShardStore>>,
    Path((key_str, value)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Record>), StoreError> {
    let key = parse_key(&key_str).inspect_err(|e| tracing::warn!("PUT rejected: {}", e))?;

    let record = store.put(key, value).await;
    tracing::info!("Stored key {} = {:?}", record.key, record.value);

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn handle_get(
    Extension(store): Extension<Arc<ShardStore>>,
    Path(key_str): Path<String>,
) -> Result<Json<Record>, StoreError> {
    let key = parse_key(&key_str).inspect_err(|e| tracing::warn!("GET rejected: {}", e))?;

    match store.get(key).await {
        Ok(record) => {
            tracing::info!("Found key {}", key);
            Ok(Json(record))
        }
        Err(e) => {
            tracing::debug!("GET: {}", e);
            Err(e)
        }
    }
}

pub async fn handle_list(
    Extension(store): Extension<Arc<ShardStore>>,
) -> Json<Vec<Record>> {
    let records = store.list().await;
    tracing::debug!("Listing {} record(s)", records.len());
    Json(records)
}
