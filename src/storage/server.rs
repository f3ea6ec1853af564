use super::handlers::shard_router;
use super::memory::ShardStore;

use anyhow::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A bound shard endpoint serving exactly one store.
pub struct ShardListener {
    listener: TcpListener,
    store: Arc<ShardStore>,
}

impl ShardListener {
    pub async fn bind(addr: SocketAddr, store: Arc<ShardStore>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, store })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` resolves. Each connection is handled on
    /// its own task.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        tracing::info!("Shard listening on {}", addr);

        axum::serve(self.listener, shard_router(self.store))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Shard on {} stopped", addr);
        Ok(())
    }
}
