use shardring::client::{ClientDispatcher, demo};
use shardring::config::{ClientConfig, Command, Config, ServeConfig, parse_args};
use shardring::ring::ConsistentHashRouter;
use shardring::storage::memory::ShardStore;
use shardring::storage::server::ShardListener;

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Config { command, verbose } = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match command {
        Command::Serve(config) => serve(config).await,
        Command::Put { client, key, value } => {
            let dispatcher = build_dispatcher(&client).await;
            print_json(&dispatcher.save_key(&key, &value).await?)
        }
        Command::Get { client, key } => {
            let dispatcher = build_dispatcher(&client).await;
            match dispatcher.fetch_key(&key).await? {
                Some(record) => print_json(&record),
                None => anyhow::bail!("key {} not found", key),
            }
        }
        Command::List { client, address } => {
            let dispatcher = build_dispatcher(&client).await;
            print_json(&dispatcher.list_shard(&address).await?)
        }
        Command::Demo(client) => demo::run(&build_dispatcher(&client).await).await,
    }
}

async fn serve(config: ServeConfig) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut handles = Vec::new();

    // One store per listener, handed over explicitly.
    for bind_addr in config.binds {
        let listener = ShardListener::bind(bind_addr, Arc::new(ShardStore::new())).await?;
        let mut rx = shutdown_rx.clone();

        handles.push(tokio::spawn(async move {
            let shutdown = async move {
                let _ = rx.changed().await;
            };
            if let Err(e) = listener.serve(shutdown).await {
                tracing::error!("Shard on {} failed: {}", bind_addr, e);
            }
        }));
    }

    tracing::info!("Press Ctrl+C to shutdown");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down {} shard(s)", handles.len());
    let _ = shutdown_tx.send(true);

    for handle in handles {
        handle.await?;
    }
    Ok(())
}

async fn build_dispatcher(config: &ClientConfig) -> ClientDispatcher {
    let router = Arc::new(ConsistentHashRouter::new());
    for node in &config.nodes {
        if !router.add_node(node.clone()).await {
            tracing::warn!("Skipping duplicate node {} ({})", node.id, node.address);
        }
    }
    ClientDispatcher::new(router, config.request_timeout)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
