use super::dispatcher::ClientDispatcher;

use anyhow::Result;
use serde::Serialize;

/// Saves keys 1..=10, reads them back, then dumps every shard.
pub async fn run(dispatcher: &ClientDispatcher) -> Result<()> {
    let keys: Vec<(String, String)> = ('a'..='j')
        .enumerate()
        .map(|(i, value)| ((i + 1).to_string(), value.to_string()))
        .collect();
    let mut failures = 0usize;

    println!("Put keys in cache");
    for (key, value) in &keys {
        match dispatcher.save_key(key, value).await {
            Ok(record) => print_json(&record)?,
            Err(e) => {
                tracing::error!("Put {} failed: {}", key, e);
                failures += 1;
            }
        }
    }

    println!("Get keys from cache");
    for (key, _) in &keys {
        match dispatcher.fetch_key(key).await {
            Ok(Some(record)) => print_json(&record)?,
            Ok(None) => {
                tracing::warn!("Key {} not found", key);
                failures += 1;
            }
            Err(e) => {
                tracing::error!("Get {} failed: {}", key, e);
                failures += 1;
            }
        }
    }

    for node in dispatcher.router().nodes().await {
        println!("Get all keys from {} ({})", node.id, node.address);
        match dispatcher.list_shard(&node.address).await {
            Ok(records) => print_json(&records)?,
            Err(e) => {
                tracing::error!("List {} failed: {}", node.address, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("demo finished with {} failed operation(s)", failures);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
