//! Consistent-Hashing Sharded Key-Value Library
//!
//! Routes key-value operations to one of several independent storage shards. A client
//! locates the shard owning a key by hashing it onto a ring, without any central directory,
//! and adding a shard only reassigns the keys between it and its predecessor.
//!
//! ## Architecture Modules
//! - **`ring`**: Node registry, hash ring and the consistent hash router composing them.
//! - **`storage`**: The per-shard append-only record store and its HTTP endpoints.
//! - **`client`**: The dispatcher that resolves a key's shard and performs the remote call.
//! - **`config`**: Command-line configuration of the server and client commands.
//! - **`error`**: Typed failures (`EmptyRing`, `InvalidKey`, `NotFound`, `Unreachable`).

pub mod client;
pub mod config;
pub mod error;
pub mod ring;
pub mod storage;
