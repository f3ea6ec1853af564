//! Shard Storage Module
//!
//! Implements the in-memory store owned by a single shard and its HTTP surface.
//!
//! ## Core Concepts
//! - **Append log**: `ShardStore` keeps records in insertion order. A second put for the same key
//!   appends another record instead of overwriting; reads return the oldest match.
//! - **Explicit ownership**: every listener is handed its own store at startup. Nothing inspects the
//!   inbound connection to decide which store a request touches.
//! - **Wire contract**: `PUT /keys/{key}/{value}`, `GET /keys/{key}`, `GET /keys`, JSON bodies
//!   (see `protocol`).

pub mod handlers;
pub mod memory;
pub mod protocol;
pub mod server;
