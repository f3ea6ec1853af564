//! Client Dispatcher Module
//!
//! Routes key operations to the owning shard over HTTP.
//!
//! A failed remote call is returned to the caller as is. There is no retry, no
//! queueing and no replica to fall back to: while a shard is down, every key it
//! owns is unavailable.

pub mod demo;
pub mod dispatcher;

pub use dispatcher::ClientDispatcher;
