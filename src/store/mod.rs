//! Persistent key-value storage for nonce and response state.
//!
//! The client only ever talks to the [`KeyValueStore`] trait, so any
//! backend that can get and set string values asynchronously can hold the
//! nonce counter. Two implementations ship with the crate:
//!
//! - [`MemoryStore`] - process-local, the default; nonce state does not
//!   survive a restart, leaving the time-derived floor to take over
//! - [`FileStore`] - one file per key under a directory, so the nonce
//!   watermark persists across process restarts

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use futures_util::future::BoxFuture;
use thiserror::Error;

/// Error type for storage backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure
    #[error("{0}")]
    Backend(String),
}

/// Asynchronous key-value persistence consumed by the client.
///
/// Keys in use: `nonce:{api_key}` for the per-credential nonce counter.
/// Implementations must complete a `set` durably before resolving, since
/// the request cycle reports success only after the nonce is persisted.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Remove the value stored under `key`, if any.
    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;
}
