//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use futures_util::future::BoxFuture;

use crate::store::{KeyValueStore, StoreError};

/// Process-local store backed by a `HashMap`.
///
/// This is the default store on a freshly built client. It upholds the
/// persistence contract within a process lifetime only; across restarts
/// the nonce cycle falls back to its time-derived floor.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move {
            let entries = self
                .entries
                .lock()
                .map_err(|_| StoreError::Backend("memory store poisoned".to_string()))?;
            Ok(entries.get(key).cloned())
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| StoreError::Backend("memory store poisoned".to_string()))?;
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| StoreError::Backend("memory store poisoned".to_string()))?;
            entries.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("nonce:key").await.unwrap(), None);

        store.set("nonce:key", "42").await.unwrap();
        assert_eq!(store.get("nonce:key").await.unwrap(), Some("42".to_string()));

        store.set("nonce:key", "43").await.unwrap();
        assert_eq!(store.get("nonce:key").await.unwrap(), Some("43".to_string()));

        store.remove("nonce:key").await.unwrap();
        assert_eq!(store.get("nonce:key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryStore::new();

        store.set("nonce:a", "1").await.unwrap();
        store.set("nonce:b", "2").await.unwrap();

        assert_eq!(store.get("nonce:a").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get("nonce:b").await.unwrap(), Some("2".to_string()));
    }
}
