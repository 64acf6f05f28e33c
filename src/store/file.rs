//! File-backed key-value store.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use sha2::{Digest, Sha256};

use crate::store::{KeyValueStore, StoreError};

/// Durable store keeping one file per key under a directory.
///
/// Keys may contain characters that are not filesystem-safe, so each key
/// is mapped to the hex SHA-256 of its bytes as the filename. Writes go
/// through a temporary file and a rename, so a crash mid-write leaves the
/// previous value intact rather than a truncated one.
///
/// # Example
///
/// ```rust,no_run
/// use indodax_api_client::store::{FileStore, KeyValueStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileStore::open("/var/lib/my-bot/indodax").await?;
/// store.set("nonce:my_key", "42").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// The directory this store writes under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.val", hex::encode(digest)))
    }
}

impl KeyValueStore for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move {
            match tokio::fs::read_to_string(self.path_for(key)).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let path = self.path_for(key);
            let tmp = path.with_extension("tmp");
            tokio::fs::write(&tmp, value).await?;
            tokio::fs::rename(&tmp, &path).await?;
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match tokio::fs::remove_file(self.path_for(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("indodax-store-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_set_get_remove_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let store = FileStore::open(&dir).await.unwrap();

        assert_eq!(store.get("nonce:key").await.unwrap(), None);

        store.set("nonce:key", "42").await.unwrap();
        assert_eq!(store.get("nonce:key").await.unwrap(), Some("42".to_string()));

        store.remove("nonce:key").await.unwrap();
        assert_eq!(store.get("nonce:key").await.unwrap(), None);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_value_survives_reopen() {
        let dir = scratch_dir("reopen");
        {
            let store = FileStore::open(&dir).await.unwrap();
            store.set("nonce:key", "1721036201000").await.unwrap();
        }

        let store = FileStore::open(&dir).await.unwrap();
        assert_eq!(
            store.get("nonce:key").await.unwrap(),
            Some("1721036201000".to_string())
        );

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsafe_key_characters() {
        let dir = scratch_dir("unsafe-keys");
        let store = FileStore::open(&dir).await.unwrap();

        let key = "cache:btc_idr/ticker?x=1";
        store.set(key, "{}").await.unwrap();
        assert_eq!(store.get(key).await.unwrap(), Some("{}".to_string()));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let dir = scratch_dir("remove-missing");
        let store = FileStore::open(&dir).await.unwrap();

        store.remove("never-set").await.unwrap();

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
