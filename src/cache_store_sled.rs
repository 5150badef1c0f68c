use std::path::Path;

use async_trait::async_trait;
use sled::Db;
use tracing::debug;

use crate::cache_store::CacheStore;
use crate::errors::{GateError, GateResult};

const TREE_NAME: &str = "policy_cache";

/// A sled-backed implementation of CacheStore that survives restarts.
pub struct SledCacheStore {
    db: Db,
}

impl SledCacheStore {
    /// Opens (or creates) the sled database at `path`.
    pub fn open(path: impl AsRef<Path>) -> GateResult<Self> {
        let path = path.as_ref();
        let db = sled::open(path)
            .map_err(|e| GateError::storage(format!("open {}", path.display()), e.to_string()))?;
        Ok(Self { db })
    }

    fn tree(&self) -> GateResult<sled::Tree> {
        self.db
            .open_tree(TREE_NAME)
            .map_err(|e| GateError::storage("open_tree", e.to_string()))
    }
}

#[async_trait]
impl CacheStore for SledCacheStore {
    async fn get(&self, key: &str) -> GateResult<String> {
        let tree = self.tree()?;
        let bytes = tree
            .get(key.as_bytes())?
            .ok_or_else(|| GateError::not_found(key))?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| GateError::malformed(format!("cache entry '{key}'"), e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> GateResult<()> {
        let tree = self.tree()?;
        tree.insert(key.as_bytes(), value.as_bytes())?;
        tree.flush_async().await?;
        debug!(key, bytes = value.len(), "cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn write_and_read_roundtrip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store = SledCacheStore::open(temp_dir.path()).expect("open sled");

        store.set("policy", "{\"ios\":{}}").await.expect("set failed");
        assert_eq!(store.get("policy").await.expect("get failed"), "{\"ios\":{}}");
    }

    #[tokio::test]
    async fn value_survives_reopen() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        {
            let store = SledCacheStore::open(temp_dir.path()).unwrap();
            store.set("policy", "persisted").await.unwrap();
        }
        let reopened = SledCacheStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("policy").await.unwrap(), "persisted");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let store = SledCacheStore::open(temp_dir.path()).unwrap();
        let result = store.get("absent").await;
        assert!(matches!(result, Err(GateError::NotFound { .. })));
    }
}
